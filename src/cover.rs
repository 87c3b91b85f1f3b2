//! A cover: an ordered arena of cubes with per-cube status flags.
//!
//! Covers are arrays of fixed-stride cubes accessed by index, not a linked
//! structure -- this keeps `sf_inactive` compaction a single retain pass and
//! sidesteps any cyclic-reference bookkeeping, matching the "arena over
//! pointer graphs" design note for this engine.

use crate::cube::{CubeFlags, RawCube};
use crate::descriptor::CubeDescriptor;

/// An ordered sequence of cubes ([`RawCube`]s) plus the active-count
/// bookkeeping `expand`/`mincov`/`make_sparse` rely on.
#[derive(Debug, Clone, Default)]
pub struct Cover {
    rows: Vec<RawCube>,
    pub active_count: usize,
}

impl Cover {
    pub fn new() -> Self {
        Cover {
            rows: Vec::new(),
            active_count: 0,
        }
    }

    pub fn with_capacity(n: usize) -> Self {
        Cover {
            rows: Vec::with_capacity(n),
            active_count: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a cube, marking it ACTIVE. Returns the row's index.
    pub fn push(&mut self, mut cube: RawCube) -> usize {
        cube.flags.set(CubeFlags::ACTIVE);
        self.rows.push(cube);
        self.active_count += 1;
        self.rows.len() - 1
    }

    /// `GETSET(cover, i)` -- address of row `i`.
    pub fn get(&self, i: usize) -> &RawCube {
        &self.rows[i]
    }

    pub fn get_mut(&mut self, i: usize) -> &mut RawCube {
        &mut self.rows[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawCube> {
        self.rows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RawCube> {
        self.rows.iter_mut()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &RawCube> {
        self.rows.iter().filter(|c| c.flags.test(CubeFlags::ACTIVE))
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut RawCube> {
        self.rows
            .iter_mut()
            .filter(|c| c.flags.test(CubeFlags::ACTIVE))
    }

    /// `sf_active` -- recompute `active_count` from each cube's ACTIVE flag.
    pub fn sf_active(&mut self) {
        self.active_count = self.rows.iter().filter(|c| c.flags.test(CubeFlags::ACTIVE)).count();
    }

    /// `sf_inactive` -- compact the cover, dropping every row whose ACTIVE
    /// flag is clear. `active_count` is left consistent with the result.
    pub fn sf_inactive(&mut self) {
        self.rows.retain(|c| c.flags.test(CubeFlags::ACTIVE));
        self.active_count = self.rows.len();
    }

    /// Drop every row carrying `flag`, regardless of its ACTIVE status.
    /// Unlike `sf_inactive`, this does not look at ACTIVE at all -- it is
    /// how `expand` retires COVERED cubes once a pass is done, since
    /// ACTIVE is expand1's own call-scoped scratch bit by that point, not a
    /// reflection of cover membership.
    pub fn drop_flagged(&mut self, flag: CubeFlags) {
        self.retain(|c| !c.flags.test(flag));
    }

    /// Keep only the rows matching `pred`, recomputing `active_count`.
    pub fn retain(&mut self, mut pred: impl FnMut(&RawCube) -> bool) {
        self.rows.retain(|c| pred(c));
        self.active_count = self.rows.iter().filter(|c| c.flags.test(CubeFlags::ACTIVE)).count();
    }

    /// `mini_sort(cover, ascend)` -- reorder the cover small-to-large by
    /// literal count, so that small (hard-to-cover) cubes expand first while
    /// larger cubes remain available as absorption candidates. Stable, so
    /// cubes with equal literal counts keep their relative order.
    pub fn mini_sort_ascend(&mut self, desc: &CubeDescriptor) {
        self.rows.sort_by_key(|c| c.literal_count(desc));
    }

    pub fn into_rows(self) -> Vec<RawCube> {
        self.rows
    }

    pub fn from_rows(rows: Vec<RawCube>) -> Self {
        let active_count = rows.iter().filter(|c| c.flags.test(CubeFlags::ACTIVE)).count();
        Cover { rows, active_count }
    }
}

impl std::ops::Index<usize> for Cover {
    type Output = RawCube;
    fn index(&self, i: usize) -> &RawCube {
        &self.rows[i]
    }
}

impl std::ops::IndexMut<usize> for Cover {
    fn index_mut(&mut self, i: usize) -> &mut RawCube {
        &mut self.rows[i]
    }
}

/// Build a single [`RawCube`] from a friendly positional pattern: one
/// `Option<bool>` per input variable (`None` is don't-care) and one `bool`
/// per output (simplified representation: `true` = bit set, `false` = bit
/// not set, matching the original cover's cube encoding).
pub fn cube_from_pattern(
    desc: &CubeDescriptor,
    inputs: &[Option<bool>],
    outputs: &[bool],
) -> RawCube {
    assert_eq!(inputs.len() + 1, desc.num_vars(), "input arity mismatch");
    let mut cube = desc.new_cube();
    for (v, value) in inputs.iter().enumerate() {
        let var = desc.var(v);
        assert_eq!(var.num_parts(), 2, "non-binary input variables are not supported by this helper");
        match value {
            Some(true) => {
                cube.set_insert(var.last_part);
            }
            Some(false) => {
                cube.set_insert(var.first_part);
            }
            None => {
                cube.set_insert(var.first_part);
                cube.set_insert(var.last_part);
            }
        }
    }
    let out = desc.var(desc.output());
    assert_eq!(outputs.len(), out.num_parts(), "output arity mismatch");
    for (i, &bit) in outputs.iter().enumerate() {
        if bit {
            cube.set_insert(out.first_part + i);
        }
    }
    cube
}

/// A scalar cost measure for a cover: total literal count plus cube count,
/// used by `make_sparse`'s termination test (`cover_cost`/`copy_cost` in the
/// external interfaces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cost {
    pub cubes: usize,
    pub total: usize,
}

/// `cover_cost(F, &c)` -- compute the cost of a cover. `total` is `in + out`
/// (input literals plus asserted output parts), matching `cost_t.total` in
/// the original sources -- this is the measure `make_sparse` compares across
/// `mv_reduce`/`expand` passes, so it must move when a redundant output bit
/// is dropped, unlike `RawCube::literal_count`.
pub fn cover_cost(desc: &CubeDescriptor, cover: &Cover) -> Cost {
    let mut total = 0;
    let mut cubes = 0;
    for c in cover.iter_active() {
        total += c.total_literal_count(desc);
        cubes += 1;
    }
    Cost { cubes, total }
}
