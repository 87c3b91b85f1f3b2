//! Flat bit-set cube representation and the low-level set primitives
//! `expand.c`/`sparse.c` are written against.
//!
//! A cube is a set of *parts* (bits); a cover groups cubes with per-cube
//! status flags. Keeping the layout flat (one word array per cube, one flag
//! byte per cube) matches the cache-friendly "arena, not pointer graph"
//! design the original C sources rely on.

const WORD_BITS: usize = 64;

/// Per-cube status bits. Orthogonal -- any combination is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CubeFlags(u8);

impl CubeFlags {
    pub const ACTIVE: CubeFlags = CubeFlags(1 << 0);
    pub const PRIME: CubeFlags = CubeFlags(1 << 1);
    pub const COVERED: CubeFlags = CubeFlags(1 << 2);
    pub const NONESSEN: CubeFlags = CubeFlags(1 << 3);

    pub fn empty() -> Self {
        CubeFlags(0)
    }

    pub fn test(&self, flag: CubeFlags) -> bool {
        self.0 & flag.0 != 0
    }

    pub fn set(&mut self, flag: CubeFlags) {
        self.0 |= flag.0;
    }

    pub fn reset(&mut self, flag: CubeFlags) {
        self.0 &= !flag.0;
    }
}

/// A cube: a bit-set of parts, represented as a flat word array.
///
/// `RawCube` deliberately has no notion of "which variable is which" -- that
/// is the job of [`crate::descriptor::CubeDescriptor`]. This type only knows
/// how to do set algebra on a fixed-width bit-set, which is all the `expand`
/// engine needs at this layer.
#[derive(Debug, Clone)]
pub struct RawCube {
    size: usize,
    words: Vec<u64>,
    pub flags: CubeFlags,
}

impl RawCube {
    pub fn empty(size: usize) -> Self {
        RawCube {
            size,
            words: vec![0u64; size.div_ceil(WORD_BITS).max(1)],
            flags: CubeFlags::empty(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_in_set(&self, part: usize) -> bool {
        self.words[part / WORD_BITS] & (1u64 << (part % WORD_BITS)) != 0
    }

    pub fn set_insert(&mut self, part: usize) -> &mut Self {
        self.words[part / WORD_BITS] |= 1u64 << (part % WORD_BITS);
        self
    }

    pub fn set_remove(&mut self, part: usize) -> &mut Self {
        self.words[part / WORD_BITS] &= !(1u64 << (part % WORD_BITS));
        self
    }

    pub fn set_copy(&mut self, src: &RawCube) -> &mut Self {
        self.words.copy_from_slice(&src.words);
        self
    }

    /// `self |= other`
    pub fn set_or(&mut self, other: &RawCube) -> &mut Self {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= b;
        }
        self
    }

    /// `self -= other` (remove any part present in `other`)
    pub fn set_diff(&mut self, other: &RawCube) -> &mut Self {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a &= !b;
        }
        self
    }

    pub fn union(a: &RawCube, b: &RawCube) -> RawCube {
        let mut r = a.clone();
        r.set_or(b);
        r
    }

    pub fn difference(a: &RawCube, b: &RawCube) -> RawCube {
        let mut r = a.clone();
        r.set_diff(b);
        r
    }

    /// Number of parts present (popcount).
    pub fn set_ord(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of parts present in `self` but not in `other`.
    pub fn set_dist(&self, other: &RawCube) -> usize {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| (a & !b).count_ones() as usize)
            .sum()
    }

    pub fn setp_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn setp_equal(&self, other: &RawCube) -> bool {
        self.words == other.words
    }

    /// True iff `self` is a subset of `other` (every part of `self` is also
    /// in `other`).
    pub fn setp_implies(&self, other: &RawCube) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    pub fn setp_disjoint(&self, other: &RawCube) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & b == 0)
    }

    /// Add 1 to `counts[i]` for every part `i` present in this cube
    /// (`set_adjcnt(p, count, 1)` in the original sources).
    pub fn add_occurrences(&self, counts: &mut [u32]) {
        for (i, c) in counts.iter_mut().enumerate() {
            if self.is_in_set(i) {
                *c += 1;
            }
        }
    }

    /// Number of input literals (restricted input variables), i.e. the
    /// number of non-output variables which are not fully free in this
    /// cube. Used by `mini_sort`, which only cares about ordering cubes by
    /// how input-restricted they are. The output variable is deliberately
    /// excluded here: it records which outputs a cube contributes to, not
    /// an input literal, and `mv_reduce` routinely narrows a cube's output
    /// parts without that being a size reduction in the input-literal
    /// sense `mini_sort` orders by.
    pub fn literal_count(&self, desc: &crate::descriptor::CubeDescriptor) -> usize {
        (0..desc.num_vars())
            .filter(|&v| v != desc.output())
            .filter(|&v| !self.is_fully_free(desc, v))
            .count()
    }

    /// Number of output parts asserted by this cube -- the output
    /// variable's contribution to `cost.total` (Espresso counts one
    /// literal per present output part, not per restricted variable, since
    /// the output is multiple-valued rather than binary).
    pub fn output_literal_count(&self, desc: &crate::descriptor::CubeDescriptor) -> usize {
        let out = desc.var(desc.output());
        (out.first_part..=out.last_part)
            .filter(|&part| self.is_in_set(part))
            .count()
    }

    /// Total literal count (`in + out`, matching `cost_t.total` in the
    /// original sources): input literals plus asserted output parts. This
    /// is what `cover_cost` sums and `make_sparse` compares across
    /// `mv_reduce`/`expand` passes -- unlike `literal_count`, it does move
    /// when `mv_reduce` drops a redundant output bit.
    pub fn total_literal_count(&self, desc: &crate::descriptor::CubeDescriptor) -> usize {
        self.literal_count(desc) + self.output_literal_count(desc)
    }

    pub fn is_fully_free(&self, desc: &crate::descriptor::CubeDescriptor, v: usize) -> bool {
        desc.var_mask(v).setp_implies(self)
    }
}

impl RawCube {
    /// Whether `a` and `b` share a present part within the range masked by
    /// `mask` (i.e. whether they agree on at least one value of that
    /// variable).
    fn intersects_in_var(a: &RawCube, b: &RawCube, mask: &RawCube) -> bool {
        a.words
            .iter()
            .zip(b.words.iter())
            .zip(mask.words.iter())
            .any(|((wa, wb), wm)| (wa & wb & wm) != 0)
    }
}

/// `cdist0(a, b)` -- true iff `a` and `b` intersect in every variable (i.e.
/// they are not separable by lowering a single variable, let alone zero).
pub fn cdist0(desc: &crate::descriptor::CubeDescriptor, a: &RawCube, b: &RawCube) -> bool {
    (0..desc.num_vars()).all(|v| RawCube::intersects_in_var(a, b, desc.var_mask(v)))
}

/// `cdist01(a, b)` -- 0 if `a` and `b` intersect in every variable, 1 if they
/// fail to intersect in exactly one variable, and any value `> 1` (capped at
/// 2, since callers only ever branch on `<= 1`) otherwise.
pub fn cdist01(desc: &crate::descriptor::CubeDescriptor, a: &RawCube, b: &RawCube) -> usize {
    let mut dist = 0;
    for v in 0..desc.num_vars() {
        if !RawCube::intersects_in_var(a, b, desc.var_mask(v)) {
            dist += 1;
            if dist > 1 {
                return dist;
            }
        }
    }
    dist
}

/// `force_lower(dst, b, r)` -- accumulate into `dst` the parts of `b` that
/// are not yet part of `r`, restricted to the single variable where `b` and
/// `r` currently fail to intersect. Raising any of these parts into `r`
/// would make it overlap `b` in that variable, the one place `r` is
/// presently guaranteed disjoint from it, so they must stay lowered. Only
/// meaningful when `cdist01(b, r) == 1`; a no-op otherwise.
pub fn force_lower(
    desc: &crate::descriptor::CubeDescriptor,
    dst: &mut RawCube,
    b: &RawCube,
    r: &RawCube,
) {
    for v in 0..desc.num_vars() {
        let mask = desc.var_mask(v);
        if !RawCube::intersects_in_var(b, r, mask) {
            for part in desc.first_part(v)..=desc.last_part(v) {
                if b.is_in_set(part) && !r.is_in_set(part) {
                    dst.set_insert(part);
                }
            }
        }
    }
}
