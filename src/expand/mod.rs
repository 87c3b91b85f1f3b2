//! The EXPAND phase: turn every cube of an ON-set cover into a prime
//! implicant of the function, without letting it overlap the OFF-set.
//! Ported from `expand.c`'s top-level `expand` driver.

mod expand1;
mod feasibility;
mod heuristics;
mod mincov;

pub use expand1::expand1;
pub use feasibility::{elim_lowering, essen_parts, essen_raising, feasibly_covered};
pub use heuristics::{most_frequent, select_feasible};
pub use mincov::{do_sm_minimum_cover, mincov, unravel_output};

use crate::config::ExpandConfig;
use crate::cover::Cover;
use crate::cube::CubeFlags;
use crate::descriptor::CubeDescriptor;
use crate::error::Result;

/// `expand(F, R, nonsparse)` -- expand every non-prime, non-covered cube of
/// `f` into a prime implicant against the OFF-set `r`, mutating `f` in
/// place.
///
/// When `nonsparse` is set, the output variable's parts are frozen (never
/// raised) for the whole pass: this is how `make_sparse` reuses `expand` to
/// re-widen a cover's input literals without touching which outputs a cube
/// covers.
///
/// Cubes are visited fewest-literals-first (`mini_sort`), so the broadest
/// cubes expand first and narrower ones still active get a chance to be
/// absorbed into them rather than redundantly expanded on their own.
pub fn expand(desc: &CubeDescriptor, config: &ExpandConfig, f: &mut Cover, r: &mut Cover, nonsparse: bool) -> Result<()> {
    f.mini_sort_ascend(desc);

    let init_lower = if nonsparse {
        desc.output_mask().clone()
    } else {
        desc.emptyset().clone()
    };

    for p in f.iter_mut() {
        p.flags.reset(CubeFlags::COVERED);
        p.flags.reset(CubeFlags::NONESSEN);
    }

    for i in 0..f.count() {
        let skip = f.get(i).flags.test(CubeFlags::PRIME) || f.get(i).flags.test(CubeFlags::COVERED);
        if !skip {
            expand1(desc, config, r, f, &init_lower, i)?;
        }
    }

    f.drop_flagged(CubeFlags::COVERED);

    // Every surviving cube just went through expand1, which leaves ACTIVE
    // clear (its own phase 2 deactivates PRIME/COVERED rows, and phases 7/8
    // drain active_count to 0 on the way to a commit). Rebuild ACTIVE on
    // what's left, mirroring the C driver's explicit re-activation after
    // compaction rather than trusting whatever ACTIVE happened to be left
    // over from the last expand1 call.
    for p in f.iter_mut() {
        p.flags.set(CubeFlags::ACTIVE);
    }
    f.active_count = f.count();

    Ok(())
}
