//! `expand1` -- expand a single cube against the OFF-set into a prime
//! implicant, opportunistically absorbing other ON-set cubes. Ported from
//! `expand.c`.

use super::feasibility::{elim_lowering, essen_parts};
use super::heuristics::{most_frequent, select_feasible};
use super::mincov::mincov;
use crate::config::ExpandConfig;
use crate::cover::Cover;
use crate::cube::{CubeFlags, RawCube};
use crate::descriptor::CubeDescriptor;
use crate::error::Result;

/// Expand cube `target` (identified by its row index in `cc`) against the
/// OFF-set `bb`, possibly absorbing other ON-set cubes of `cc` along the
/// way. `init_lower` is a set of parts to remove from FREESET before
/// starting (used by `make_sparse` to keep the output partition frozen
/// during a `nonsparse` expansion).
pub fn expand1(
    desc: &CubeDescriptor,
    config: &ExpandConfig,
    bb: &mut Cover,
    cc: &mut Cover,
    init_lower: &RawCube,
    target: usize,
) -> Result<()> {
    // Phase 1: prime self-exclusion.
    cc.get_mut(target).flags.set(CubeFlags::PRIME);
    let c = cc.get(target).clone();

    // Phase 2: activate universes.
    for p in bb.iter_mut() {
        p.flags.set(CubeFlags::ACTIVE);
    }
    bb.active_count = bb.count();

    for p in cc.iter_mut() {
        if p.flags.test(CubeFlags::COVERED) || p.flags.test(CubeFlags::PRIME) {
            p.flags.reset(CubeFlags::ACTIVE);
        } else {
            p.flags.set(CubeFlags::ACTIVE);
        }
    }
    cc.sf_active();

    // Phase 3: initialize.
    let mut num_covered = 0usize;
    let mut super_cube = c.clone();
    let mut raise = c.clone();
    let mut freeset = desc.fullset().clone();
    freeset.set_diff(&raise);

    // Phase 4: apply initial lowering.
    if !init_lower.setp_empty() {
        freeset.set_diff(init_lower);
        elim_lowering(desc, bb, Some(cc), &raise, &freeset);
    }

    // Phase 5: essential lowering.
    essen_parts(desc, bb, Some(cc), &raise, &mut freeset)?;
    let overexpanded_cube = RawCube::union(&raise, &freeset);

    config.trace(format_args!(
        "expand1: after essential lowering, {} free parts remain",
        freeset.set_ord()
    ));

    // Phase 6: greedy feasible covering.
    if cc.active_count > 0 {
        select_feasible(
            desc,
            bb,
            cc,
            &mut raise,
            &mut freeset,
            &mut super_cube,
            &mut num_covered,
        )?;
    }

    // Phase 7: most-frequent climb.
    while cc.active_count > 0 {
        let best = most_frequent(desc, Some(cc), &freeset);
        raise.set_insert(best);
        freeset.set_remove(best);
        essen_parts(desc, bb, Some(cc), &raise, &mut freeset)?;
    }

    // Phase 8: residual OFF-set resolution.
    while bb.active_count > 0 {
        mincov(desc, config, bb, &mut raise, &mut freeset)?;
    }

    // Phase 9: saturate.
    raise.set_or(&freeset);

    // Phase 10: commit.
    let target_cube = cc.get_mut(target);
    target_cube.set_copy(&raise);
    target_cube.flags.set(CubeFlags::PRIME);
    target_cube.flags.reset(CubeFlags::COVERED);

    // Phase 11: inessential prime detection.
    if num_covered == 0 && !target_cube.setp_equal(&overexpanded_cube) {
        target_cube.flags.set(CubeFlags::NONESSEN);
    }

    Ok(())
}
