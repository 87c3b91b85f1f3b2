//! Local feasibility reasoning: which parts must be lowered, which may
//! always be raised, and whether a given ON-set cube could still be
//! absorbed by some future expansion. Ported from `expand.c`.

use crate::cover::Cover;
use crate::cube::{cdist0, cdist01, force_lower, CubeFlags, RawCube};
use crate::descriptor::CubeDescriptor;
use crate::error::{ExpandError, Result};

/// `essen_parts(BB, CC, RAISE, FREESET)` -- forces into LOWERED every part
/// whose raising would collide with the OFF-set.
///
/// For each ACTIVE OFF-set cube `b`, compute its distance to `RAISE`
/// (counting only conflicts); distance 0 means RAISE already intersects the
/// OFF-set (fatal), distance 1 identifies a unique conflicting variable whose
/// free parts must be forced low, distance > 1 leaves `b` unconstrained for
/// now.
pub fn essen_parts(
    desc: &CubeDescriptor,
    bb: &mut Cover,
    cc: Option<&mut Cover>,
    raise: &RawCube,
    freeset: &mut RawCube,
) -> Result<()> {
    let mut xlower = desc.emptyset().clone();

    for p in bb.iter_active_mut() {
        let dist = cdist01(desc, p, raise);
        if dist <= 1 {
            if dist == 0 {
                return Err(ExpandError::NotOrthogonal);
            }
            force_lower(desc, &mut xlower, p, raise);
            p.flags.reset(CubeFlags::ACTIVE);
        }
    }
    bb.sf_active();

    if !xlower.setp_empty() {
        freeset.set_diff(&xlower);
        elim_lowering(desc, bb, cc, raise, freeset);
    }
    Ok(())
}

/// `essen_raising(BB, RAISE, FREESET)` -- parts not appearing in any ACTIVE
/// OFF-set cube are free to raise unconditionally.
pub fn essen_raising(desc: &CubeDescriptor, bb: &Cover, raise: &mut RawCube, freeset: &mut RawCube) {
    let mut blocked = desc.emptyset().clone();
    for p in bb.iter_active() {
        blocked.set_or(p);
    }
    let mut free_to_raise = freeset.clone();
    free_to_raise.set_diff(&blocked);

    raise.set_or(&free_to_raise);
    freeset.set_diff(&free_to_raise);
}

/// `elim_lowering(BB, CC, RAISE, FREESET)` -- after FREESET shrinks, reprune
/// both sides: OFF-set cubes unreachable from the overexpanded cube are
/// deactivated, and ON-set cubes no longer coverable by it are deactivated
/// too. `CC` may be absent (the min-cover fallback has none to prune).
pub fn elim_lowering(
    desc: &CubeDescriptor,
    bb: &mut Cover,
    cc: Option<&mut Cover>,
    raise: &RawCube,
    freeset: &RawCube,
) {
    let overexpanded = RawCube::union(raise, freeset);

    for p in bb.iter_active_mut() {
        if !cdist0(desc, p, &overexpanded) {
            p.flags.reset(CubeFlags::ACTIVE);
        }
    }
    bb.sf_active();

    if let Some(cc) = cc {
        for p in cc.iter_active_mut() {
            if !p.setp_implies(&overexpanded) {
                p.flags.reset(CubeFlags::ACTIVE);
            }
        }
        cc.sf_active();
    }
}

/// `feasibly_covered(BB, c, RAISE, new_lower)` -- would raising everything
/// needed to absorb `c` still leave the cube orthogonal to every ACTIVE
/// OFF-set cube? If so, the parts that would be forced low are accumulated
/// into `new_lower` and `true` is returned.
pub fn feasibly_covered(
    desc: &CubeDescriptor,
    bb: &Cover,
    c: &RawCube,
    raise: &RawCube,
    new_lower: &mut RawCube,
) -> bool {
    let r = RawCube::union(raise, c);
    new_lower.set_copy(desc.emptyset());

    for p in bb.iter_active() {
        let dist = cdist01(desc, p, &r);
        if dist <= 1 {
            if dist == 0 {
                return false;
            }
            force_lower(desc, new_lower, p, &r);
        }
    }
    true
}
