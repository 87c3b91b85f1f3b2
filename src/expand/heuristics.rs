//! Heuristic selection of which literals to raise when more than one choice
//! remains feasible. Ported from `expand.c`.

use super::feasibility::{essen_parts, essen_raising, feasibly_covered};
use crate::cover::Cover;
use crate::cube::{CubeFlags, RawCube};
use crate::descriptor::CubeDescriptor;
use crate::error::Result;

/// `most_frequent(CC, FREESET)` -- tally, over all ACTIVE cubes of `CC`, how
/// many cubes each free part is present in, and return the most frequent
/// free part (ties broken by lowest index). If `CC` is `None`, simply return
/// the lowest-indexed free part.
pub fn most_frequent(desc: &CubeDescriptor, cc: Option<&Cover>, freeset: &RawCube) -> usize {
    let mut counts = vec![0u32; desc.size()];
    if let Some(cc) = cc {
        for p in cc.iter_active() {
            p.add_occurrences(&mut counts);
        }
    }

    let mut best_part = None;
    let mut best_count = -1i64;
    for i in 0..desc.size() {
        if freeset.is_in_set(i) && counts[i] as i64 > best_count {
            best_part = Some(i);
            best_count = counts[i] as i64;
        }
    }
    best_part.expect("FREESET must be nonempty when most_frequent is called")
}

/// `select_feasible` -- iteratively absorb ON-set cubes while maintaining
/// feasibility, using one-level lookahead to pick which feasible cube to
/// cover next (the canonical `NEW` tie metric from `expand.c`: maximize the
/// number of other feasible cubes whose forced-lowerings stay disjoint from
/// this one, tie-break by fewest newly raised parts).
#[allow(clippy::too_many_arguments)]
pub fn select_feasible(
    desc: &CubeDescriptor,
    bb: &mut Cover,
    cc: &mut Cover,
    raise: &mut RawCube,
    freeset: &mut RawCube,
    super_cube: &mut RawCube,
    num_covered: &mut usize,
) -> Result<()> {
    // Candidate feasibly-covered cubes ("pfcc"), by row index into `cc`.
    let mut feas: Vec<usize> = (0..cc.count())
        .filter(|&i| cc.get(i).flags.test(CubeFlags::ACTIVE))
        .collect();

    loop {
        essen_raising(desc, bb, raise, freeset);

        let mut next_feas = Vec::with_capacity(feas.len());
        let mut feas_new_lower = Vec::with_capacity(feas.len());

        for &i in &feas {
            if !cc.get(i).flags.test(CubeFlags::ACTIVE) {
                continue;
            }
            if cc.get(i).setp_implies(raise) {
                *num_covered += 1;
                let c = cc.get(i).clone();
                super_cube.set_or(&c);
                cc.get_mut(i).flags.reset(CubeFlags::ACTIVE);
                cc.get_mut(i).flags.set(CubeFlags::COVERED);
            } else {
                let mut new_lower = desc.new_cube();
                let c = cc.get(i).clone();
                if feasibly_covered(desc, bb, &c, raise, &mut new_lower) {
                    next_feas.push(i);
                    feas_new_lower.push(new_lower);
                }
            }
        }
        cc.sf_active();
        feas = next_feas;

        if feas.is_empty() {
            return Ok(());
        }

        // Find the best feasible cube: maximize disjointness with the other
        // candidates' forced-lowerings, tie-break on fewest newly raised parts.
        let mut best_count = 0i64;
        let mut best_size = i64::MAX;
        let mut best_index = 0usize;
        let mut found = false;
        for i in 0..feas.len() {
            let size = cc.get(feas[i]).set_dist(freeset) as i64;
            let mut count = 0i64;
            for j in 0..feas.len() {
                if feas_new_lower[i].setp_disjoint(cc.get(feas[j])) {
                    count += 1;
                }
            }
            if count > best_count || !found {
                best_count = count;
                best_index = i;
                best_size = size;
                found = true;
            } else if count == best_count && size < best_size {
                best_index = i;
                best_size = size;
            }
        }

        let bestfeas = cc.get(feas[best_index]).clone();
        raise.set_or(&bestfeas);
        freeset.set_diff(&*raise);
        essen_parts(desc, bb, Some(&mut *cc), &*raise, freeset)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::cube_from_pattern;

    #[test]
    fn most_frequent_picks_majority_literal() {
        let desc = CubeDescriptor::new(&[2, 2], 1);
        let mut cc = Cover::new();
        cc.push(cube_from_pattern(&desc, &[Some(true), None], &[true]));
        cc.push(cube_from_pattern(&desc, &[Some(true), None], &[true]));
        cc.push(cube_from_pattern(&desc, &[None, Some(false)], &[true]));

        let freeset = desc.fullset().clone();
        let best = most_frequent(&desc, Some(&cc), &freeset);
        // var0's "value 1" literal (part 1) appears in 2 of 3 cubes.
        assert_eq!(best, desc.var(0).last_part);
    }

    #[test]
    fn most_frequent_without_cc_picks_lowest_index() {
        let desc = CubeDescriptor::new(&[2, 2], 1);
        let mut freeset = desc.fullset().clone();
        freeset.set_remove(0);
        let best = most_frequent(&desc, None, &freeset);
        assert_eq!(best, 1);
    }

    #[test]
    fn select_feasible_absorbs_a_coverable_cube() {
        // F = { 10 01 1, 10 11 1 }, expanding the first cube into 10 11 1
        // (free var1) feasibly covers the second cube.
        let desc = CubeDescriptor::new(&[2, 2], 1);
        let mut bb = Cover::new();
        bb.push(cube_from_pattern(&desc, &[Some(false), None], &[true]));
        bb.sf_active();

        let mut cc = Cover::new();
        cc.push(cube_from_pattern(&desc, &[Some(true), Some(false)], &[true]));
        cc.push(cube_from_pattern(&desc, &[Some(true), None], &[true]));
        // expanding cube excludes itself from the active candidate set, same
        // as expand1's phase 2 does for PRIME cubes.
        cc.get_mut(0).flags.set(CubeFlags::PRIME);
        cc.get_mut(0).flags.reset(CubeFlags::ACTIVE);
        cc.sf_active();

        let c = cube_from_pattern(&desc, &[Some(true), Some(false)], &[true]);
        let mut raise = c.clone();
        let mut freeset = desc.fullset().clone();
        freeset.set_diff(&raise);
        let mut super_cube = c.clone();
        let mut num_covered = 0;

        select_feasible(
            &desc,
            &mut bb,
            &mut cc,
            &mut raise,
            &mut freeset,
            &mut super_cube,
            &mut num_covered,
        )
        .unwrap();

        assert_eq!(num_covered, 1);
        assert!(cc.get(1).flags.test(CubeFlags::COVERED));
    }
}
