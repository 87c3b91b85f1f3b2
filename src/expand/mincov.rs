//! Fallback minimum-cover reduction: when no ON-set cube can be covered,
//! transform the problem of growing a cube into a minimum-cardinality set
//! cover over the blocking OFF-set. Ported from `expand.c`'s `mincov`.

use super::feasibility::essen_parts;
use super::heuristics::most_frequent;
use crate::config::ExpandConfig;
use crate::cover::Cover;
use crate::cube::{force_lower, RawCube};
use crate::descriptor::CubeDescriptor;
use crate::error::Result;

/// `mincov(BB, RAISE, FREESET)` -- either peel off a single heuristic part
/// (returning control to the `expand1` loop, which will call back in if
/// `BB` is still unsatisfied) or, for small enough problems, solve the exact
/// minimum cover and finish the expansion outright (`FREESET` becomes empty
/// and `BB.active_count` drops to 0).
pub fn mincov(
    desc: &CubeDescriptor,
    config: &ExpandConfig,
    bb: &mut Cover,
    raise: &mut RawCube,
    freeset: &mut RawCube,
) -> Result<()> {
    // B: for each ACTIVE cube of BB, the parts that must be lowered to avoid it.
    let mut b = Cover::with_capacity(bb.active_count);
    for p in bb.iter_active() {
        let mut row = desc.emptyset().clone();
        force_lower(desc, &mut row, p, raise);
        b.push(row);
    }

    // Estimate how many rows the unravel would blow up into.
    let mut nset = 0usize;
    let mut heuristic = false;
    'estimate: for row in b.iter() {
        let mut expansion = 1usize;
        let dist = row.set_dist(desc.output_mask());
        if dist > 1 {
            expansion = expansion.saturating_mul(dist);
            if expansion > config.unravel_budget {
                heuristic = true;
                break 'estimate;
            }
        }
        nset += expansion;
        if nset > config.unravel_budget {
            heuristic = true;
            break 'estimate;
        }
    }

    if heuristic {
        config.debug("mincov: unravel budget exceeded, falling back to heuristic mode");
        let part = most_frequent(desc, None, freeset);
        raise.set_insert(part);
        freeset.set_remove(part);
        essen_parts(desc, bb, None, raise, freeset)?;
        return Ok(());
    }

    let unraveled = unravel_output(desc, b);
    let xlower = do_sm_minimum_cover(desc, &unraveled);

    let mut to_raise = freeset.clone();
    to_raise.set_diff(&xlower);
    raise.set_or(&to_raise);
    freeset.set_copy(desc.emptyset());
    bb.active_count = 0;
    for p in bb.iter_mut() {
        p.flags.reset(crate::cube::CubeFlags::ACTIVE);
    }
    Ok(())
}

/// `unravel_output(B)` -- split each row of `B` whose restriction to the
/// output variable spans more than one part into one row per output part
/// (every other part of the row is kept as-is).
pub fn unravel_output(desc: &CubeDescriptor, b: Cover) -> Cover {
    let out = desc.var(desc.output());
    let mut result = Cover::with_capacity(b.count());
    for row in b.into_rows() {
        let output_parts: Vec<usize> = (out.first_part..=out.last_part)
            .filter(|&part| row.is_in_set(part))
            .collect();
        if output_parts.len() <= 1 {
            result.push(row);
            continue;
        }
        for part in output_parts {
            let mut split = desc.emptyset().clone();
            for i in 0..desc.size() {
                let in_output_range = i >= out.first_part && i <= out.last_part;
                if row.is_in_set(i) && !in_output_range {
                    split.set_insert(i);
                }
            }
            split.set_insert(part);
            result.push(split);
        }
    }
    result
}

/// `do_sm_minimum_cover(B)` -- return a minimum-cardinality set of parts
/// that hits every row of `B` (every row has at least one of its parts
/// lowered). Exact branch-and-bound: `mincov` only reaches this path once
/// the unravel budget has already bounded the instance size, so an exact
/// solve is both affordable and matches the spec's "minimum cardinality"
/// contract (a greedy cover could be larger than necessary).
pub fn do_sm_minimum_cover(desc: &CubeDescriptor, b: &Cover) -> RawCube {
    let rows: Vec<Vec<usize>> = b
        .iter()
        .map(|row| (0..desc.size()).filter(|&i| row.is_in_set(i)).collect())
        .collect();

    if rows.iter().any(|r| r.is_empty()) {
        // An unsatisfiable row (forced to avoid a cube with no remaining
        // lowering option) cannot happen if essen_parts ran first, but stay
        // defensive rather than panicking.
        return desc.emptyset().clone();
    }

    let greedy = greedy_cover(&rows);
    let mut best = greedy.clone();
    let mut chosen = Vec::new();
    branch_and_bound(&rows, 0, &mut chosen, &mut best);

    let mut result = desc.emptyset().clone();
    for part in best {
        result.set_insert(part);
    }
    result
}

fn row_is_hit(row: &[usize], chosen: &[usize]) -> bool {
    row.iter().any(|p| chosen.contains(p))
}

fn greedy_cover(rows: &[Vec<usize>]) -> Vec<usize> {
    let mut uncovered: Vec<&Vec<usize>> = rows.iter().collect();
    let mut chosen = Vec::new();
    while !uncovered.is_empty() {
        let mut counts = std::collections::HashMap::new();
        for row in &uncovered {
            for &p in row.iter() {
                *counts.entry(p).or_insert(0usize) += 1;
            }
        }
        let &best_part = counts.iter().max_by_key(|(&p, &c)| (c, std::cmp::Reverse(p))).map(|(p, _)| p).unwrap();
        chosen.push(best_part);
        uncovered.retain(|row| !row.contains(&best_part));
    }
    chosen
}

/// Exhaustive branch-and-bound over which part to add next, pruned by the
/// best solution found so far (seeded with the greedy cover).
fn branch_and_bound(rows: &[Vec<usize>], start_row: usize, chosen: &mut Vec<usize>, best: &mut Vec<usize>) {
    if chosen.len() >= best.len() {
        return;
    }
    // Find the first row not yet hit by `chosen`.
    let mut row_idx = start_row;
    while row_idx < rows.len() && row_is_hit(&rows[row_idx], chosen) {
        row_idx += 1;
    }
    if row_idx == rows.len() {
        if chosen.len() < best.len() {
            *best = chosen.clone();
        }
        return;
    }
    for &part in &rows[row_idx] {
        chosen.push(part);
        branch_and_bound(rows, row_idx + 1, chosen, best);
        chosen.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::cube_from_pattern;

    #[test]
    fn minimum_cover_picks_smallest_hitting_set() {
        let desc = CubeDescriptor::new(&[2], 1);
        let mut b = Cover::new();
        // Row 0: parts {0, 1}; Row 1: parts {0}; a single part (0) hits both.
        let mut r0 = desc.emptyset().clone();
        r0.set_insert(0);
        r0.set_insert(1);
        b.push(r0);
        let mut r1 = desc.emptyset().clone();
        r1.set_insert(0);
        b.push(r1);

        let cover = do_sm_minimum_cover(&desc, &b);
        assert_eq!(cover.set_ord(), 1);
        assert!(cover.is_in_set(0));
    }

    #[test]
    fn unravel_output_splits_multi_output_rows() {
        let desc = CubeDescriptor::new(&[2], 2);
        let mut b = Cover::new();
        let mut row = desc.emptyset().clone();
        row.set_insert(0); // var0 literal
        row.set_insert(desc.var(desc.output()).first_part);
        row.set_insert(desc.var(desc.output()).first_part + 1);
        b.push(row);

        let split = unravel_output(&desc, b);
        assert_eq!(split.count(), 2);
        for row in split.iter() {
            assert!(row.is_in_set(0));
            assert_eq!(row.set_dist(desc.var_mask(0)), 1);
        }
    }

    #[test]
    fn mincov_falls_back_to_heuristic_when_budget_exceeded() {
        let desc = CubeDescriptor::new(&[2, 2], 1);
        let mut bb = Cover::new();
        bb.push(cube_from_pattern(&desc, &[Some(false), Some(false)], &[true]));
        bb.sf_active();

        let mut config = ExpandConfig::default();
        config.unravel_budget = 0; // force the heuristic branch

        let mut raise = desc.new_cube();
        let mut freeset = desc.fullset().clone();
        mincov(&desc, &config, &mut bb, &mut raise, &mut freeset).unwrap();
        assert_eq!(raise.set_ord(), 1);
    }
}
