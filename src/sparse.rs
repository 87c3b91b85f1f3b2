//! Final literal-count cleanup: alternately reduce the output ("sparse")
//! variable and re-expand the input ("dense") variables. Ported from
//! `sparse.c`.

use crate::config::ExpandConfig;
use crate::cover::{cover_cost, Cover};
use crate::cube::CubeFlags;
use crate::descriptor::CubeDescriptor;
use crate::error::Result;
use crate::expand::expand;

/// `mark_irredundant(F1, D1)` -- flag every row of `f1` that is redundant
/// with respect to the rest of `f1` and the don't-care set `d1`, by
/// clearing its ACTIVE bit.
///
/// This is single-cube containment (SCC): a row is redundant if some other
/// single row (of `f1` or `d1`) already implies it. Real Espresso's
/// `IRREDUNDANT` also considers coverage by the union of several cubes
/// (tautology-based), which is exact but is full-blown logic minimization
/// in its own right; SCC is the cheap, well-known approximation and is
/// all `mv_reduce`'s literal-shrink needs.
pub fn mark_irredundant(f1: &mut Cover, d1: &Cover) {
    let n = f1.count();
    let mut redundant = vec![false; n];
    for i in 0..n {
        let p = f1.get(i).clone();
        if d1.iter().any(|q| p.setp_implies(q)) {
            redundant[i] = true;
            continue;
        }
        for j in 0..n {
            if i == j {
                continue;
            }
            let q = f1.get(j);
            if p.setp_implies(q) {
                // an exact duplicate keeps only its lowest-indexed copy
                if !q.setp_implies(&p) || j < i {
                    redundant[i] = true;
                    break;
                }
            }
        }
    }

    for (i, row) in f1.iter_mut().enumerate() {
        if redundant[i] {
            row.flags.reset(CubeFlags::ACTIVE);
        }
    }
    f1.sf_active();
}

/// `mv_reduce(F, D)` -- for each part of the output variable, cofactor `F`
/// and `D` against it, use `mark_irredundant` to find which cubes' presence
/// on that output part is redundant, and drop the part from those cubes.
/// Cubes left with no output part at all are removed from `F`.
pub fn mv_reduce(desc: &CubeDescriptor, f: &mut Cover, d: &Cover) {
    let out = desc.var(desc.output());

    for i in out.first_part..=out.last_part {
        let mut f1 = Cover::new();
        let mut source_row = Vec::new();
        for (fi, row) in f.iter().enumerate() {
            if row.is_in_set(i) {
                let mut p1 = row.clone();
                p1.set_diff(desc.output_mask());
                p1.set_insert(i);
                f1.push(p1);
                source_row.push(fi);
            }
        }

        let mut d1 = Cover::new();
        for row in d.iter() {
            if row.is_in_set(i) {
                let mut p1 = row.clone();
                p1.set_diff(desc.output_mask());
                p1.set_insert(i);
                d1.push(p1);
            }
        }

        mark_irredundant(&mut f1, &d1);

        for (idx, p1) in f1.iter().enumerate() {
            if !p1.flags.test(CubeFlags::ACTIVE) {
                let fi = source_row[idx];
                let row = f.get_mut(fi);
                row.set_remove(i);
                row.flags.reset(CubeFlags::PRIME);
            }
        }
    }

    f.retain(|row| !row.setp_disjoint(desc.output_mask()));
}

/// `make_sparse(F, D, R)` -- loop alternating `mv_reduce` and `expand`
/// (with the output partition frozen) until total cost stops decreasing.
pub fn make_sparse(desc: &CubeDescriptor, config: &ExpandConfig, f: &mut Cover, d: &Cover, r: &mut Cover) -> Result<()> {
    let mut best_cost = cover_cost(desc, f);

    loop {
        mv_reduce(desc, f, d);
        let mut cost = cover_cost(desc, f);
        if cost.total == best_cost.total {
            break;
        }
        best_cost = cost;

        expand(desc, config, f, r, true)?;
        cost = cover_cost(desc, f);
        if cost.total == best_cost.total {
            break;
        }
        best_cost = cost;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::cube_from_pattern;

    /// S5: one output bit is redundantly asserted by a cube whose other
    /// output bit already covers the same on-set point in a wider cube;
    /// `make_sparse` drops the redundant bit, strictly shrinking cost.
    #[test]
    fn make_sparse_drops_a_redundant_output_bit() {
        let desc = CubeDescriptor::new(&[2, 2], 2);
        let config = ExpandConfig::default();

        let mut f = Cover::new();
        // wide cube asserting only output 0
        f.push(cube_from_pattern(&desc, &[Some(true), None], &[true, false]));
        // narrower cube, a subset of the wide one's input pattern, but
        // asserting BOTH outputs -- its output-1 bit is redundant since no
        // OFF-set cube blocks folding it into the wide cube's coverage.
        f.push(cube_from_pattern(&desc, &[Some(true), Some(false)], &[true, true]));

        let d = Cover::new();
        let mut r = Cover::new();
        r.push(cube_from_pattern(&desc, &[Some(false), None], &[true, true]));

        let before = cover_cost(&desc, &f);
        make_sparse(&desc, &config, &mut f, &d, &mut r).unwrap();
        let after = cover_cost(&desc, &f);

        assert!(after.total <= before.total);
        // the narrower cube must have dropped its redundant output-1 bit
        // (distinguished from the wide cube by var1 being restricted, not
        // don't-care: it has var1's first part but not its last).
        let narrower = f
            .iter()
            .find(|row| row.is_in_set(desc.var(1).first_part) && !row.is_in_set(desc.var(1).last_part))
            .expect("narrower cube survives");
        // output 0 (shared with the wide cube, hence redundant) is gone;
        // output 1 (unique to the narrower cube) survives.
        assert!(!narrower.is_in_set(desc.var(desc.output()).first_part));
        assert!(narrower.is_in_set(desc.var(desc.output()).first_part + 1));
        for row in f.iter() {
            assert!(!row.setp_disjoint(desc.output_mask()));
        }
    }

    #[test]
    fn mark_irredundant_flags_a_subsumed_duplicate() {
        let desc = CubeDescriptor::new(&[2], 1);
        let mut f1 = Cover::new();
        f1.push(cube_from_pattern(&desc, &[None], &[true])); // broad
        f1.push(cube_from_pattern(&desc, &[Some(true)], &[true])); // subset of the above
        let d1 = Cover::new();

        mark_irredundant(&mut f1, &d1);
        assert!(f1.get(0).flags.test(CubeFlags::ACTIVE));
        assert!(!f1.get(1).flags.test(CubeFlags::ACTIVE));
    }
}
