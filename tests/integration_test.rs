//! End-to-end tests for the public `expand`/`make_sparse` API, driven
//! entirely through in-memory covers (no PLA file I/O in this crate).

use espresso_expand::{
    config::ExpandConfig,
    cover::{cover_cost, cube_from_pattern, Cover},
    cube::CubeFlags,
    descriptor::CubeDescriptor,
    error::ExpandError,
    expand::expand,
    sparse::make_sparse,
};

/// XOR: both ON-set cubes are already prime implicants, so a full `expand`
/// pass leaves the cover untouched.
#[test]
fn xor_cover_is_already_fully_expanded() {
    let desc = CubeDescriptor::new(&[2, 2], 1);
    let config = ExpandConfig::default();

    let mut f = Cover::new();
    f.push(cube_from_pattern(&desc, &[Some(true), Some(false)], &[true]));
    f.push(cube_from_pattern(&desc, &[Some(false), Some(true)], &[true]));

    let mut r = Cover::new();
    r.push(cube_from_pattern(&desc, &[Some(true), Some(true)], &[true]));
    r.push(cube_from_pattern(&desc, &[Some(false), Some(false)], &[true]));

    expand(&desc, &config, &mut f, &mut r, false).unwrap();

    assert_eq!(f.count(), 2);
    for c in f.iter() {
        assert!(c.flags.test(CubeFlags::PRIME));
        assert_eq!(c.literal_count(&desc), 2);
    }
}

/// Three ON-set points around a single OFF-set corner consensus-expand down
/// to two prime implicants, one absorbing a third point along the way.
#[test]
fn consensus_expansion_shrinks_three_points_to_two_primes() {
    let desc = CubeDescriptor::new(&[2, 2], 1);
    let config = ExpandConfig::default();

    let mut f = Cover::new();
    f.push(cube_from_pattern(&desc, &[Some(false), Some(false)], &[true]));
    f.push(cube_from_pattern(&desc, &[Some(false), Some(true)], &[true]));
    f.push(cube_from_pattern(&desc, &[Some(true), Some(false)], &[true]));

    let mut r = Cover::new();
    r.push(cube_from_pattern(&desc, &[Some(true), Some(true)], &[true]));

    expand(&desc, &config, &mut f, &mut r, false).unwrap();

    assert_eq!(f.count(), 2);
    // one prime is var0=0 with var1 freed, the other var1=0 with var0 freed.
    let has_var0_free = f
        .iter()
        .any(|c| c.is_fully_free(&desc, 0) && !c.is_fully_free(&desc, 1));
    let has_var1_free = f
        .iter()
        .any(|c| c.is_fully_free(&desc, 1) && !c.is_fully_free(&desc, 0));
    assert!(has_var0_free);
    assert!(has_var1_free);
    for c in f.iter() {
        assert!(c.flags.test(CubeFlags::PRIME));
    }
}

/// A cube that already spans the whole Boolean space collides with any
/// OFF-set point; `expand` surfaces this as an error rather than silently
/// producing an invalid cover.
#[test]
fn overlapping_on_and_off_sets_are_rejected() {
    let desc = CubeDescriptor::new(&[2, 2], 1);
    let config = ExpandConfig::default();

    let mut f = Cover::new();
    f.push(cube_from_pattern(&desc, &[None, None], &[true]));

    let mut r = Cover::new();
    r.push(cube_from_pattern(&desc, &[Some(false), Some(false)], &[true]));

    let err = expand(&desc, &config, &mut f, &mut r, false).unwrap_err();
    assert_eq!(err, ExpandError::NotOrthogonal);
}

/// A cube asserting a redundant second output bit loses that bit once run
/// through `make_sparse`, without losing ON-set coverage or orthogonality.
#[test]
fn make_sparse_strictly_reduces_cost_on_a_redundant_output() {
    let desc = CubeDescriptor::new(&[2, 2], 2);
    let config = ExpandConfig::default();

    let mut f = Cover::new();
    f.push(cube_from_pattern(&desc, &[Some(true), None], &[true, false]));
    f.push(cube_from_pattern(&desc, &[Some(true), Some(false)], &[true, true]));

    let d = Cover::new();
    let mut r = Cover::new();
    r.push(cube_from_pattern(&desc, &[Some(false), None], &[true, true]));

    let before = cover_cost(&desc, &f);
    make_sparse(&desc, &config, &mut f, &d, &mut r).unwrap();
    let after = cover_cost(&desc, &f);

    assert!(after.total < before.total);
    for row in f.iter() {
        assert!(!row.setp_disjoint(desc.output_mask()));
    }
}

/// A second `expand` pass over an already-expanded cover changes nothing:
/// every cube is already prime, so there is nothing left to absorb or grow.
#[test]
fn expand_is_idempotent() {
    let desc = CubeDescriptor::new(&[2, 2], 1);
    let config = ExpandConfig::default();

    let mut f = Cover::new();
    f.push(cube_from_pattern(&desc, &[Some(false), Some(false)], &[true]));
    f.push(cube_from_pattern(&desc, &[Some(false), Some(true)], &[true]));
    f.push(cube_from_pattern(&desc, &[Some(true), Some(false)], &[true]));

    let mut r = Cover::new();
    r.push(cube_from_pattern(&desc, &[Some(true), Some(true)], &[true]));

    expand(&desc, &config, &mut f, &mut r, false).unwrap();
    let once = f.clone();

    let mut r2 = Cover::new();
    r2.push(cube_from_pattern(&desc, &[Some(true), Some(true)], &[true]));
    expand(&desc, &config, &mut f, &mut r2, false).unwrap();

    assert_eq!(f.count(), once.count());
    for (a, b) in f.iter().zip(once.iter()) {
        assert!(a.setp_equal(b));
    }
}
