//! # espresso-expand
//!
//! The EXPAND phase of an Espresso-II style two-level Boolean logic
//! minimizer: given a cover of an incompletely specified Boolean function,
//! grow every cube of the ON-set into a *prime implicant* -- a cube that
//! cannot be enlarged without intersecting the OFF-set -- while
//! opportunistically absorbing other ON-set cubes along the way.
//!
//! ## Overview
//!
//! A Boolean function is represented as a [`cover::Cover`] of cubes under a
//! shared [`descriptor::CubeDescriptor`], which describes how bits ("parts")
//! are grouped into variables. Multi-output functions are represented the
//! way upstream Espresso does it: one extra multiple-valued variable, one
//! part per output, with [`cover::cube_from_pattern`] as the friendly way to
//! build a cube from per-variable `Option<bool>` values plus a bit per
//! output.
//!
//! [`expand::expand`] is the main entry point: it sorts the ON-set, and for
//! each cube not already known prime or covered, calls [`expand::expand1`]
//! to grow it. [`sparse::make_sparse`] is a follow-on cleanup pass that
//! alternates [`sparse::mv_reduce`] (shrink the output variable) with
//! another `expand` pass (re-widen the input variables), squeezing out
//! literals that the first `expand` pass left on the table.
//!
//! ```
//! use espresso_expand::{cover::{cube_from_pattern, Cover}, descriptor::CubeDescriptor, expand::expand, config::ExpandConfig};
//!
//! // f(a, b) = a XOR b
//! let desc = CubeDescriptor::new(&[2, 2], 1);
//! let config = ExpandConfig::default();
//!
//! let mut f = Cover::new();
//! f.push(cube_from_pattern(&desc, &[Some(true), Some(false)], &[true])); // 10 -> 1
//! f.push(cube_from_pattern(&desc, &[Some(false), Some(true)], &[true])); // 01 -> 1
//!
//! let mut r = Cover::new();
//! r.push(cube_from_pattern(&desc, &[Some(true), Some(true)], &[true])); // 11 -> 0
//! r.push(cube_from_pattern(&desc, &[Some(false), Some(false)], &[true])); // 00 -> 0
//!
//! expand(&desc, &config, &mut f, &mut r, false).unwrap();
//! assert_eq!(f.count(), 2); // both inputs of an XOR are already prime
//! ```
//!
//! ## Non-goals
//!
//! This crate implements the EXPAND phase and its `make_sparse` companion
//! only. It does not read or write PLA files, does not implement the
//! REDUCE/IRREDUNDANT/ESSENTIAL phases of full two-level minimization, and
//! does not provide a command-line driver -- callers construct covers
//! directly and call [`expand::expand`] / [`sparse::make_sparse`].

pub mod config;
pub mod cover;
pub mod cube;
pub mod descriptor;
pub mod error;
pub mod expand;
pub mod sparse;

pub use config::ExpandConfig;
pub use cover::{cover_cost, cube_from_pattern, Cost, Cover};
pub use cube::{cdist0, cdist01, force_lower, CubeFlags, RawCube};
pub use descriptor::{CubeDescriptor, Variable};
pub use error::{ExpandError, Result};
pub use expand::expand;
pub use sparse::{make_sparse, mark_irredundant, mv_reduce};
