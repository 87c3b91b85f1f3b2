//! Error types for the expansion engine.
//!
//! Mirrors the manual `enum` + `Display` + `Error` idiom used throughout
//! this crate's ancestry rather than pulling in an error-derive dependency:
//! there is exactly one fatal condition in this engine (spec section 7), so
//! a single small enum is all that's warranted.

use std::fmt;

/// The one fatal condition `expand`/`make_sparse` can hit: the caller handed
/// in an ON-set and OFF-set that are not orthogonal (they overlap).
///
/// In the original C sources this calls `fatal()`, which prints a message
/// and terminates the whole process -- appropriate for a batch minimizer,
/// not for a library. Here it surfaces as an ordinary `Err`: the expansion
/// aborts immediately (no further work is attempted, matching the spec's
/// "no attempt is made to recover" contract) and control returns to the
/// caller instead of the process exiting out from under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandError {
    /// An ON-set cube and an OFF-set cube were found to intersect while
    /// raising literals -- the problem as given is not a valid
    /// incompletely-specified Boolean function.
    NotOrthogonal,
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandError::NotOrthogonal => {
                write!(f, "ON-set and OFF-set are not orthogonal")
            }
        }
    }
}

impl std::error::Error for ExpandError {}

pub type Result<T> = std::result::Result<T, ExpandError>;
