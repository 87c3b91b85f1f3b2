//! Tunable knobs for the expansion engine.
//!
//! Mirrors the teacher's `EspressoConfig`: a plain struct of `bool`/numeric
//! fields with a `Default` impl, printed with `eprintln!` rather than a
//! logging crate (this engine's whole ancestry has no `log`/`tracing`
//! dependency, so none is introduced here either).

/// Configuration for [`crate::expand::expand`] and [`crate::sparse::make_sparse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandConfig {
    /// `mincov`'s unravel budget: the maximum per-row or cumulative expansion
    /// size before falling back from the exact minimum-cover solver to the
    /// single-part heuristic (spec section 4.D).
    ///
    /// **Default:** `500`, matching the original source.
    pub unravel_budget: usize,

    /// Print a line to stderr every time `mincov` falls back to its
    /// heuristic mode because the unravel budget was exceeded.
    ///
    /// **Default:** `false`
    pub debug: bool,

    /// Print a line to stderr for every phase transition inside `expand1`
    /// (essential lowering, feasible covering, most-frequent climb, residual
    /// OFF-set resolution).
    ///
    /// **Default:** `false`
    pub trace: bool,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        ExpandConfig {
            unravel_budget: 500,
            debug: false,
            trace: false,
        }
    }
}

impl ExpandConfig {
    pub(crate) fn trace(&self, msg: impl std::fmt::Display) {
        if self.trace {
            eprintln!("espresso-expand: {msg}");
        }
    }

    pub(crate) fn debug(&self, msg: impl std::fmt::Display) {
        if self.debug {
            eprintln!("espresso-expand: {msg}");
        }
    }
}
