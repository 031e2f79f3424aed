//! In-process configuration knobs for a scan.
//!
//! There is no wire format or file format here — a `ScanConfig` is built by
//! the caller and passed (or defaulted) per scan, the same way the teacher
//! crate leaves hasher seeding and table capacity policy to its caller.

/// Tunables for a single call into [`crate::enumerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Whether the DFS coordinate sweep runs over a lattice-reduced basis
    /// (`true`, the default) or the tableau's original identity basis
    /// (`false`). The source's `isl_basic_set_scan` always reduced (behind a
    /// vestigial `if (1)`); this crate keeps reduction as the default and
    /// requires explicit opt-out rather than guessing at a cheaper mode.
    pub reduce_basis: bool,

    /// Extra rows of constraint capacity to reserve on top of the `d + 1`
    /// the sweep is guaranteed to add, in case a caller's `Tableau` impl adds
    /// its own bookkeeping equalities during the scan.
    pub constraint_capacity_slack: usize,
}

impl Default for ScanConfig {
    #[inline]
    fn default() -> Self {
        Self {
            reduce_basis: true,
            constraint_capacity_slack: 0,
        }
    }
}

impl ScanConfig {
    /// Construct the config the source always used: reduction on, no extra
    /// slack beyond `d + 1`.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opt out of basis reduction. This is an explicit, non-default choice;
    /// see the type's documentation for why the sweep still terminates
    /// correctly (just less efficiently) without it.
    #[inline]
    #[must_use]
    pub fn without_basis_reduction(mut self) -> Self {
        self.reduce_basis = false;
        self
    }

    /// Reserve `slack` extra constraint rows beyond the `d + 1` the sweep
    /// itself needs.
    #[inline]
    #[must_use]
    pub fn with_constraint_capacity_slack(mut self, slack: usize) -> Self {
        self.constraint_capacity_slack = slack;
        self
    }
}
