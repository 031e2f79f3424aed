//! Traits the enumerator consumes for a single conjunction of linear
//! constraints (a "basic set") and for a finite union of them (a "set").
//!
//! Constructing basic sets from source syntax, projecting or coalescing
//! them, and decomposing a set into a disjoint union are all out of scope
//! here — this module only specifies the narrow surface the enumerator
//! needs from whatever external polyhedral algebra library a caller brings.

use crate::error::Error;
use crate::tableau::Tableau;

/// A conjunction of linear (in)equalities over integer-valued variables,
/// read-only to the enumerator.
pub trait BasicSet {
    /// The tableau type this basic set builds.
    type Tableau: Tableau;

    /// Total number of (non-homogeneous) dimensions.
    fn total_dim(&self) -> usize;

    /// Build a tableau encoding this basic set's constraints.
    fn into_tableau(self) -> Result<Self::Tableau, Error>;
}

/// A finite union of basic sets. The enumerator canonicalizes a `PolyhedralSet`
/// before scanning it: splits it into a pairwise-disjoint union and
/// materializes any existentially quantified divisors, both of which are
/// external operations this trait only names.
pub trait PolyhedralSet {
    type BasicSet: BasicSet;

    /// Split this set into a pairwise-disjoint union of basic sets and
    /// materialize existentially quantified divisors in each piece. Must
    /// be idempotent: normalizing an already-disjoint, divisor-free set is
    /// a no-op.
    fn normalize(self) -> Result<Self, Error>
    where
        Self: Sized;

    /// Consume the (already normalized) set into its disjoint basic-set
    /// pieces, in the order they should be scanned.
    fn into_basic_sets(self) -> Vec<Self::BasicSet>;
}
