//! The narrow interface the enumerator drives the simplex tableau and
//! lattice basis reduction through.
//!
//! The pivot engine and the reduction algorithm themselves are out of
//! scope for this crate (see the crate-level docs); this module only
//! specifies the shape the enumerator needs them to have.

use num_bigint::BigInt;
use num_rational::BigRational;

use crate::error::Error;

/// Outcome of minimizing a linear objective over a tableau.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LpOutcome {
    /// The objective attains a finite minimum, returned as an exact
    /// rational (the source's `{value, result}` pair collapsed into one
    /// variant since the numerator/denominator only matter when optimal).
    Optimal(BigRational),
    /// The feasible region is empty.
    Empty,
    /// The objective is unbounded below on the feasible region. The
    /// enumerator turns this into [`Error::Unbounded`] — a bounded caller
    /// input should never produce it.
    Unbounded,
}

/// A row of the `(1 + d) x (1 + d)` basis matrix: column 0 is the additive
/// constant used when the row is submitted as an equality, columns
/// `1..=d` are the variable coefficients.
pub type BasisRow = Vec<BigInt>;

/// A unimodular `(1 + d) x (1 + d)` integer matrix. Row `1 + i` is the
/// `i`-th basis direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisMatrix {
    rows: Vec<BasisRow>,
}

impl BasisMatrix {
    /// The `(1 + d) x (1 + d)` identity matrix, the tableau's starting
    /// basis before reduction.
    #[must_use]
    pub fn identity(dim: usize) -> Self {
        let size = dim + 1;
        let mut rows = vec![vec![BigInt::from(0); size]; size];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = BigInt::from(1);
        }
        Self { rows }
    }

    #[must_use]
    pub fn from_rows(rows: Vec<BasisRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    #[must_use]
    pub fn row(&self, i: usize) -> &BasisRow {
        &self.rows[i]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut BasisRow {
        &mut self.rows[i]
    }
}

/// External collaborator that computes a unimodular basis in which a
/// tableau's feasible region has short extent along every axis.
///
/// Kept distinct from [`Tableau`] so a caller can swap reduction strategies
/// (or ship a tableau that reduces its basis some other way) without
/// touching the tableau's own state machine. [`Tableau::compute_reduced_basis`]
/// delegates to a `Self::Reducer` by default; a tableau implementation is
/// free to override that method directly instead if it can reduce its own
/// basis more cheaply than constructing a reducer per call.
pub trait BasisReducer<T: Tableau> {
    /// Compute a reduced basis for `tableau`'s feasible region and return
    /// the tableau with it installed.
    fn reduce(&self, tableau: T) -> Result<T, Error>;
}

/// Simplex tableau state the enumerator drives through a DFS.
///
/// Implementations are expected to be exact (rational arithmetic,
/// arbitrary-precision coefficients) since the enumerator's correctness
/// depends on exact feasibility decisions, not floating-point
/// approximations.
pub trait Tableau: Sized {
    /// Opaque restore point produced by [`Tableau::snapshot`]. Valid to
    /// [`Tableau::rollback`] to exactly once per parent subtree; the
    /// enumerator never reuses a token after rolling back past it.
    type Snapshot;

    /// The basis-reduction strategy [`Tableau::compute_reduced_basis`]
    /// delegates to by default.
    type Reducer: BasisReducer<Self> + Default;

    /// Total dimension (number of non-homogeneous variables) this tableau
    /// was built over.
    fn dim(&self) -> usize;

    /// Reserve capacity for at least `additional` more constraint rows.
    fn extend_constraint_capacity(&mut self, additional: usize) -> Result<(), Error>;

    /// Replace the tableau's basis with `basis`.
    fn set_basis(&mut self, basis: BasisMatrix);

    /// The tableau's current basis, if one has been set.
    fn basis(&self) -> Option<&BasisMatrix>;

    /// Compute a reduced basis for this tableau's feasible region and
    /// return a tableau with it installed. The reduction algorithm itself
    /// is an external collaborator (see [`BasisReducer`]); this default
    /// just hands the tableau to one.
    fn compute_reduced_basis(self) -> Result<Self, Error> {
        Self::Reducer::default().reduce(self)
    }

    /// Minimize `objective` (a row of `dim` coefficients, no leading
    /// constant) over the feasible region, dividing the result by `denom`.
    fn min(&mut self, objective: &[BigInt], denom: &BigInt) -> Result<LpOutcome, Error>;

    /// Add `row` (a basis row with its constant column set) to the tableau
    /// as a valid equality constraint, assuming the caller has already
    /// established it holds on the feasible region.
    fn add_valid_equality(&mut self, row: &BasisRow) -> Result<(), Error>;

    /// Take an opaque snapshot of the tableau's current state.
    fn snapshot(&mut self) -> Self::Snapshot;

    /// Restore the tableau to a previously taken snapshot.
    fn rollback(&mut self, snapshot: Self::Snapshot) -> Result<(), Error>;

    /// Extract a sample integer point (in homogeneous coordinates) from the
    /// tableau's current vertex.
    fn sample_value(&self) -> Result<Vec<BigInt>, Error>;
}
