//! A minimal, exact reference `Tableau`/`BasicSet` pair used only by the
//! integration tests in this directory. It implements the LP primitive
//! with Fourier-Motzkin elimination over `BigRational` rather than an
//! incremental simplex method: slower, but straightforward enough to trust
//! as an oracle for the enumerator's own DFS.
//!
//! Basis reduction is the identity here (see [`IdentityReducer`]), which
//! keeps `sample_value`'s coordinate solve trivial, since every basis row
//! stays a unit vector for the lifetime of a scan.

#![allow(dead_code)]

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use polyscan::basic_set::{BasicSet, PolyhedralSet};
use polyscan::error::Error;
use polyscan::tableau::{BasisMatrix, BasisReducer, BasisRow, LpOutcome, Tableau};

/// Installs no reduction at all — a legal (if inefficient) instance of
/// [`BasisReducer`]. Keeps `RefTableau::sample_value`'s coordinate solve
/// trivial, since every basis row stays a unit vector for the lifetime of
/// a scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityReducer;

impl BasisReducer<RefTableau> for IdentityReducer {
    fn reduce(&self, tableau: RefTableau) -> Result<RefTableau, Error> {
        Ok(tableau)
    }
}

/// `coeffs . x + constant >= 0` (inequality) or `== 0` (equality).
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    pub coeffs: Vec<BigInt>,
    pub constant: BigInt,
}

impl LinearConstraint {
    pub fn new(coeffs: &[i64], constant: i64) -> Self {
        Self {
            coeffs: coeffs.iter().copied().map(BigInt::from).collect(),
            constant: BigInt::from(constant),
        }
    }
}

/// A hand-built basic set: a fixed dimension, a list of inequalities, and
/// a list of equalities, all over integer coefficients.
#[derive(Debug, Clone)]
pub struct RefBasicSet {
    pub dim: usize,
    pub inequalities: Vec<LinearConstraint>,
    pub equalities: Vec<LinearConstraint>,
}

impl RefBasicSet {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            inequalities: Vec::new(),
            equalities: Vec::new(),
        }
    }

    pub fn with_inequality(mut self, c: LinearConstraint) -> Self {
        self.inequalities.push(c);
        self
    }

    pub fn with_equality(mut self, c: LinearConstraint) -> Self {
        self.equalities.push(c);
        self
    }
}

impl BasicSet for RefBasicSet {
    type Tableau = RefTableau;

    fn total_dim(&self) -> usize {
        self.dim
    }

    fn into_tableau(self) -> Result<Self::Tableau, Error> {
        Ok(RefTableau {
            dim: self.dim,
            base_inequalities: self.inequalities,
            base_equalities: self.equalities,
            added_equalities: Vec::new(),
            basis: None,
        })
    }
}

/// A disjoint union of [`RefBasicSet`]s, already normalized by construction.
#[derive(Debug, Clone)]
pub struct RefPolyhedralSet {
    pieces: Vec<RefBasicSet>,
}

impl RefPolyhedralSet {
    pub fn new(pieces: Vec<RefBasicSet>) -> Self {
        Self { pieces }
    }
}

impl PolyhedralSet for RefPolyhedralSet {
    type BasicSet = RefBasicSet;

    fn normalize(self) -> Result<Self, Error> {
        Ok(self)
    }

    fn into_basic_sets(self) -> Vec<Self::BasicSet> {
        self.pieces
    }
}

/// Row layout during elimination: `[constant, x_0, .., x_{dim-1}, z]`.
#[derive(Debug, Clone)]
pub struct RefTableau {
    dim: usize,
    base_inequalities: Vec<LinearConstraint>,
    base_equalities: Vec<LinearConstraint>,
    added_equalities: Vec<BasisRow>,
    basis: Option<BasisMatrix>,
}

fn to_rational(v: &BigInt) -> BigRational {
    BigRational::from_integer(v.clone())
}

impl RefTableau {
    fn z_index(&self) -> usize {
        self.dim + 1
    }

    fn row_len(&self) -> usize {
        self.dim + 2
    }

    fn constraint_row(&self, c: &LinearConstraint) -> Vec<BigRational> {
        let mut row = vec![BigRational::zero(); self.row_len()];
        row[0] = to_rational(&c.constant);
        for (i, coeff) in c.coeffs.iter().enumerate() {
            row[1 + i] = to_rational(coeff);
        }
        row
    }

    fn added_equality_row(&self, r: &BasisRow) -> Vec<BigRational> {
        let mut row = vec![BigRational::zero(); self.row_len()];
        row[0] = to_rational(&r[0]);
        for i in 0..self.dim {
            row[1 + i] = to_rational(&r[1 + i]);
        }
        row
    }

    /// Minimize `(objective . x) / denom` over the feasible region by
    /// eliminating every `x` coordinate in turn with Fourier-Motzkin,
    /// leaving only bounds on an auxiliary `z := objective . x` column.
    fn minimize(&self, objective: &[BigInt], denom: &BigInt) -> Result<LpOutcome, Error> {
        let mut rows: Vec<Vec<BigRational>> = Vec::new();

        for c in &self.base_inequalities {
            rows.push(self.constraint_row(c));
        }
        for c in &self.base_equalities {
            let pos = self.constraint_row(c);
            let neg: Vec<BigRational> = pos.iter().map(|v| -v).collect();
            rows.push(pos);
            rows.push(neg);
        }
        for r in &self.added_equalities {
            let pos = self.added_equality_row(r);
            let neg: Vec<BigRational> = pos.iter().map(|v| -v).collect();
            rows.push(pos);
            rows.push(neg);
        }

        // z - objective . x = 0, both directions.
        let z = self.z_index();
        let mut zdef = vec![BigRational::zero(); self.row_len()];
        zdef[z] = BigRational::one();
        for (i, coeff) in objective.iter().enumerate() {
            zdef[1 + i] = -to_rational(coeff);
        }
        let zdef_neg: Vec<BigRational> = zdef.iter().map(|v| -v).collect();
        rows.push(zdef);
        rows.push(zdef_neg);

        for pos in 1..=self.dim {
            let mut zero = Vec::new();
            let mut lower = Vec::new();
            let mut upper = Vec::new();
            for row in rows {
                if row[pos].is_zero() {
                    zero.push(row);
                } else if row[pos].is_positive() {
                    lower.push(row);
                } else {
                    upper.push(row);
                }
            }
            let mut combined = zero;
            for l in &lower {
                for u in &upper {
                    let scale_l = -&u[pos];
                    let scale_u = l[pos].clone();
                    let row: Vec<BigRational> = l
                        .iter()
                        .zip(u.iter())
                        .map(|(a, b)| a * &scale_l + b * &scale_u)
                        .collect();
                    combined.push(row);
                }
            }
            rows = combined;
        }

        let mut max_lower: Option<BigRational> = None;
        let mut min_upper: Option<BigRational> = None;
        for row in &rows {
            let c0 = &row[0];
            let cz = &row[z];
            if cz.is_zero() {
                if c0.is_negative() {
                    return Ok(LpOutcome::Empty);
                }
                continue;
            }
            let bound = -c0 / cz;
            if cz.is_positive() {
                max_lower = Some(match max_lower {
                    Some(m) if m >= bound => m,
                    _ => bound,
                });
            } else {
                min_upper = Some(match min_upper {
                    Some(m) if m <= bound => m,
                    _ => bound,
                });
            }
        }

        if let (Some(lo), Some(hi)) = (&max_lower, &min_upper) {
            if lo > hi {
                return Ok(LpOutcome::Empty);
            }
        }

        match max_lower {
            None => Ok(LpOutcome::Unbounded),
            Some(lo) => Ok(LpOutcome::Optimal(lo / to_rational(denom))),
        }
    }
}

impl Tableau for RefTableau {
    type Snapshot = usize;
    type Reducer = IdentityReducer;

    fn dim(&self) -> usize {
        self.dim
    }

    fn extend_constraint_capacity(&mut self, _additional: usize) -> Result<(), Error> {
        Ok(())
    }

    fn set_basis(&mut self, basis: BasisMatrix) {
        self.basis = Some(basis);
    }

    fn basis(&self) -> Option<&BasisMatrix> {
        self.basis.as_ref()
    }

    fn min(&mut self, objective: &[BigInt], denom: &BigInt) -> Result<LpOutcome, Error> {
        self.minimize(objective, denom)
    }

    fn add_valid_equality(&mut self, row: &BasisRow) -> Result<(), Error> {
        self.added_equalities.push(row.clone());
        Ok(())
    }

    fn snapshot(&mut self) -> Self::Snapshot {
        self.added_equalities.len()
    }

    fn rollback(&mut self, snapshot: Self::Snapshot) -> Result<(), Error> {
        if snapshot > self.added_equalities.len() {
            return Err(Error::lp_internal("rollback snapshot beyond current state"));
        }
        self.added_equalities.truncate(snapshot);
        Ok(())
    }

    fn sample_value(&self) -> Result<Vec<BigInt>, Error> {
        if self.added_equalities.len() != self.dim {
            return Err(Error::lp_internal(
                "sample_value called before every coordinate was fixed",
            ));
        }

        let mut matrix: Vec<Vec<BigRational>> = self
            .added_equalities
            .iter()
            .map(|r| {
                let mut row = vec![BigRational::zero(); self.dim + 1];
                row[self.dim] = -to_rational(&r[0]);
                for i in 0..self.dim {
                    row[i] = to_rational(&r[1 + i]);
                }
                row
            })
            .collect();

        for col in 0..self.dim {
            let pivot_row = matrix[col..]
                .iter()
                .position(|r| !r[col].is_zero())
                .map(|p| p + col)
                .ok_or_else(|| Error::lp_internal("singular coordinate-fixing system"))?;
            matrix.swap(col, pivot_row);

            let pivot = matrix[col][col].clone();
            for v in &mut matrix[col] {
                *v /= &pivot;
            }
            for row in 0..matrix.len() {
                if row == col {
                    continue;
                }
                let factor = matrix[row][col].clone();
                if factor.is_zero() {
                    continue;
                }
                for k in 0..=self.dim {
                    let sub = matrix[col][k].clone() * &factor;
                    matrix[row][k] -= sub;
                }
            }
        }

        let mut sample = Vec::with_capacity(self.dim + 1);
        sample.push(BigInt::one());
        for row in &matrix {
            let value = &row[self.dim];
            if !value.is_integer() {
                return Err(Error::lp_internal("non-integer coordinate at sample point"));
            }
            sample.push(value.to_integer());
        }
        Ok(sample)
    }
}
