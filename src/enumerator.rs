//! The depth-first coordinate sweep over a reduced basis, with tableau
//! rollback between sibling branches. This is the centerpiece of the crate;
//! see the module-level docs in `lib.rs` for the shape of the algorithm.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::basic_set::{BasicSet, PolyhedralSet};
use crate::callback::{Callback, Counter};
use crate::config::ScanConfig;
use crate::error::Error;
use crate::tableau::{BasisMatrix, LpOutcome, Tableau};

fn expect_integer(value: BigRational) -> Result<BigInt, Error> {
    if value.is_integer() {
        Ok(value.to_integer())
    } else {
        Err(Error::lp_internal(
            "tableau reported a non-integer vertex for an integer basic set",
        ))
    }
}

fn negate_row_vars(basis: &mut BasisMatrix, row: usize) {
    let r = basis.row_mut(row);
    for j in 1..r.len() {
        r[j] = -r[j].clone();
    }
}

/// Visit every integer point of `bset`, calling `callback` on each (or on
/// each penultimate range, if `callback` opts into the counting shortcut).
///
/// Consumes `bset`. Uses [`ScanConfig::default`]; see
/// [`scan_basic_set_with_config`] to override it.
pub fn scan_basic_set<B: BasicSet>(bset: B, callback: &mut dyn Callback) -> Result<(), Error> {
    scan_basic_set_with_config(bset, callback, ScanConfig::default())
}

/// As [`scan_basic_set`], with an explicit [`ScanConfig`].
pub fn scan_basic_set_with_config<B: BasicSet>(
    bset: B,
    callback: &mut dyn Callback,
    config: ScanConfig,
) -> Result<(), Error> {
    drive_basic_set(bset, callback, config).map(|_stopped| ())
}

/// Normalize `set` into a disjoint union of basic sets and scan each in
/// turn, so every integer point is visited exactly once. Consumes `set`.
pub fn scan_set<S: PolyhedralSet>(set: S, callback: &mut dyn Callback) -> Result<(), Error> {
    scan_set_with_config(set, callback, ScanConfig::default())
}

/// As [`scan_set`], with an explicit [`ScanConfig`] applied to every piece.
pub fn scan_set_with_config<S: PolyhedralSet>(
    set: S,
    callback: &mut dyn Callback,
    config: ScanConfig,
) -> Result<(), Error> {
    let span = tracing::debug_span!("scan_set");
    let _guard = span.enter();

    let set = set.normalize()?;
    for bset in set.into_basic_sets() {
        let stopped = drive_basic_set(bset, callback, config)?;
        if stopped {
            tracing::debug!("set scan aborted by callback");
            break;
        }
    }
    Ok(())
}

/// Count the integer points of `bset`, stopping early once `cap` is
/// reached (`cap == 0` means unlimited). Borrows `bset`.
pub fn count_basic_set_upto<B: BasicSet + Clone>(bset: &B, cap: BigInt) -> Result<BigInt, Error> {
    let dim = bset.total_dim();
    let span = tracing::debug_span!("count_basic_set_upto", dim);
    let _guard = span.enter();

    let mut counter = Counter::with_cap(cap.clone());
    let result = match scan_basic_set(bset.clone(), &mut counter) {
        Ok(()) => Ok(counter.count()),
        Err(err) => {
            if !cap.is_zero() && counter.count() >= cap {
                Ok(counter.count())
            } else {
                Err(err)
            }
        }
    };

    match &result {
        Ok(count) => tracing::debug!(%count, "count_basic_set_upto completed"),
        Err(err) => tracing::debug!(%err, "count_basic_set_upto failed"),
    }
    result
}

/// Count the integer points of `set`, stopping early once `cap` is reached
/// (`cap == 0` means unlimited). Borrows `set`.
pub fn count_set_upto<S>(set: &S, cap: BigInt) -> Result<BigInt, Error>
where
    S: PolyhedralSet + Clone,
{
    let span = tracing::debug_span!("count_set_upto");
    let _guard = span.enter();

    let mut counter = Counter::with_cap(cap.clone());
    let result = match scan_set(set.clone(), &mut counter) {
        Ok(()) => Ok(counter.count()),
        Err(err) => {
            if !cap.is_zero() && counter.count() >= cap {
                Ok(counter.count())
            } else {
                Err(err)
            }
        }
    };

    match &result {
        Ok(count) => tracing::debug!(%count, "count_set_upto completed"),
        Err(err) => tracing::debug!(%err, "count_set_upto failed"),
    }
    result
}

/// Count every integer point of `set`, with no cap. The sentinel for
/// "unlimited" is `cap == 0`, documented here rather than left implicit as
/// the source's use of `ctx->zero` was.
pub fn count_set<S>(set: &S) -> Result<BigInt, Error>
where
    S: PolyhedralSet + Clone,
{
    let span = tracing::debug_span!("count_set");
    let _guard = span.enter();
    count_set_upto(set, BigInt::zero())
}

/// Drives one basic set's DFS. Returns `Ok(true)` if the callback signaled
/// `Stop` before the scan completed, `Ok(false)` if every point (or range)
/// was visited, and `Err` on a genuine downstream fault.
fn drive_basic_set<B: BasicSet>(
    bset: B,
    callback: &mut dyn Callback,
    config: ScanConfig,
) -> Result<bool, Error> {
    let dim = bset.total_dim();
    let span = tracing::debug_span!("scan_basic_set", dim);
    let _guard = span.enter();

    if dim == 0 {
        tracing::debug!("zero-dimensional basic set, emitting the unit sample");
        drop(bset);
        let signal = callback.add(vec![BigInt::one()]);
        return Ok(signal.is_stop());
    }

    let mut tab = bset.into_tableau()?;
    let slack = dim + 1 + config.constraint_capacity_slack;
    tab.extend_constraint_capacity(slack)?;
    tab.set_basis(BasisMatrix::identity(dim));

    if config.reduce_basis {
        tab = tab.compute_reduced_basis()?;
    } else {
        tracing::warn!("basis reduction disabled for this scan; sweep may be inefficient");
    }

    let mut basis = tab
        .basis()
        .cloned()
        .ok_or_else(|| Error::lp_internal("tableau has no basis after setup"))?;

    let denom = BigInt::one();
    let mut min = vec![BigInt::zero(); dim];
    let mut max = vec![BigInt::zero(); dim];
    let mut snap: Vec<Option<<B::Tableau as Tableau>::Snapshot>> =
        (0..dim).map(|_| None).collect();

    let mut level: isize = 0;
    let mut init = true;
    let last = dim - 1;

    while level >= 0 {
        let lvl = level as usize;
        let mut empty = false;

        if init {
            match tab.min(&basis.row(1 + lvl)[1..], &denom)? {
                LpOutcome::Empty => empty = true,
                LpOutcome::Unbounded => return Err(Error::Unbounded),
                LpOutcome::Optimal(value) => {
                    min[lvl] = expect_integer(value)?;
                }
            }

            if !empty {
                negate_row_vars(&mut basis, 1 + lvl);
                let neg_max = match tab.min(&basis.row(1 + lvl)[1..], &denom)? {
                    LpOutcome::Empty => {
                        empty = true;
                        None
                    }
                    LpOutcome::Unbounded => return Err(Error::Unbounded),
                    LpOutcome::Optimal(value) => Some(expect_integer(value)?),
                };
                negate_row_vars(&mut basis, 1 + lvl);
                if let Some(neg_max) = neg_max {
                    max[lvl] = -neg_max;
                }
            }

            snap[lvl] = Some(tab.snapshot());
        } else {
            min[lvl] += 1;
        }

        if empty || min[lvl] > max[lvl] {
            level -= 1;
            init = false;
            if level >= 0 {
                let token = snap[level as usize]
                    .take()
                    .ok_or_else(|| Error::lp_internal("missing snapshot on backtrack"))?;
                tab.rollback(token)?;
            }
            continue;
        }

        if lvl == last {
            if let Some(signal) = callback.scan_range(&min[lvl], &max[lvl]) {
                if signal.is_stop() {
                    tracing::debug!("scan stopped by range callback");
                    return Ok(true);
                }
                level -= 1;
                init = false;
                if level >= 0 {
                    let token = snap[level as usize]
                        .take()
                        .ok_or_else(|| Error::lp_internal("missing snapshot on backtrack"))?;
                    tab.rollback(token)?;
                }
                continue;
            }
        }

        {
            let neg_min = -min[lvl].clone();
            basis.row_mut(1 + lvl)[0] = neg_min;
            tab.add_valid_equality(basis.row(1 + lvl))?;
            basis.row_mut(1 + lvl)[0] = BigInt::zero();
        }

        if lvl < last {
            level += 1;
            init = true;
            continue;
        }

        let sample = tab.sample_value()?;
        let signal = callback.add(sample);
        if signal.is_stop() {
            tracing::debug!("scan stopped by point callback");
            return Ok(true);
        }
        init = false;
        let token = snap[lvl]
            .take()
            .ok_or_else(|| Error::lp_internal("missing snapshot at leaf"))?;
        tab.rollback(token)?;
    }

    tracing::debug!("scan completed");
    Ok(false)
}
