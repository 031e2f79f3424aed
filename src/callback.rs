//! The enumerator's sink: a small trait the caller implements to receive
//! samples, plus the counting specializations built on top of it.

use num_bigint::BigInt;
use num_traits::Zero;

/// What the enumerator should do after a callback has been invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Keep scanning.
    Continue,
    /// Abort the current basic set's scan (and, transitively, the
    /// enclosing set-level scan).
    Stop,
}

impl Signal {
    #[inline]
    #[must_use]
    pub fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Receives every integer sample point the enumerator visits.
///
/// Implement [`Callback::scan_range`] to opt into the last-dimension
/// counting shortcut (see `crate::enumerator`): the default implementation
/// reports the shortcut unsupported, so the enumerator falls back to
/// visiting the range one point at a time through [`Callback::add`]. This
/// is a static trait dispatch, not a runtime identity check on the
/// callback, unlike the source's function-pointer comparison.
pub trait Callback {
    /// Receive one integer sample, in homogeneous coordinates (leading 1).
    fn add(&mut self, sample: Vec<BigInt>) -> Signal;

    /// Handle an entire range `[min, max]` of the innermost coordinate at
    /// once, without materializing each point. Return `None` to decline
    /// the shortcut (the enumerator then emits the range through
    /// repeated `add` calls as usual); return `Some(signal)` to accept it.
    #[inline]
    fn scan_range(&mut self, _min: &BigInt, _max: &BigInt) -> Option<Signal> {
        None
    }
}

/// Tallies visited points without materializing them, up to an optional
/// cap.
///
/// `cap == 0` means unlimited, matching the source's use of the context's
/// zero constant as the "no cap" sentinel (see [`crate::enumerator::count_set`]).
#[derive(Debug, Clone)]
pub struct Counter {
    count: BigInt,
    cap: BigInt,
}

impl Counter {
    /// A counter with no upper bound.
    #[inline]
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            count: BigInt::zero(),
            cap: BigInt::zero(),
        }
    }

    /// A counter that stops once `cap` points have been tallied. `cap ==
    /// 0` is equivalent to [`Counter::unbounded`].
    #[inline]
    #[must_use]
    pub fn with_cap(cap: BigInt) -> Self {
        Self {
            count: BigInt::zero(),
            cap,
        }
    }

    /// The current tally.
    #[inline]
    #[must_use]
    pub fn count(&self) -> BigInt {
        self.count.clone()
    }

    fn cap_reached(&self) -> bool {
        !self.cap.is_zero() && self.count >= self.cap
    }
}

impl Callback for Counter {
    fn add(&mut self, sample: Vec<BigInt>) -> Signal {
        drop(sample);
        self.count += 1;
        if self.cap_reached() {
            Signal::Stop
        } else {
            Signal::Continue
        }
    }

    fn scan_range(&mut self, min: &BigInt, max: &BigInt) -> Option<Signal> {
        self.count += max - min + 1;
        if self.cap_reached() {
            self.count = self.cap.clone();
            Some(Signal::Stop)
        } else {
            Some(Signal::Continue)
        }
    }
}
