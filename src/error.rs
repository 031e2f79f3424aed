//! Error kinds surfaced by the enumerator and identifier registry.

use core::fmt;

/// Failure modes of the enumerator and identifier registry.
///
/// `scan_*` and `count_*` entry points return `Result<_, Error>`; a cap-limited
/// counting entry point that stops early because the cap was reached does
/// *not* surface an `Error` — only a genuine downstream failure does (see
/// `crate::enumerator`).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Out of memory while interning an identifier or growing a tableau.
    #[error("allocation failed")]
    Alloc,

    /// A null/invalid input was supplied where a valid value is required, or
    /// a dimension mismatch was detected between a basic set and its basis.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The tableau reported an unbounded direction. Callers must only scan
    /// bounded basic sets; this is the defined error for a violated
    /// precondition rather than a silent infinite loop.
    #[error("polyhedron is unbounded along a basis direction")]
    Unbounded,

    /// The simplex tableau or basis-reduction engine faulted.
    #[error("tableau or basis reduction fault: {0}")]
    LpInternal(String),

    /// The identifier registry was asked to release an identifier that is
    /// not present in its table.
    ///
    /// Kept for parity with the source's `isl_id_free`, which can hit this
    /// if its hash table is corrupted; the safe `Identifier` API here makes
    /// the condition unreachable; by construction, the only way to hold an
    /// `Identifier::Interned` is for `Context::intern` to have inserted it.
    #[error("identifier not found in context table")]
    NotFound,
}

impl Error {
    #[must_use]
    pub fn invalid_input(message: impl fmt::Display) -> Self {
        Self::InvalidInput(message.to_string())
    }

    #[must_use]
    pub fn lp_internal(message: impl fmt::Display) -> Self {
        Self::LpInternal(message.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
