//! An integer-point enumerator for bounded rational polyhedra.
//!
//! Given a convex set defined by linear (in)equalities over integer
//! variables (a "basic set"), [`enumerator::scan_basic_set`] visits every
//! integer lattice point inside it, calling a user-supplied
//! [`callback::Callback`] on each. [`enumerator::count_basic_set_upto`] and
//! friends specialize this to tallying points without materializing them,
//! exploiting a last-dimension shortcut (see [`enumerator`] for why that's
//! sound).
//!
//! The enumerator itself is a depth-first sweep over a *reduced* lattice
//! basis, driven through an incremental simplex tableau that supports
//! snapshot/rollback so sibling branches reuse the parent's shared state.
//! Both the simplex pivot engine and the basis-reduction algorithm are
//! external collaborators: this crate only specifies the narrow interfaces
//! it drives them through ([`tableau::Tableau`], [`tableau::BasisReducer`]),
//! the same way the polyhedral algebra that constructs basic sets from
//! source syntax, or decomposes a union into a disjoint one, is external
//! ([`basic_set::BasicSet`], [`basic_set::PolyhedralSet`]).
//!
//! # Non-goals
//!
//! No unbounded enumeration: a caller must guarantee boundedness, and an
//! unbounded input is a defined error ([`error::Error::Unbounded`]), not a
//! silent infinite loop. No parallel enumeration, no persistence of
//! enumeration state across process runs, no approximate counting.
//!
//! # Supporting infrastructure
//!
//! [`context::Context`] and [`identifier::Identifier`] provide an interned,
//! hash-consed symbolic identifier registry the enumerator's ambient
//! context uses to tag dimensions. It is deliberately independent of the
//! enumerator proper and illustrates the same context-wide
//! resource-management pattern the rest of the crate relies on
//! (reference-counted handles, a shared table, explicit finalizers).

#![allow(clippy::module_name_repetitions)]

pub mod basic_set;
pub mod callback;
pub mod config;
pub mod context;
pub mod enumerator;
pub mod error;
mod fnv;
pub mod identifier;
pub mod tableau;

pub use callback::{Callback, Counter, Signal};
pub use config::ScanConfig;
pub use context::Context;
pub use enumerator::{
    count_basic_set_upto, count_set, count_set_upto, scan_basic_set, scan_basic_set_with_config,
    scan_set, scan_set_with_config,
};
pub use error::{Error, Result};
pub use identifier::{Identifier, UserPayload};
