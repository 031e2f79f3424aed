//! Hash-consed identifiers: symbolic names with an optional opaque payload,
//! interned per [`crate::context::Context`].
//!
//! Modeled on the teacher crate's `st_hashmap`/`entry` split: a private
//! `Key` carries the lookup fields, a `HashMap` keyed on it provides the
//! interning table, and the public type (`Identifier`) is a thin handle over
//! a reference-counted inner record.

use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::cell::RefCell;
use std::rc::Rc;

use crate::context::Context;
use crate::fnv::Fnv1a32;

#[cfg(target_pointer_width = "32")]
const MIX_K: u32 = 0x9e3779b9;
#[cfg(target_pointer_width = "64")]
const MIX_K: u64 = 0x517cc1b727220a95;

/// An opaque, identity-compared payload an [`Identifier`] may carry.
///
/// Two `UserPayload`s are equal iff they were produced by cloning the same
/// value — i.e. equality is reference-counted pointer identity, the safe
/// analogue of the source's `void *user` pointer equality.
#[derive(Clone)]
pub struct UserPayload(Rc<dyn Any>);

impl UserPayload {
    #[inline]
    #[must_use]
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    #[inline]
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    #[inline]
    #[must_use]
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for UserPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserPayload(@{:#x})", self.addr())
    }
}

impl PartialEq for UserPayload {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for UserPayload {}

/// Lookup key for the interning table: `(name, user)`, with `None == None`
/// on each field counting as equal, matching `isl_id_has_name_and_user`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Key {
    pub(crate) name: Option<String>,
    pub(crate) user_addr: Option<usize>,
}

impl Key {
    pub(crate) fn new(name: Option<&str>, user: Option<&UserPayload>) -> Self {
        Self {
            name: name.map(str::to_owned),
            user_addr: user.map(UserPayload::addr),
        }
    }
}

pub(crate) struct IdentifierInner {
    context: Context,
    name: Option<String>,
    user: Option<UserPayload>,
    finalizer: RefCell<Option<Box<dyn FnOnce(UserPayload)>>>,
    hash: u64,
}

impl IdentifierInner {
    fn precompute_hash(name: Option<&str>, user: Option<&UserPayload>) -> u64 {
        let mut hasher = Fnv1a32::new();
        match name {
            Some(name) => hasher.write(name.as_bytes()),
            None => {
                let addr = user.map_or(0, UserPayload::addr);
                hasher.write(&addr.to_ne_bytes());
            }
        }
        hasher.finish()
    }
}

impl Drop for IdentifierInner {
    fn drop(&mut self) {
        self.context.deregister(&Key {
            name: self.name.clone(),
            user_addr: self.user.as_ref().map(UserPayload::addr),
        });
        if let Some(user) = self.user.take() {
            if let Some(finalizer) = self.finalizer.borrow_mut().take() {
                finalizer(user);
            }
        }
        tracing::trace!(name = self.name.as_deref().unwrap_or(""), "identifier freed");
    }
}

/// An interned, reference-counted symbolic identifier.
///
/// `Identifier` is `Clone`, and cloning is exactly the source's `copy`
/// (increment refcount, return the same logical instance). Dropping the
/// last clone is the source's `free`: the finalizer (if any) runs, the
/// identifier is removed from its context's table, and the context
/// back-reference is released.
#[derive(Clone)]
pub enum Identifier {
    /// The sentinel "none" identifier. Has a conceptual negative refcount:
    /// `copy`/`free` on it are no-ops, and it is never produced by
    /// [`Context::intern`].
    None,
    /// A live, table-resident identifier.
    Interned(Rc<IdentifierInner>),
}

impl Identifier {
    pub(crate) fn new_interned(
        context: Context,
        name: Option<&str>,
        user: Option<UserPayload>,
    ) -> Self {
        let hash = IdentifierInner::precompute_hash(name, user.as_ref());
        Self::Interned(Rc::new(IdentifierInner {
            context,
            name: name.map(str::to_owned),
            user,
            finalizer: RefCell::new(None),
            hash,
        }))
    }

    /// Increment the reference count and return the same logical instance.
    /// A no-op on the sentinel identifier.
    #[inline]
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Decrement the reference count, consuming this handle. When the last
    /// handle is dropped the identifier is removed from its context's table
    /// and its finalizer (if any) runs.
    #[inline]
    pub fn free(self) {
        drop(self);
    }

    /// Install a finalizer to run on the stored payload when the last
    /// reference to this identifier is dropped. A no-op on the sentinel
    /// identifier and on an identifier with no payload.
    #[must_use]
    pub fn set_finalizer<F>(self, finalizer: F) -> Self
    where
        F: FnOnce(UserPayload) + 'static,
    {
        if let Self::Interned(inner) = &self {
            if inner.user.is_some() {
                *inner.finalizer.borrow_mut() = Some(Box::new(finalizer));
            }
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn get_name(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Interned(inner) => inner.name.as_deref(),
        }
    }

    #[inline]
    #[must_use]
    pub fn get_user(&self) -> Option<&UserPayload> {
        match self {
            Self::None => None,
            Self::Interned(inner) => inner.user.as_ref(),
        }
    }

    #[inline]
    #[must_use]
    pub fn get_context(&self) -> Option<&Context> {
        match self {
            Self::None => None,
            Self::Interned(inner) => Some(&inner.context),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn precomputed_hash(&self) -> u64 {
        match self {
            Self::None => 0,
            Self::Interned(inner) => inner.hash,
        }
    }

    /// Mix this identifier's precomputed hash into a running hash, the
    /// Rust rendering of `isl_hash_id`.
    #[must_use]
    pub fn hash(seed: u64, id: &Self) -> u64 {
        let i = id.precomputed_hash();
        #[cfg(target_pointer_width = "32")]
        let mixed = (seed.rotate_left(5) ^ (i as u64)).wrapping_mul(u64::from(MIX_K));
        #[cfg(target_pointer_width = "64")]
        let mixed = (seed.rotate_left(5) ^ i).wrapping_mul(MIX_K);
        mixed
    }
}

impl fmt::Display for Identifier {
    /// Append `name` (if any) followed by `@<hex-address>` (if a payload is
    /// present), matching `isl_printer_print_id`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.get_name() {
            f.write_str(name)?;
        }
        if let Some(user) = self.get_user() {
            write!(f, "@{:#x}", user.addr())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("Identifier::None"),
            Self::Interned(inner) => f
                .debug_struct("Identifier")
                .field("name", &inner.name)
                .field("user", &inner.user)
                .finish(),
        }
    }
}

impl PartialEq for Identifier {
    /// Identifiers compare equal iff they are the same interned instance
    /// (or both are the sentinel), mirroring pointer-equality in the source.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Interned(a), Self::Interned(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.precomputed_hash());
    }
}
