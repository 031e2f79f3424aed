//! Process-scoped owner of the identifier table and arithmetic constant
//! pool that the enumerator's ambient state hangs off of.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use num_bigint::BigInt;

use crate::config::ScanConfig;
use crate::identifier::{Identifier, Key, UserPayload};

struct ContextInner {
    identifiers: RefCell<HashMap<Key, std::rc::Weak<crate::identifier::IdentifierInner>>>,
    zero: BigInt,
    one: BigInt,
    config: ScanConfig,
}

/// A reference-counted handle to process-scoped state: the identifier
/// interning table and the `zero`/`one` arithmetic constants the enumerator
/// reuses rather than reallocating on every scan.
///
/// `Context` is cheap to clone (an `Rc` bump) and is *not* `Sync` — callers
/// serialize access to a context the same way the source requires external
/// synchronization around `isl_ctx`.
#[derive(Clone)]
pub struct Context(Rc<ContextInner>);

impl Default for Context {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new, empty context with the default [`ScanConfig`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    /// Create a new, empty context with an explicit [`ScanConfig`] applied
    /// to scans started through it.
    #[must_use]
    pub fn with_config(config: ScanConfig) -> Self {
        Self(Rc::new(ContextInner {
            identifiers: RefCell::new(HashMap::new()),
            zero: BigInt::from(0),
            one: BigInt::from(1),
            config,
        }))
    }

    /// The scan configuration this context was built with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> ScanConfig {
        self.0.config
    }

    /// The shared `0` constant.
    #[inline]
    #[must_use]
    pub fn zero(&self) -> &BigInt {
        &self.0.zero
    }

    /// The shared `1` constant.
    #[inline]
    #[must_use]
    pub fn one(&self) -> &BigInt {
        &self.0.one
    }

    /// The sentinel identifier: inert, never table-resident, safe to copy
    /// and free without mutating any shared state.
    #[inline]
    #[must_use]
    pub fn none_identifier(&self) -> Identifier {
        Identifier::None
    }

    /// Intern `(name, user)`, returning the existing identifier if this
    /// context has already interned that pair, or creating a fresh one.
    ///
    /// `name` and `user` being absent on both sides counts as an equal key,
    /// so `intern(ctx, None, None)` twice also returns the same instance.
    ///
    /// Kept fallible for interface parity with the source, which can fail
    /// the equivalent allocation; this implementation relies on the global
    /// allocator and so never returns `Err` in practice, the same way
    /// `Vec::push` doesn't surface allocator exhaustion on a healthy system.
    pub fn intern(
        &self,
        name: Option<&str>,
        user: Option<UserPayload>,
    ) -> crate::error::Result<Identifier> {
        let key = Key::new(name, user.as_ref());

        if let Some(existing) = self
            .0
            .identifiers
            .borrow()
            .get(&key)
            .and_then(std::rc::Weak::upgrade)
        {
            tracing::trace!(name = name.unwrap_or(""), "identifier reused");
            return Ok(Identifier::Interned(existing));
        }

        let id = Identifier::new_interned(self.clone(), name, user);
        if let Identifier::Interned(inner) = &id {
            self.0
                .identifiers
                .borrow_mut()
                .insert(key, Rc::downgrade(inner));
        }
        tracing::trace!(name = name.unwrap_or(""), "identifier interned");
        Ok(id)
    }

    /// Number of live (table-resident) identifiers. Exposed for tests; the
    /// table prunes dangling entries lazily on the next `intern` that would
    /// have collided with them, and eagerly on `Drop` of the last handle.
    #[must_use]
    pub fn identifier_table_len(&self) -> usize {
        self.0.identifiers.borrow().len()
    }

    pub(crate) fn deregister(&self, key: &Key) {
        self.0.identifiers.borrow_mut().remove(key);
    }
}
