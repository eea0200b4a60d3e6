//! Cross-cutting mutation lock for the engine's entry points.
//!
//! Every mutating operation calls out to external asset ledgers before
//! its internal state is finalized. A malicious ledger can use that
//! window to call back into the engine; the guard converts that hazard
//! into a deterministic [`DexError::ReentrantCall`] rejection instead of
//! nested mutation over inconsistent state.

use std::cell::Cell;

use crate::error::{DexError, Result};

/// The two states of the mutation lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    /// No mutating operation in flight.
    Free,
    /// A mutating operation holds the lock.
    Locked,
}

/// Reentrancy lock owned by the coordinator, never exposed to callers.
///
/// [`ReentrancyGuard::enter`] transitions `Free -> Locked` and hands back
/// an RAII [`GuardScope`]; dropping the scope restores `Free` on every
/// exit path, early `?` returns included.
#[derive(Debug)]
pub(crate) struct ReentrancyGuard {
    state: Cell<GuardState>,
}

impl ReentrancyGuard {
    /// Creates a guard at rest.
    pub(crate) const fn new() -> Self {
        Self {
            state: Cell::new(GuardState::Free),
        }
    }

    /// Acquires the lock for the duration of the returned scope.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ReentrantCall`] if the lock is already held.
    pub(crate) fn enter(&self) -> Result<GuardScope<'_>> {
        if self.state.get() == GuardState::Locked {
            return Err(DexError::ReentrantCall);
        }
        self.state.set(GuardState::Locked);
        Ok(GuardScope { guard: self })
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self) -> bool {
        self.state.get() == GuardState::Locked
    }
}

/// Holds the lock; releases it on drop.
#[must_use]
pub(crate) struct GuardScope<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardScope<'_> {
    fn drop(&mut self) {
        self.guard.state.set(GuardState::Free);
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn starts_free() {
        let guard = ReentrancyGuard::new();
        assert!(!guard.is_locked());
    }

    #[test]
    fn enter_locks_until_scope_drops() {
        let guard = ReentrancyGuard::new();
        {
            let Ok(_scope) = guard.enter() else {
                panic!("expected Ok");
            };
            assert!(guard.is_locked());
        }
        assert!(!guard.is_locked());
    }

    #[test]
    fn nested_enter_rejected() {
        let guard = ReentrancyGuard::new();
        let Ok(_scope) = guard.enter() else {
            panic!("expected Ok");
        };
        assert_eq!(guard.enter().err(), Some(DexError::ReentrantCall));
        // Failed nested entry must not have released the outer lock.
        assert!(guard.is_locked());
    }

    #[test]
    fn released_on_error_path() {
        let guard = ReentrancyGuard::new();
        let failing_op = |g: &ReentrancyGuard| -> Result<()> {
            let _scope = g.enter()?;
            Err(DexError::InvalidAmount)
        };
        assert!(failing_op(&guard).is_err());
        assert!(!guard.is_locked());
        // Reusable after the failure.
        assert!(guard.enter().is_ok());
    }
}
