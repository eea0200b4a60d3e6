//! Chain-agnostic account identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A generic account identity: a liquidity provider, trader, fee
/// collector, or the pool's own custodial account.
///
/// Wraps a fixed-size `[u8; 32]` byte array. All 32-byte sequences are
/// considered valid identities, so construction is infallible; the
/// all-zero identity is the null sentinel and is rejected wherever the
/// engine requires a real counterparty.
///
/// # Examples
///
/// ```
/// use cpswap::domain::AccountId;
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// assert!(!alice.is_zero());
/// assert!(AccountId::zero().is_zero());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero (null) identity.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` if this is the null identity.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        let mut i = 0;
        while i < 32 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First four bytes as hex; enough to tell accounts apart in logs.
        write!(
            f,
            "0x{:02x}{:02x}{:02x}{:02x}…",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}
