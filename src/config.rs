//! Immutable deployment parameters for the exchange.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, AssetId, FeeRate};
use crate::error::{DexError, Result};

/// Validated configuration for a [`Dex`](crate::pool::Dex) instance.
///
/// Fixed at construction, never mutated afterwards: the two asset
/// identities, the fee collector, and the fee rate.
///
/// # Validation
///
/// - Both asset identities must be non-zero and distinct.
/// - The fee collector must be a non-zero identity.
/// - The fee rate is validated at [`FeeRate`] construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexConfig {
    asset_a: AssetId,
    asset_b: AssetId,
    fee_collector: AccountId,
    fee_rate: FeeRate,
}

impl DexConfig {
    /// Creates a new `DexConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfig`] if either asset identity is
    /// zero, the assets coincide, or the fee collector is zero.
    pub fn new(
        asset_a: AssetId,
        asset_b: AssetId,
        fee_collector: AccountId,
        fee_rate: FeeRate,
    ) -> Result<Self> {
        let config = Self {
            asset_a,
            asset_b,
            fee_collector,
            fee_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfig`] naming the violated invariant.
    pub fn validate(&self) -> Result<()> {
        if self.asset_a.is_zero() || self.asset_b.is_zero() {
            return Err(DexError::InvalidConfig("asset identity must be non-zero"));
        }
        if self.asset_a == self.asset_b {
            return Err(DexError::InvalidConfig("pool assets must be distinct"));
        }
        if self.fee_collector.is_zero() {
            return Err(DexError::InvalidConfig("fee collector must be non-zero"));
        }
        Ok(())
    }

    /// Returns the identity of asset A.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Returns the identity of asset B.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// Returns the fee collector identity.
    #[must_use]
    pub const fn fee_collector(&self) -> AccountId {
        self.fee_collector
    }

    /// Returns the swap fee rate.
    #[must_use]
    pub const fn fee_rate(&self) -> FeeRate {
        self.fee_rate
    }
}
