//! Observable records emitted by the engine.
//!
//! Every successful mutating operation returns its record to the caller
//! and appends a copy to the engine's event log, which front ends and
//! indexers read after the fact. Records are plain data: the engine never
//! interprets them again once emitted.

use serde::{Deserialize, Serialize};

use super::{AccountId, Amount, AssetId, Shares};

/// Record of a successful `add_liquidity` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityAdded {
    /// The depositing account.
    pub provider: AccountId,
    /// Asset-A amount pulled into the pool.
    pub amount_a: Amount,
    /// Asset-B amount pulled into the pool.
    pub amount_b: Amount,
    /// Shares minted to the provider.
    pub shares_minted: Shares,
}

/// Record of a successful `remove_liquidity` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityRemoved {
    /// The withdrawing account.
    pub provider: AccountId,
    /// Asset-A amount pushed back to the provider.
    pub amount_a: Amount,
    /// Asset-B amount pushed back to the provider.
    pub amount_b: Amount,
    /// Shares burned from the provider.
    pub shares_burned: Shares,
}

/// Record of a successful `swap` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swapped {
    /// The trading account.
    pub trader: AccountId,
    /// Asset sold by the trader.
    pub asset_in: AssetId,
    /// Asset bought by the trader.
    pub asset_out: AssetId,
    /// Gross input amount (fee included).
    pub amount_in: Amount,
    /// Output amount pushed to the trader.
    pub amount_out: Amount,
    /// Fee skimmed to the fee collector; never enters the reserves.
    pub fee: Amount,
}

/// A single entry in the engine's event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolEvent {
    /// Liquidity was deposited.
    LiquidityAdded(LiquidityAdded),
    /// Liquidity was withdrawn.
    LiquidityRemoved(LiquidityRemoved),
    /// A trade executed.
    Swapped(Swapped),
}
