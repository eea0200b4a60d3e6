//! Convenience re-exports for common types.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use cpswap::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    AccountId, Amount, AssetId, FeeRate, LiquidityAdded, LiquidityRemoved, PoolEvent, Rounding,
    Shares, Swapped,
};

// Re-export configuration
pub use crate::config::DexConfig;

// Re-export ledgers
pub use crate::ledger::{AssetLedger, InMemoryAssetLedger, ShareLedger};

// Re-export the coordinator
pub use crate::pool::Dex;

// Re-export error types
pub use crate::error::{DexError, Result};
