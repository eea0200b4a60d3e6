//! Asset and share accounting.
//!
//! [`AssetLedger`] is the engine's only window onto the two external
//! assets; [`ShareLedger`] is the engine-owned sub-ledger for the pool's
//! receipt token.

mod asset_ledger;
mod share_ledger;

pub use asset_ledger::{AssetLedger, InMemoryAssetLedger};
pub use share_ledger::ShareLedger;
