//! Fundamental domain value types used throughout the engine.
//!
//! Identities, amounts, shares, the fee rate, and the records emitted by
//! mutating operations. All types are newtypes with validated or
//! infallible constructors; arithmetic is checked and rounding is always
//! explicit.

mod account;
mod amount;
mod asset;
mod events;
mod fee_rate;
mod rounding;
mod shares;

pub use account::AccountId;
pub use amount::Amount;
pub use asset::AssetId;
pub use events::{LiquidityAdded, LiquidityRemoved, PoolEvent, Swapped};
pub use fee_rate::FeeRate;
pub use rounding::Rounding;
pub use shares::Shares;
