//! The exchange pool: reserve state, share math, trade math, the
//! reentrancy guard, and the [`Dex`] coordinator that sequences them.

mod dex;
mod guard;
mod liquidity;
mod reserves;
mod swap;

#[cfg(test)]
mod proptest_properties;

pub use dex::Dex;
pub use reserves::Reserves;
