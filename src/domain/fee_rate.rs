//! Swap fee as an exact rational rate.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::{DexError, Result};

/// A swap fee expressed as `numerator / denominator`.
///
/// The engine's default is `5 / 1000` (0.5%), skimmed from the gross
/// input and routed to the fee collector before the pricing formula runs.
/// The fee *truncates*: `fee = floor(amount * numerator / denominator)`,
/// so dust inputs below `denominator / numerator` pay no fee.
///
/// # Examples
///
/// ```
/// use cpswap::domain::{Amount, FeeRate};
///
/// let rate = FeeRate::SWAP_DEFAULT;
/// let fee = rate.fee_on(Amount::new(100_000)).expect("no overflow");
/// assert_eq!(fee, Amount::new(500)); // 0.5%
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeRate {
    numerator: u128,
    denominator: u128,
}

impl FeeRate {
    /// The engine's default swap fee: 5 / 1000 = 0.5%.
    pub const SWAP_DEFAULT: Self = Self {
        numerator: 5,
        denominator: 1000,
    };

    /// Creates a new `FeeRate`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfig`] if the denominator is zero or
    /// the rate is not strictly below 100%.
    pub const fn new(numerator: u128, denominator: u128) -> Result<Self> {
        if denominator == 0 {
            return Err(DexError::InvalidConfig("fee denominator must be non-zero"));
        }
        if numerator >= denominator {
            return Err(DexError::InvalidConfig("fee rate must be below 100%"));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Returns the fee numerator.
    #[must_use]
    pub const fn numerator(&self) -> u128 {
        self.numerator
    }

    /// Returns the fee denominator.
    #[must_use]
    pub const fn denominator(&self) -> u128 {
        self.denominator
    }

    /// Computes the fee on `amount`: `floor(amount * numerator / denominator)`.
    ///
    /// Multiplication happens before division so no precision is lost
    /// before the single truncating divide.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if `amount * numerator` exceeds `u128`.
    pub fn fee_on(&self, amount: Amount) -> Result<Amount> {
        let scaled = amount
            .checked_mul(&Amount::new(self.numerator))
            .ok_or(DexError::Overflow("fee numerator overflow"))?;
        scaled
            .checked_div(&Amount::new(self.denominator), Rounding::Down)
            .ok_or(DexError::DivisionByZero)
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::SWAP_DEFAULT
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
