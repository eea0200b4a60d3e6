//! Shared integer arithmetic helpers.

use crate::domain::{Amount, Rounding};
use crate::error::{DexError, Result};

/// Integer square root via Newton's method.
///
/// Returns `floor(sqrt(n))`. Converges for every `u128` input; used for
/// pricing the first liquidity deposit.
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Computes `value * numerator / denominator` with truncating division.
///
/// Multiplication happens before division so no precision is lost before
/// the single truncating divide. The intermediate product is checked.
///
/// # Errors
///
/// - [`DexError::Overflow`] if `value * numerator` exceeds `u128`.
/// - [`DexError::DivisionByZero`] if `denominator` is zero.
pub fn mul_div_floor(value: Amount, numerator: Amount, denominator: Amount) -> Result<Amount> {
    let product = value
        .checked_mul(&numerator)
        .ok_or(DexError::Overflow("mul_div numerator overflow"))?;
    product
        .checked_div(&denominator, Rounding::Down)
        .ok_or(DexError::DivisionByZero)
}
