//! Constant-product trade math.
//!
//! The pricing rule is fee-exclusive: the fee is skimmed from the gross
//! input *before* the formula runs and is routed to the fee collector,
//! never into the reserves. With `net_in = amount_in - fee` and pre-trade
//! reserves `(reserve_in, reserve_out)`:
//!
//! ```text
//! amount_out = reserve_out * net_in / (reserve_in + net_in)
//! ```
//!
//! using truncating integer arithmetic throughout, multiplication before
//! division. Because only the net input enters the pool, the post-trade
//! product `reserve_in' * reserve_out'` can never fall below the
//! pre-trade product.

use crate::domain::{Amount, FeeRate, Rounding};
use crate::error::{DexError, Result};

/// Fee split and computed output for one trade, at pre-trade reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SwapQuote {
    /// Skimmed to the fee collector; never enters the pool.
    pub fee: Amount,
    /// Pulled into the input-side reserve.
    pub net_in: Amount,
    /// Pushed to the trader from the output-side reserve.
    pub amount_out: Amount,
}

/// Quotes a trade of `amount_in` against the given pre-trade reserves.
///
/// # Errors
///
/// - [`DexError::InvalidAmount`] if `amount_in` is zero.
/// - [`DexError::InsufficientLiquidity`] if the pool cannot cover any
///   output for this input (empty or too-shallow output reserve).
/// - [`DexError::Overflow`] if an intermediate product exceeds `u128`.
pub(crate) fn quote(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee_rate: FeeRate,
) -> Result<SwapQuote> {
    if amount_in.is_zero() {
        return Err(DexError::InvalidAmount);
    }

    let fee = fee_rate.fee_on(amount_in)?;
    // fee < amount_in for any sub-100% rate, so net_in is positive.
    let net_in = amount_in
        .checked_sub(&fee)
        .ok_or(DexError::Overflow("net input underflow"))?;

    let denominator = reserve_in
        .checked_add(&net_in)
        .ok_or(DexError::Overflow("swap denominator overflow"))?;
    let numerator = reserve_out
        .checked_mul(&net_in)
        .ok_or(DexError::Overflow("swap numerator overflow"))?;
    let amount_out = numerator
        .checked_div(&denominator, Rounding::Down)
        .ok_or(DexError::DivisionByZero)?;

    if amount_out.is_zero() || amount_out >= reserve_out {
        return Err(DexError::InsufficientLiquidity);
    }

    Ok(SwapQuote {
        fee,
        net_in,
        amount_out,
    })
}

/// Verifies the constant-product invariant across a trade: the post-trade
/// product must be at least the pre-trade product.
///
/// The formula guarantees this for truncating division; the check guards
/// the reserve update against any future drift in the math.
///
/// # Errors
///
/// - [`DexError::Overflow`] if either product exceeds `u128`.
/// - [`DexError::InvariantViolation`] if the product decreased.
pub(crate) fn check_product_monotone(
    reserve_in: Amount,
    reserve_out: Amount,
    net_in: Amount,
    amount_out: Amount,
) -> Result<()> {
    let k_before = reserve_in
        .checked_mul(&reserve_out)
        .ok_or(DexError::Overflow("pre-trade product overflow"))?;

    let new_in = reserve_in
        .checked_add(&net_in)
        .ok_or(DexError::Overflow("post-trade input reserve overflow"))?;
    let new_out = reserve_out
        .checked_sub(&amount_out)
        .ok_or(DexError::Overflow("post-trade output reserve underflow"))?;
    let k_after = new_in
        .checked_mul(&new_out)
        .ok_or(DexError::Overflow("post-trade product overflow"))?;

    if k_after < k_before {
        return Err(DexError::InvariantViolation("constant product decreased"));
    }
    Ok(())
}
