//! Deposit and withdrawal share math.
//!
//! Pure computations over reserve/share snapshots; the coordinator
//! applies their results. All division truncates — remainders stay in
//! the pool as residual dust, never over-paid out.

use crate::domain::{Amount, Shares};
use crate::error::{DexError, Result};
use crate::math::{isqrt, mul_div_floor};

/// Shares minted for the first, price-setting deposit:
/// `floor(sqrt(amount_a * amount_b))`.
///
/// # Errors
///
/// - [`DexError::InvalidAmounts`] if either amount is zero.
/// - [`DexError::Overflow`] if the product exceeds `u128`.
/// - [`DexError::InsufficientInitialLiquidity`] if the geometric mean
///   truncates to zero (a dust deposit that would lock the pool).
pub(crate) fn initial_shares(amount_a: Amount, amount_b: Amount) -> Result<Shares> {
    if amount_a.is_zero() || amount_b.is_zero() {
        return Err(DexError::InvalidAmounts);
    }
    let product = amount_a
        .checked_mul(&amount_b)
        .ok_or(DexError::Overflow("initial deposit product overflow"))?;
    let shares = isqrt(product.get());
    if shares == 0 {
        return Err(DexError::InsufficientInitialLiquidity);
    }
    Ok(Shares::new(shares))
}

/// Shares minted for a follow-on deposit into a seeded pool:
/// `min(amount_a * total / reserve_a, amount_b * total / reserve_b)`,
/// truncating.
///
/// Both amounts are pulled in full at their literal values even when they
/// are off the current reserve ratio; the depositor bears the mismatch
/// (the excess is absorbed into reserves without a matching mint).
///
/// # Errors
///
/// - [`DexError::InvalidAmounts`] if either amount is zero.
/// - [`DexError::Overflow`] if an intermediate product exceeds `u128`.
/// - [`DexError::DepositTooSmall`] if the bounded mint truncates to zero.
pub(crate) fn proportional_shares(
    amount_a: Amount,
    amount_b: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
    total: Shares,
) -> Result<Shares> {
    if amount_a.is_zero() || amount_b.is_zero() {
        return Err(DexError::InvalidAmounts);
    }

    let total_amount = Amount::new(total.get());
    let shares_from_a = mul_div_floor(amount_a, total_amount, reserve_a)?;
    let shares_from_b = mul_div_floor(amount_b, total_amount, reserve_b)?;

    let minted = core::cmp::min(shares_from_a.get(), shares_from_b.get());
    if minted == 0 {
        return Err(DexError::DepositTooSmall);
    }
    Ok(Shares::new(minted))
}

/// Amounts returned for burning `share_amount` shares:
/// `out_x = share_amount * reserve_x / total`, truncating.
///
/// # Errors
///
/// - [`DexError::InvalidShareAmount`] if `share_amount` is zero.
/// - [`DexError::InsufficientShares`] if `share_amount` exceeds `total`.
/// - [`DexError::Overflow`] if an intermediate product exceeds `u128`.
pub(crate) fn withdrawal_amounts(
    share_amount: Shares,
    reserve_a: Amount,
    reserve_b: Amount,
    total: Shares,
) -> Result<(Amount, Amount)> {
    if share_amount.is_zero() {
        return Err(DexError::InvalidShareAmount);
    }
    if share_amount > total {
        return Err(DexError::InsufficientShares);
    }

    let share_scale = Amount::new(share_amount.get());
    let total_amount = Amount::new(total.get());
    let out_a = mul_div_floor(reserve_a, share_scale, total_amount)?;
    let out_b = mul_div_floor(reserve_b, share_scale, total_amount)?;

    Ok((out_a, out_b))
}
