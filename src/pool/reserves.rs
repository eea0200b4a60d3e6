//! The pool's two reserve counters and their update contract.

use crate::domain::Amount;
use crate::error::{DexError, Result};

/// Which of the two assets is the input side of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwapSide {
    /// Asset A in, asset B out.
    AToB,
    /// Asset B in, asset A out.
    BToA,
}

/// Authoritative accounting of the pool's holdings of each asset.
///
/// Deliberately separate from the asset ledgers' own view of the pool's
/// custodial account: the engine trusts only these counters for pricing.
/// Mutators are crate-internal — only the liquidity and swap engines may
/// move reserves, and every update is atomic (both counters or neither).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reserves {
    reserve_a: Amount,
    reserve_b: Amount,
}

impl Reserves {
    /// Creates an empty reserve state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
        }
    }

    /// Returns the current reserves as `(reserve_a, reserve_b)`.
    #[must_use]
    pub const fn get(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Returns the reserve of asset A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Returns the reserve of asset B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Returns `true` if both reserves are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() && self.reserve_b.is_zero()
    }

    /// Increments both reserves by the deposited amounts.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if either counter would overflow;
    /// neither counter moves in that case.
    pub(crate) fn apply_deposit(&mut self, amount_a: Amount, amount_b: Amount) -> Result<()> {
        let new_a = self
            .reserve_a
            .checked_add(&amount_a)
            .ok_or(DexError::Overflow("reserve_a overflow on deposit"))?;
        let new_b = self
            .reserve_b
            .checked_add(&amount_b)
            .ok_or(DexError::Overflow("reserve_b overflow on deposit"))?;
        self.reserve_a = new_a;
        self.reserve_b = new_b;
        Ok(())
    }

    /// Decrements both reserves by the withdrawn amounts.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if either counter would underflow;
    /// neither counter moves in that case.
    pub(crate) fn apply_withdrawal(&mut self, amount_a: Amount, amount_b: Amount) -> Result<()> {
        let new_a = self
            .reserve_a
            .checked_sub(&amount_a)
            .ok_or(DexError::Overflow("reserve_a underflow on withdrawal"))?;
        let new_b = self
            .reserve_b
            .checked_sub(&amount_b)
            .ok_or(DexError::Overflow("reserve_b underflow on withdrawal"))?;
        self.reserve_a = new_a;
        self.reserve_b = new_b;
        Ok(())
    }

    /// Applies a trade: adds `net_in` to the input side and removes
    /// `amount_out` from the output side.
    ///
    /// Asserts the post-trade direction the constant-product formula
    /// guarantees for a positive net input: the input reserve strictly
    /// increases and the output reserve strictly decreases.
    ///
    /// # Errors
    ///
    /// - [`DexError::Overflow`] on counter overflow/underflow.
    /// - [`DexError::InvariantViolation`] if either reserve would fail to
    ///   move strictly in the expected direction.
    pub(crate) fn apply_swap(
        &mut self,
        side: SwapSide,
        net_in: Amount,
        amount_out: Amount,
    ) -> Result<()> {
        if net_in.is_zero() {
            return Err(DexError::InvariantViolation(
                "input reserve must strictly increase",
            ));
        }
        if amount_out.is_zero() {
            return Err(DexError::InvariantViolation(
                "output reserve must strictly decrease",
            ));
        }

        let (reserve_in, reserve_out) = match side {
            SwapSide::AToB => (self.reserve_a, self.reserve_b),
            SwapSide::BToA => (self.reserve_b, self.reserve_a),
        };

        let new_in = reserve_in
            .checked_add(&net_in)
            .ok_or(DexError::Overflow("input reserve overflow on swap"))?;
        let new_out = reserve_out
            .checked_sub(&amount_out)
            .ok_or(DexError::Overflow("output reserve underflow on swap"))?;

        match side {
            SwapSide::AToB => {
                self.reserve_a = new_in;
                self.reserve_b = new_out;
            }
            SwapSide::BToA => {
                self.reserve_b = new_in;
                self.reserve_a = new_out;
            }
        }
        Ok(())
    }
}
