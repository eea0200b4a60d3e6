//! Fungible accounting for the pool's ownership shares.
//!
//! Standard balance/allowance semantics: transfers and delegated
//! transfers between holders never change the total; only
//! [`ShareLedger::mint`] and [`ShareLedger::burn`] do, and those are
//! crate-internal, invoked exclusively by the liquidity engine.

use std::collections::HashMap;

use crate::domain::{AccountId, Shares};
use crate::error::{DexError, Result};

/// Balances and allowances for the pool's receipt token.
///
/// # Invariants
///
/// - `total_shares` equals the sum of all balances at all times; it is
///   tracked incrementally, never recomputed by summation.
/// - Balance entries are created lazily on first credit and never
///   deleted — a balance may return to zero.
/// - Allowances decrement on each delegated transfer and never expire on
///   their own.
#[derive(Debug, Default)]
pub struct ShareLedger {
    balances: HashMap<AccountId, Shares>,
    allowances: HashMap<(AccountId, AccountId), Shares>,
    total: Shares,
}

impl ShareLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total outstanding shares.
    #[must_use]
    pub fn total_shares(&self) -> Shares {
        self.total
    }

    /// Returns the share balance of `account`.
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Shares {
        self.balances.get(&account).copied().unwrap_or(Shares::ZERO)
    }

    /// Returns the remaining allowance granted by `owner` to `spender`.
    #[must_use]
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Shares {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Shares::ZERO)
    }

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidShareAmount`] if `amount` is zero.
    /// - [`DexError::ZeroAccount`] if `to` is the null identity.
    /// - [`DexError::InsufficientShares`] if `from` under-holds.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Shares) -> Result<()> {
        if amount.is_zero() {
            return Err(DexError::InvalidShareAmount);
        }
        if to.is_zero() {
            return Err(DexError::ZeroAccount);
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    /// Sets the allowance granted by `owner` to `spender`.
    ///
    /// Overwrites any previous allowance, zero included.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ZeroAccount`] if `spender` is the null identity.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Shares) -> Result<()> {
        if spender.is_zero() {
            return Err(DexError::ZeroAccount);
        }
        self.allowances.insert((owner, spender), amount);
        Ok(())
    }

    /// Moves `amount` shares from `owner` to `to`, spending `spender`'s
    /// allowance.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidShareAmount`] if `amount` is zero.
    /// - [`DexError::ZeroAccount`] if `to` is the null identity.
    /// - [`DexError::InsufficientAllowance`] if the allowance under-covers.
    /// - [`DexError::InsufficientShares`] if `owner` under-holds.
    pub fn transfer_from(
        &mut self,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Shares,
    ) -> Result<()> {
        if amount.is_zero() {
            return Err(DexError::InvalidShareAmount);
        }
        if to.is_zero() {
            return Err(DexError::ZeroAccount);
        }
        let granted = self.allowance(owner, spender);
        let remaining = granted
            .checked_sub(&amount)
            .ok_or(DexError::InsufficientAllowance)?;
        // Balance check happens before the allowance write so a failed
        // transfer leaves the allowance untouched.
        self.debit(owner, amount)?;
        self.allowances.insert((owner, spender), remaining);
        self.credit(to, amount)
    }

    /// Creates `amount` new shares for `account`.
    ///
    /// Liquidity-engine internal.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAccount`] if `account` is the null identity.
    /// - [`DexError::Overflow`] if the balance or total would overflow.
    pub(crate) fn mint(&mut self, account: AccountId, amount: Shares) -> Result<()> {
        if account.is_zero() {
            return Err(DexError::ZeroAccount);
        }
        let new_total = self
            .total
            .checked_add(&amount)
            .ok_or(DexError::Overflow("total shares overflow on mint"))?;
        self.credit(account, amount)?;
        self.total = new_total;
        Ok(())
    }

    /// Destroys `amount` shares held by `account`.
    ///
    /// Liquidity-engine internal.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientShares`] if `account` under-holds.
    /// - [`DexError::Overflow`] if the total would underflow (cannot
    ///   happen while the sum invariant holds).
    pub(crate) fn burn(&mut self, account: AccountId, amount: Shares) -> Result<()> {
        let new_total = self
            .total
            .checked_sub(&amount)
            .ok_or(DexError::Overflow("total shares underflow on burn"))?;
        self.debit(account, amount)?;
        self.total = new_total;
        Ok(())
    }

    fn debit(&mut self, account: AccountId, amount: Shares) -> Result<()> {
        let balance = self.balance_of(account);
        let remaining = balance
            .checked_sub(&amount)
            .ok_or(DexError::InsufficientShares)?;
        self.balances.insert(account, remaining);
        Ok(())
    }

    fn credit(&mut self, account: AccountId, amount: Shares) -> Result<()> {
        let entry = self.balances.entry(account).or_insert(Shares::ZERO);
        *entry = entry
            .checked_add(&amount)
            .ok_or(DexError::Overflow("share balance overflow"))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn alice() -> AccountId {
        AccountId::from_bytes([0xaa; 32])
    }

    fn bob() -> AccountId {
        AccountId::from_bytes([0xbb; 32])
    }

    fn carol() -> AccountId {
        AccountId::from_bytes([0xcc; 32])
    }

    fn seeded(holder: AccountId, amount: u128) -> ShareLedger {
        let mut ledger = ShareLedger::new();
        let Ok(()) = ledger.mint(holder, Shares::new(amount)) else {
            panic!("expected Ok");
        };
        ledger
    }

    // -- mint / burn --------------------------------------------------------

    #[test]
    fn mint_credits_and_grows_total() {
        let ledger = seeded(alice(), 1_000);
        assert_eq!(ledger.balance_of(alice()), Shares::new(1_000));
        assert_eq!(ledger.total_shares(), Shares::new(1_000));
    }

    #[test]
    fn mint_to_zero_account_rejected() {
        let mut ledger = ShareLedger::new();
        let result = ledger.mint(AccountId::zero(), Shares::new(1));
        assert!(matches!(result, Err(DexError::ZeroAccount)));
        assert_eq!(ledger.total_shares(), Shares::ZERO);
    }

    #[test]
    fn burn_debits_and_shrinks_total() {
        let mut ledger = seeded(alice(), 1_000);
        let Ok(()) = ledger.burn(alice(), Shares::new(400)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(alice()), Shares::new(600));
        assert_eq!(ledger.total_shares(), Shares::new(600));
    }

    #[test]
    fn burn_entire_balance_leaves_zero_total() {
        let mut ledger = seeded(alice(), 1_000);
        let Ok(()) = ledger.burn(alice(), Shares::new(1_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(alice()), Shares::ZERO);
        assert_eq!(ledger.total_shares(), Shares::ZERO);
    }

    #[test]
    fn burn_more_than_balance_rejected() {
        let mut ledger = seeded(alice(), 100);
        let result = ledger.burn(alice(), Shares::new(101));
        assert!(matches!(result, Err(DexError::InsufficientShares)));
        assert_eq!(ledger.total_shares(), Shares::new(100));
    }

    // -- transfer -----------------------------------------------------------

    #[test]
    fn transfer_preserves_total() {
        let mut ledger = seeded(alice(), 1_000);
        let Ok(()) = ledger.transfer(alice(), bob(), Shares::new(250)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(alice()), Shares::new(750));
        assert_eq!(ledger.balance_of(bob()), Shares::new(250));
        assert_eq!(ledger.total_shares(), Shares::new(1_000));
    }

    #[test]
    fn transfer_zero_amount_rejected() {
        let mut ledger = seeded(alice(), 1_000);
        let result = ledger.transfer(alice(), bob(), Shares::ZERO);
        assert!(matches!(result, Err(DexError::InvalidShareAmount)));
    }

    #[test]
    fn transfer_to_zero_account_rejected() {
        let mut ledger = seeded(alice(), 1_000);
        let result = ledger.transfer(alice(), AccountId::zero(), Shares::new(1));
        assert!(matches!(result, Err(DexError::ZeroAccount)));
    }

    #[test]
    fn transfer_exceeding_balance_rejected() {
        let mut ledger = seeded(alice(), 100);
        let result = ledger.transfer(alice(), bob(), Shares::new(101));
        assert!(matches!(result, Err(DexError::InsufficientShares)));
        assert_eq!(ledger.balance_of(bob()), Shares::ZERO);
    }

    // -- approve / transfer_from --------------------------------------------

    #[test]
    fn approve_then_delegated_transfer() {
        let mut ledger = seeded(alice(), 1_000);
        let Ok(()) = ledger.approve(alice(), bob(), Shares::new(300)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.allowance(alice(), bob()), Shares::new(300));

        let Ok(()) = ledger.transfer_from(bob(), alice(), carol(), Shares::new(200)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.balance_of(carol()), Shares::new(200));
        assert_eq!(ledger.allowance(alice(), bob()), Shares::new(100));
        assert_eq!(ledger.total_shares(), Shares::new(1_000));
    }

    #[test]
    fn transfer_from_exceeding_allowance_rejected() {
        let mut ledger = seeded(alice(), 1_000);
        let Ok(()) = ledger.approve(alice(), bob(), Shares::new(100)) else {
            panic!("expected Ok");
        };
        let result = ledger.transfer_from(bob(), alice(), carol(), Shares::new(101));
        assert!(matches!(result, Err(DexError::InsufficientAllowance)));
        assert_eq!(ledger.allowance(alice(), bob()), Shares::new(100));
    }

    #[test]
    fn transfer_from_exceeding_balance_keeps_allowance() {
        let mut ledger = seeded(alice(), 50);
        let Ok(()) = ledger.approve(alice(), bob(), Shares::new(100)) else {
            panic!("expected Ok");
        };
        let result = ledger.transfer_from(bob(), alice(), carol(), Shares::new(80));
        assert!(matches!(result, Err(DexError::InsufficientShares)));
        assert_eq!(ledger.allowance(alice(), bob()), Shares::new(100));
    }

    #[test]
    fn approve_overwrites_previous_grant() {
        let mut ledger = seeded(alice(), 1_000);
        let Ok(()) = ledger.approve(alice(), bob(), Shares::new(300)) else {
            panic!("expected Ok");
        };
        let Ok(()) = ledger.approve(alice(), bob(), Shares::new(10)) else {
            panic!("expected Ok");
        };
        assert_eq!(ledger.allowance(alice(), bob()), Shares::new(10));
    }

    #[test]
    fn approve_zero_spender_rejected() {
        let mut ledger = seeded(alice(), 1_000);
        let result = ledger.approve(alice(), AccountId::zero(), Shares::new(1));
        assert!(matches!(result, Err(DexError::ZeroAccount)));
    }

    #[test]
    fn balance_may_return_to_zero_without_removal() {
        let mut ledger = seeded(alice(), 10);
        let Ok(()) = ledger.transfer(alice(), bob(), Shares::new(10)) else {
            panic!("expected Ok");
        };
        // Entry still answers queries after dropping to zero.
        assert_eq!(ledger.balance_of(alice()), Shares::ZERO);
    }
}
