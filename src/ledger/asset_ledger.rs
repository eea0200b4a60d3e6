//! External asset-ledger capability.
//!
//! The engine does not own the two pooled assets: they live on external
//! ledgers it can only reach through this narrow capability. Every call
//! is synchronous, and any failure aborts the engine operation that made
//! it. Implementations may be adversarial — they can attempt to re-enter
//! the engine from inside [`AssetLedger::transfer`], which is exactly the
//! hazard the reentrancy guard exists to reject.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::{DexError, Result};

/// Opaque capability over one external fungible-asset ledger.
///
/// # Contract
///
/// - [`AssetLedger::transfer`] either moves exactly `amount` from `from`
///   to `to` and returns `Ok(())`, or moves nothing and returns an error.
///   Partial moves are forbidden.
/// - [`AssetLedger::balance_of`] is a pure read.
///
/// The engine holds one handle per pool asset and matches them by
/// [`AssetLedger::asset_id`] at construction time.
pub trait AssetLedger {
    /// Returns the identity of the asset this ledger accounts for.
    fn asset_id(&self) -> AssetId;

    /// Returns the balance held by `account`.
    fn balance_of(&self, account: AccountId) -> Amount;

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::TransferFailed`] if the ledger refuses the
    /// move (insufficient balance, frozen account, or any other
    /// ledger-internal reason).
    fn transfer(&self, from: AccountId, to: AccountId, amount: Amount) -> Result<()>;
}

/// In-memory [`AssetLedger`] backed by a balance map.
///
/// Stands in for the external asset contracts in tests and demos. Uses
/// interior mutability so a shared handle (`Rc<InMemoryAssetLedger>`) can
/// be held by both the engine and the test harness.
#[derive(Debug)]
pub struct InMemoryAssetLedger {
    asset: AssetId,
    balances: RefCell<HashMap<AccountId, Amount>>,
}

impl InMemoryAssetLedger {
    /// Creates an empty ledger for `asset`.
    #[must_use]
    pub fn new(asset: AssetId) -> Self {
        Self {
            asset,
            balances: RefCell::new(HashMap::new()),
        }
    }

    /// Credits `amount` to `account` out of thin air. Test/demo setup only.
    pub fn mint(&self, account: AccountId, amount: Amount) -> Result<()> {
        let mut balances = self.balances.borrow_mut();
        let entry = balances.entry(account).or_insert(Amount::ZERO);
        *entry = entry
            .checked_add(&amount)
            .ok_or(DexError::Overflow("asset balance overflow on mint"))?;
        Ok(())
    }

    /// Sum of all balances. Minting is the only way supply changes, so
    /// conservation checks compare this before and after operations.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.balances
            .borrow()
            .values()
            .fold(Amount::ZERO, |acc, balance| {
                acc.checked_add(balance).unwrap_or(Amount::MAX)
            })
    }
}

impl AssetLedger for InMemoryAssetLedger {
    fn asset_id(&self) -> AssetId {
        self.asset
    }

    fn balance_of(&self, account: AccountId) -> Amount {
        self.balances
            .borrow()
            .get(&account)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(&self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        if to.is_zero() {
            return Err(DexError::TransferFailed("transfer to zero account"));
        }
        let mut balances = self.balances.borrow_mut();
        let from_balance = balances.get(&from).copied().unwrap_or(Amount::ZERO);
        let new_from = from_balance
            .checked_sub(&amount)
            .ok_or(DexError::TransferFailed("insufficient asset balance"))?;
        let to_balance = balances.get(&to).copied().unwrap_or(Amount::ZERO);
        let new_to = to_balance
            .checked_add(&amount)
            .ok_or(DexError::TransferFailed("recipient balance overflow"))?;
        balances.insert(from, new_from);
        balances.insert(to, new_to);
        Ok(())
    }
}
