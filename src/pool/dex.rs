//! The exchange coordinator.
//!
//! [`Dex`] composes the reserve state, the share ledger, the reentrancy
//! guard, and the two external asset-ledger handles, and sequences every
//! mutating operation: acquire the guard, validate inputs, move value on
//! the external ledgers, then commit internal state and emit the record.
//!
//! # Atomicity
//!
//! Deposits and swaps pull value in, so they touch internal state only
//! after every external transfer has succeeded, with all arithmetic
//! dry-run validated before the first external call. Withdrawals push
//! value out, so they debit shares and reserves *before* the pushes;
//! otherwise a reentrant share operation fired from inside a push could
//! spend the position twice. On either path, if an external transfer
//! fails mid-operation the engine restores its own state and issues
//! compensating transfers for the externals already executed before
//! surfacing the error.
//!
//! # Reentrancy
//!
//! Entry points take `&self` with interior mutability, so an external
//! ledger holding a handle to the engine *can* call back in mid-transfer
//! — and is rejected with [`DexError::ReentrantCall`] by the guard. No
//! `RefCell` borrow is ever held across an external ledger call, so a
//! reentrant *query* observes a consistent pre-update snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};

use crate::config::DexConfig;
use crate::domain::{
    AccountId, Amount, AssetId, FeeRate, LiquidityAdded, LiquidityRemoved, PoolEvent, Shares,
    Swapped,
};
use crate::error::{DexError, Result};
use crate::ledger::{AssetLedger, ShareLedger};

use super::guard::ReentrancyGuard;
use super::reserves::{Reserves, SwapSide};
use super::{liquidity, swap};

/// A constant-product exchange over one pair of external assets.
///
/// Singleton per pool: created once, never destroyed. Reserves are
/// mutated only by the liquidity and swap operations; the pool is either
/// empty or fully seeded (`reserve_a == 0 iff reserve_b == 0 iff
/// total_shares == 0`).
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use cpswap::config::DexConfig;
/// use cpswap::domain::{AccountId, Amount, AssetId, FeeRate};
/// use cpswap::ledger::InMemoryAssetLedger;
/// use cpswap::pool::Dex;
///
/// let asset_a = AssetId::from_bytes([1u8; 32]);
/// let asset_b = AssetId::from_bytes([2u8; 32]);
/// let ledger_a = Rc::new(InMemoryAssetLedger::new(asset_a));
/// let ledger_b = Rc::new(InMemoryAssetLedger::new(asset_b));
///
/// let alice = AccountId::from_bytes([0xaa; 32]);
/// ledger_a.mint(alice, Amount::new(1_000)).expect("mint");
/// ledger_b.mint(alice, Amount::new(1_000)).expect("mint");
///
/// let config = DexConfig::new(
///     asset_a,
///     asset_b,
///     AccountId::from_bytes([0xfe; 32]),
///     FeeRate::SWAP_DEFAULT,
/// )
/// .expect("valid config");
/// let dex = Dex::new(
///     config,
///     AccountId::from_bytes([0xdd; 32]),
///     ledger_a.clone(),
///     ledger_b.clone(),
/// )
/// .expect("valid dex");
///
/// let record = dex
///     .add_liquidity(alice, Amount::new(100), Amount::new(100))
///     .expect("deposit");
/// assert_eq!(record.shares_minted.get(), 100);
/// ```
pub struct Dex {
    config: DexConfig,
    pool_account: AccountId,
    ledger_a: Rc<dyn AssetLedger>,
    ledger_b: Rc<dyn AssetLedger>,
    reserves: RefCell<Reserves>,
    shares: RefCell<ShareLedger>,
    guard: ReentrancyGuard,
    events: RefCell<Vec<PoolEvent>>,
}

impl Dex {
    /// Creates a new exchange over the given asset ledgers.
    ///
    /// `pool_account` is the custodial identity under which the external
    /// ledgers hold the pooled funds.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfig`] if the config fails
    /// validation, `pool_account` is zero or collides with the fee
    /// collector, or either ledger's asset identity does not match the
    /// config.
    pub fn new(
        config: DexConfig,
        pool_account: AccountId,
        ledger_a: Rc<dyn AssetLedger>,
        ledger_b: Rc<dyn AssetLedger>,
    ) -> Result<Self> {
        config.validate()?;
        if pool_account.is_zero() {
            return Err(DexError::InvalidConfig("pool account must be non-zero"));
        }
        if pool_account == config.fee_collector() {
            return Err(DexError::InvalidConfig(
                "pool account must differ from fee collector",
            ));
        }
        if ledger_a.asset_id() != config.asset_a() {
            return Err(DexError::InvalidConfig("ledger A asset mismatch"));
        }
        if ledger_b.asset_id() != config.asset_b() {
            return Err(DexError::InvalidConfig("ledger B asset mismatch"));
        }
        Ok(Self {
            config,
            pool_account,
            ledger_a,
            ledger_b,
            reserves: RefCell::new(Reserves::new()),
            shares: RefCell::new(ShareLedger::new()),
            guard: ReentrancyGuard::new(),
            events: RefCell::new(Vec::new()),
        })
    }

    // -- mutating entry points ----------------------------------------------

    /// Deposits `amount_a` / `amount_b` and mints proportional shares.
    ///
    /// The first deposit prices the pool and mints
    /// `floor(sqrt(amount_a * amount_b))` shares; follow-on deposits mint
    /// `min(amount_a * total / reserve_a, amount_b * total / reserve_b)`.
    /// Both amounts are pulled in full at the literal values requested —
    /// the depositor bears any ratio mismatch.
    ///
    /// # Errors
    ///
    /// - [`DexError::ReentrantCall`] if another operation is in flight.
    /// - [`DexError::InvalidAmounts`] if either amount is zero.
    /// - [`DexError::InsufficientInitialLiquidity`] /
    ///   [`DexError::DepositTooSmall`] on dust deposits.
    /// - [`DexError::TransferFailed`] if either external pull fails.
    pub fn add_liquidity(
        &self,
        caller: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<LiquidityAdded> {
        let _scope = self.guard.enter()?;

        if caller.is_zero() {
            return Err(DexError::ZeroAccount);
        }
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(DexError::InvalidAmounts);
        }

        let snapshot = *self.reserves.borrow();
        let total = self.shares.borrow().total_shares();

        let minted = if total.is_zero() {
            liquidity::initial_shares(amount_a, amount_b)?
        } else {
            liquidity::proportional_shares(
                amount_a,
                amount_b,
                snapshot.reserve_a(),
                snapshot.reserve_b(),
                total,
            )?
        };

        // Dry-run the commit so no arithmetic can fail after the pulls.
        {
            let mut projected = snapshot;
            projected.apply_deposit(amount_a, amount_b)?;
            let _ = total
                .checked_add(&minted)
                .ok_or(DexError::Overflow("total shares overflow on deposit"))?;
        }

        self.ledger_a
            .transfer(caller, self.pool_account, amount_a)?;
        if let Err(err) = self.ledger_b.transfer(caller, self.pool_account, amount_b) {
            self.refund(&self.ledger_a, caller, amount_a);
            return Err(err);
        }

        self.reserves.borrow_mut().apply_deposit(amount_a, amount_b)?;
        self.shares.borrow_mut().mint(caller, minted)?;

        let record = LiquidityAdded {
            provider: caller,
            amount_a,
            amount_b,
            shares_minted: minted,
        };
        self.events
            .borrow_mut()
            .push(PoolEvent::LiquidityAdded(record));
        info!(
            provider = %caller,
            amount_a = %amount_a,
            amount_b = %amount_b,
            shares_minted = %minted,
            "liquidity added"
        );
        Ok(record)
    }

    /// Burns `share_amount` shares and pays out the proportional slice of
    /// both reserves (truncating; dust stays in the pool).
    ///
    /// The burn and the reserve decrement happen before the external
    /// pushes; if a push fails, the position is restored and any
    /// already-pushed funds are clawed back.
    ///
    /// A full withdrawal by the sole holder leaves reserves and total
    /// shares at exactly zero.
    ///
    /// # Errors
    ///
    /// - [`DexError::ReentrantCall`] if another operation is in flight.
    /// - [`DexError::InvalidShareAmount`] if `share_amount` is zero.
    /// - [`DexError::InsufficientShares`] if the caller under-holds.
    /// - [`DexError::TransferFailed`] if either external push fails.
    pub fn remove_liquidity(
        &self,
        caller: AccountId,
        share_amount: Shares,
    ) -> Result<LiquidityRemoved> {
        let _scope = self.guard.enter()?;

        if caller.is_zero() {
            return Err(DexError::ZeroAccount);
        }
        if share_amount.is_zero() {
            return Err(DexError::InvalidShareAmount);
        }
        if self.shares.borrow().balance_of(caller) < share_amount {
            return Err(DexError::InsufficientShares);
        }

        let snapshot = *self.reserves.borrow();
        let total = self.shares.borrow().total_shares();
        let (out_a, out_b) = liquidity::withdrawal_amounts(
            share_amount,
            snapshot.reserve_a(),
            snapshot.reserve_b(),
            total,
        )?;

        // Debit shares and reserves before the external pushes: a
        // reentrant share operation fired from inside a push must find
        // the position already gone, or it could spend it twice.
        self.shares.borrow_mut().burn(caller, share_amount)?;
        if let Err(err) = self.reserves.borrow_mut().apply_withdrawal(out_a, out_b) {
            if let Err(mint_err) = self.shares.borrow_mut().mint(caller, share_amount) {
                warn!(error = %mint_err, account = %caller, "share restore failed");
            }
            return Err(err);
        }

        if let Err(err) = self.ledger_a.transfer(self.pool_account, caller, out_a) {
            self.restore_position(caller, share_amount, out_a, out_b);
            return Err(err);
        }
        if let Err(err) = self.ledger_b.transfer(self.pool_account, caller, out_b) {
            // Claw the first push back so external balances net to zero.
            if let Err(refund_err) = self.ledger_a.transfer(caller, self.pool_account, out_a) {
                warn!(error = %refund_err, "withdrawal compensation failed");
            }
            self.restore_position(caller, share_amount, out_a, out_b);
            return Err(err);
        }

        let record = LiquidityRemoved {
            provider: caller,
            amount_a: out_a,
            amount_b: out_b,
            shares_burned: share_amount,
        };
        self.events
            .borrow_mut()
            .push(PoolEvent::LiquidityRemoved(record));
        info!(
            provider = %caller,
            amount_a = %out_a,
            amount_b = %out_b,
            shares_burned = %share_amount,
            "liquidity removed"
        );
        Ok(record)
    }

    /// Trades `amount_in` of `asset_in` for the constant-product output
    /// of `asset_out`.
    ///
    /// The 0.5% fee (at the default rate) is skimmed from the gross input
    /// and moved straight to the fee collector; only the net input enters
    /// the reserves. Effects order: pull fee → pull net input → push
    /// output → commit reserves.
    ///
    /// # Errors
    ///
    /// - [`DexError::ReentrantCall`] if another operation is in flight.
    /// - [`DexError::InvalidInputToken`] / [`DexError::InvalidOutputToken`]
    ///   for null or unregistered asset identities.
    /// - [`DexError::SameTokenSwap`] if both sides name the same asset.
    /// - [`DexError::InvalidAmount`] if `amount_in` is zero.
    /// - [`DexError::InsufficientLiquidity`] if the pool cannot cover the
    ///   output.
    /// - [`DexError::TransferFailed`] if any external transfer fails.
    pub fn swap(
        &self,
        caller: AccountId,
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: Amount,
    ) -> Result<Swapped> {
        let _scope = self.guard.enter()?;

        if caller.is_zero() {
            return Err(DexError::ZeroAccount);
        }
        if asset_in.is_zero() || !self.is_pool_asset(asset_in) {
            return Err(DexError::InvalidInputToken);
        }
        if asset_out.is_zero() || !self.is_pool_asset(asset_out) {
            return Err(DexError::InvalidOutputToken);
        }
        if asset_in == asset_out {
            return Err(DexError::SameTokenSwap);
        }

        let side = if asset_in == self.config.asset_a() {
            SwapSide::AToB
        } else {
            SwapSide::BToA
        };
        let (ledger_in, ledger_out) = match side {
            SwapSide::AToB => (&self.ledger_a, &self.ledger_b),
            SwapSide::BToA => (&self.ledger_b, &self.ledger_a),
        };

        let snapshot = *self.reserves.borrow();
        let (reserve_in, reserve_out) = match side {
            SwapSide::AToB => (snapshot.reserve_a(), snapshot.reserve_b()),
            SwapSide::BToA => (snapshot.reserve_b(), snapshot.reserve_a()),
        };

        let quote = swap::quote(amount_in, reserve_in, reserve_out, self.config.fee_rate())?;
        swap::check_product_monotone(reserve_in, reserve_out, quote.net_in, quote.amount_out)?;

        if !quote.fee.is_zero() {
            ledger_in.transfer(caller, self.config.fee_collector(), quote.fee)?;
        }
        if let Err(err) = ledger_in.transfer(caller, self.pool_account, quote.net_in) {
            self.refund_fee(ledger_in, caller, quote.fee);
            return Err(err);
        }
        if let Err(err) = ledger_out.transfer(self.pool_account, caller, quote.amount_out) {
            self.refund(ledger_in, caller, quote.net_in);
            self.refund_fee(ledger_in, caller, quote.fee);
            return Err(err);
        }

        self.reserves
            .borrow_mut()
            .apply_swap(side, quote.net_in, quote.amount_out)?;

        let record = Swapped {
            trader: caller,
            asset_in,
            asset_out,
            amount_in,
            amount_out: quote.amount_out,
            fee: quote.fee,
        };
        self.events.borrow_mut().push(PoolEvent::Swapped(record));
        info!(
            trader = %caller,
            asset_in = %asset_in,
            asset_out = %asset_out,
            amount_in = %amount_in,
            amount_out = %quote.amount_out,
            fee = %quote.fee,
            "swap executed"
        );
        Ok(record)
    }

    // -- share-ledger surface -----------------------------------------------

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// See [`ShareLedger::transfer`].
    pub fn transfer_shares(&self, from: AccountId, to: AccountId, amount: Shares) -> Result<()> {
        self.shares.borrow_mut().transfer(from, to, amount)
    }

    /// Sets the share allowance granted by `owner` to `spender`.
    ///
    /// # Errors
    ///
    /// See [`ShareLedger::approve`].
    pub fn approve_shares(
        &self,
        owner: AccountId,
        spender: AccountId,
        amount: Shares,
    ) -> Result<()> {
        self.shares.borrow_mut().approve(owner, spender, amount)
    }

    /// Moves `amount` shares from `owner` to `to` on `spender`'s
    /// authority, decrementing the allowance.
    ///
    /// # Errors
    ///
    /// See [`ShareLedger::transfer_from`].
    pub fn transfer_shares_from(
        &self,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Shares,
    ) -> Result<()> {
        self.shares
            .borrow_mut()
            .transfer_from(spender, owner, to, amount)
    }

    // -- queries --------------------------------------------------------------

    /// Returns the current reserves as `(reserve_a, reserve_b)`.
    #[must_use]
    pub fn reserves(&self) -> (Amount, Amount) {
        self.reserves.borrow().get()
    }

    /// Returns the total outstanding shares.
    #[must_use]
    pub fn total_shares(&self) -> Shares {
        self.shares.borrow().total_shares()
    }

    /// Returns the share balance of `account`.
    #[must_use]
    pub fn share_balance_of(&self, account: AccountId) -> Shares {
        self.shares.borrow().balance_of(account)
    }

    /// Returns the share allowance granted by `owner` to `spender`.
    #[must_use]
    pub fn share_allowance(&self, owner: AccountId, spender: AccountId) -> Shares {
        self.shares.borrow().allowance(owner, spender)
    }

    /// Returns the two registered asset identities as `(asset_a, asset_b)`.
    #[must_use]
    pub fn assets(&self) -> (AssetId, AssetId) {
        (self.config.asset_a(), self.config.asset_b())
    }

    /// Returns the fee collector identity.
    #[must_use]
    pub fn fee_collector(&self) -> AccountId {
        self.config.fee_collector()
    }

    /// Returns the swap fee rate.
    #[must_use]
    pub fn fee_rate(&self) -> FeeRate {
        self.config.fee_rate()
    }

    /// Returns the pool's custodial account on the external ledgers.
    #[must_use]
    pub fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    /// Returns a copy of the event log, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<PoolEvent> {
        self.events.borrow().clone()
    }

    // -- internals ------------------------------------------------------------

    fn is_pool_asset(&self, asset: AssetId) -> bool {
        asset == self.config.asset_a() || asset == self.config.asset_b()
    }

    /// Reverses a debited withdrawal after an external push failed.
    ///
    /// The debit just removed exactly these shares and amounts, so the
    /// reversal cannot overflow; a failure here is logged, not surfaced.
    fn restore_position(
        &self,
        caller: AccountId,
        share_amount: Shares,
        out_a: Amount,
        out_b: Amount,
    ) {
        if let Err(err) = self.shares.borrow_mut().mint(caller, share_amount) {
            warn!(error = %err, account = %caller, "share restore failed");
        }
        if let Err(err) = self.reserves.borrow_mut().apply_deposit(out_a, out_b) {
            warn!(error = %err, "reserve restore failed");
        }
    }

    /// Best-effort return of a pulled amount after a later transfer in
    /// the same operation failed.
    fn refund(&self, ledger: &Rc<dyn AssetLedger>, to: AccountId, amount: Amount) {
        if let Err(err) = ledger.transfer(self.pool_account, to, amount) {
            warn!(error = %err, account = %to, amount = %amount, "refund failed");
        }
    }

    /// Best-effort return of a skimmed fee after a later transfer in the
    /// same operation failed.
    fn refund_fee(&self, ledger: &Rc<dyn AssetLedger>, to: AccountId, amount: Amount) {
        if amount.is_zero() {
            return;
        }
        if let Err(err) = ledger.transfer(self.config.fee_collector(), to, amount) {
            warn!(error = %err, account = %to, amount = %amount, "fee refund failed");
        }
    }
}

impl core::fmt::Debug for Dex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dex")
            .field("config", &self.config)
            .field("pool_account", &self.pool_account)
            .field("reserves", &self.reserves.borrow())
            .field("total_shares", &self.shares.borrow().total_shares())
            .finish_non_exhaustive()
    }
}
