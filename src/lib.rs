//! # cpswap
//!
//! Constant-product exchange engine for one pair of externally-ledgered
//! assets: pooled reserves, proportional liquidity shares, and x·y = k
//! swaps with a fee skimmed to a collector account.
//!
//! The engine owns nothing but bookkeeping. The two pooled assets live on
//! external ledgers reached through the [`ledger::AssetLedger`]
//! capability; the engine holds them under a custodial pool account and
//! prices trades against its own reserve counters. Liquidity providers
//! receive transferable shares tracked by the built-in
//! [`ledger::ShareLedger`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use cpswap::config::DexConfig;
//! use cpswap::domain::{AccountId, Amount, AssetId, FeeRate};
//! use cpswap::ledger::InMemoryAssetLedger;
//! use cpswap::pool::Dex;
//!
//! // 1. Two external asset ledgers
//! let gold = AssetId::from_bytes([1u8; 32]);
//! let silver = AssetId::from_bytes([2u8; 32]);
//! let gold_ledger = Rc::new(InMemoryAssetLedger::new(gold));
//! let silver_ledger = Rc::new(InMemoryAssetLedger::new(silver));
//!
//! let alice = AccountId::from_bytes([0xaa; 32]);
//! gold_ledger.mint(alice, Amount::new(100_000)).expect("mint");
//! silver_ledger.mint(alice, Amount::new(100_000)).expect("mint");
//!
//! // 2. Configure and build the exchange
//! let config = DexConfig::new(
//!     gold,
//!     silver,
//!     AccountId::from_bytes([0xfe; 32]), // fee collector
//!     FeeRate::SWAP_DEFAULT,             // 5 / 1000
//! )
//! .expect("valid config");
//! let dex = Dex::new(
//!     config,
//!     AccountId::from_bytes([0xdd; 32]), // custodial pool account
//!     gold_ledger.clone(),
//!     silver_ledger.clone(),
//! )
//! .expect("valid dex");
//!
//! // 3. Seed the pool, then trade against it
//! dex.add_liquidity(alice, Amount::new(50_000), Amount::new(50_000))
//!     .expect("deposit");
//! let record = dex
//!     .swap(alice, gold, silver, Amount::new(1_000))
//!     .expect("swap");
//!
//! assert_eq!(record.fee.get(), 5); // floor(1_000 * 5 / 1000)
//! assert!(record.amount_out.get() > 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller     │  add_liquidity / remove_liquidity / swap
//! └──────┬──────┘
//!        │ &self (reentrancy-guarded)
//!        ▼
//! ┌─────────────┐
//! │     Dex      │  validates, sequences externals, commits state
//! └──────┬──────┘
//!        │                       │
//!        ▼                       ▼
//! ┌─────────────┐        ┌─────────────┐
//! │  Pool math   │        │   Ledgers    │  AssetLedger (external),
//! │ reserves /   │        │              │  ShareLedger (internal)
//! │ shares / k   │        └─────────────┘
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │   Domain     │  Amount, Shares, AccountId, AssetId, FeeRate, …
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`AccountId`](domain::AccountId), [`FeeRate`](domain::FeeRate), event records |
//! | [`config`] | [`DexConfig`](config::DexConfig): asset pair, fee collector, fee rate |
//! | [`ledger`] | [`AssetLedger`](ledger::AssetLedger) capability + [`ShareLedger`](ledger::ShareLedger) share accounting |
//! | [`pool`]   | [`Dex`](pool::Dex) coordinator, reserve state, liquidity and swap math |
//! | [`math`]   | Integer square root and mul-div helpers |
//! | [`error`]  | [`DexError`](error::DexError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
