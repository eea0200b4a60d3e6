//! Property-based tests using `proptest` for the pool's invariants.
//!
//! Covers the engine-wide properties:
//!
//! 1. **Product monotonicity** — the reserve product never decreases
//!    across a swap.
//! 2. **Exact fee skim** — the collector receives exactly
//!    `floor(amount_in * 5 / 1000)` and the pool custody the rest.
//! 3. **Reserve direction** — the input reserve strictly increases and
//!    the output reserve strictly decreases on every swap.
//! 4. **Sole-holder round trip** — deposit then full withdrawal returns
//!    the exact deposited amounts and zeroes the pool.
//! 5. **Swap round trip loses value** — A→B→A never returns more than
//!    the original input.
//! 6. **External conservation** — operations move value between
//!    accounts; each asset ledger's total supply is unchanged.

#![allow(clippy::panic)]

use std::rc::Rc;

use proptest::prelude::*;

use crate::config::DexConfig;
use crate::domain::{AccountId, Amount, AssetId, FeeRate};
use crate::ledger::{AssetLedger, InMemoryAssetLedger};
use crate::pool::Dex;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn asset_a() -> AssetId {
    AssetId::from_bytes([1u8; 32])
}

fn asset_b() -> AssetId {
    AssetId::from_bytes([2u8; 32])
}

fn provider() -> AccountId {
    AccountId::from_bytes([0xaa; 32])
}

fn trader() -> AccountId {
    AccountId::from_bytes([0xbb; 32])
}

fn collector() -> AccountId {
    AccountId::from_bytes([0xfe; 32])
}

struct Harness {
    dex: Dex,
    ledger_a: Rc<InMemoryAssetLedger>,
    ledger_b: Rc<InMemoryAssetLedger>,
}

/// Fresh pool seeded with `(ra, rb)` by the provider; the trader is
/// funded with `trader_funds` of each asset.
fn seeded(ra: u128, rb: u128, trader_funds: u128) -> Harness {
    let ledger_a = Rc::new(InMemoryAssetLedger::new(asset_a()));
    let ledger_b = Rc::new(InMemoryAssetLedger::new(asset_b()));
    let Ok(()) = ledger_a.mint(provider(), Amount::new(ra)) else {
        panic!("mint failed");
    };
    let Ok(()) = ledger_b.mint(provider(), Amount::new(rb)) else {
        panic!("mint failed");
    };
    let Ok(()) = ledger_a.mint(trader(), Amount::new(trader_funds)) else {
        panic!("mint failed");
    };
    let Ok(()) = ledger_b.mint(trader(), Amount::new(trader_funds)) else {
        panic!("mint failed");
    };

    let Ok(config) = DexConfig::new(asset_a(), asset_b(), collector(), FeeRate::SWAP_DEFAULT)
    else {
        panic!("valid config");
    };
    let Ok(dex) = Dex::new(
        config,
        AccountId::from_bytes([0xdd; 32]),
        ledger_a.clone(),
        ledger_b.clone(),
    ) else {
        panic!("valid dex");
    };
    let Ok(_) = dex.add_liquidity(provider(), Amount::new(ra), Amount::new(rb)) else {
        panic!("seed deposit failed");
    };
    Harness {
        dex,
        ledger_a,
        ledger_b,
    }
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Swap inputs that are meaningful against the reserve range.
fn swap_in_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=1_000_000u128
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // -- Property 1: product monotonicity -----------------------------------

    #[test]
    fn prop_product_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in swap_in_strategy(),
    ) {
        let h = seeded(ra, rb, amount_in);
        let k_before = ra * rb;
        if h.dex
            .swap(trader(), asset_a(), asset_b(), Amount::new(amount_in))
            .is_err()
        {
            return Ok(());
        }
        let (new_a, new_b) = h.dex.reserves();
        let k_after = new_a.get() * new_b.get();
        prop_assert!(
            k_after >= k_before,
            "product decreased: before={k_before} after={k_after}"
        );
    }

    // -- Property 2: exact fee skim -----------------------------------------

    #[test]
    fn prop_fee_skimmed_exactly(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in swap_in_strategy(),
    ) {
        let h = seeded(ra, rb, amount_in);
        let pool = h.dex.pool_account();
        let Ok(record) = h
            .dex
            .swap(trader(), asset_a(), asset_b(), Amount::new(amount_in))
        else {
            return Ok(());
        };
        let expected_fee = amount_in * 5 / 1000;
        prop_assert_eq!(record.fee.get(), expected_fee);
        prop_assert_eq!(h.ledger_a.balance_of(collector()).get(), expected_fee);
        // Only the net input reached custody.
        prop_assert_eq!(
            h.ledger_a.balance_of(pool).get(),
            ra + (amount_in - expected_fee)
        );
    }

    // -- Property 3: strict reserve direction -------------------------------

    #[test]
    fn prop_reserves_move_strictly(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in swap_in_strategy(),
    ) {
        let h = seeded(ra, rb, amount_in);
        if h.dex
            .swap(trader(), asset_b(), asset_a(), Amount::new(amount_in))
            .is_err()
        {
            return Ok(());
        }
        let (new_a, new_b) = h.dex.reserves();
        prop_assert!(new_b.get() > rb, "input reserve did not increase");
        prop_assert!(new_a.get() < ra, "output reserve did not decrease");
    }

    // -- Property 4: sole-holder round trip ---------------------------------

    #[test]
    fn prop_sole_holder_full_exit_is_exact(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
    ) {
        let h = seeded(ra, rb, 0);
        let minted = h.dex.share_balance_of(provider());
        let Ok(removed) = h.dex.remove_liquidity(provider(), minted) else {
            panic!("full exit failed");
        };
        prop_assert_eq!(removed.amount_a.get(), ra);
        prop_assert_eq!(removed.amount_b.get(), rb);
        let (res_a, res_b) = h.dex.reserves();
        prop_assert!(res_a.is_zero() && res_b.is_zero());
        prop_assert!(h.dex.total_shares().is_zero());
        prop_assert_eq!(h.ledger_a.balance_of(provider()).get(), ra);
        prop_assert_eq!(h.ledger_b.balance_of(provider()).get(), rb);
    }

    // -- Property 5: swap round trip loses value ----------------------------

    #[test]
    fn prop_round_trip_loses_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in swap_in_strategy(),
    ) {
        let h = seeded(ra, rb, amount_in);
        let Ok(forward) = h
            .dex
            .swap(trader(), asset_a(), asset_b(), Amount::new(amount_in))
        else {
            return Ok(());
        };
        let Ok(back) = h
            .dex
            .swap(trader(), asset_b(), asset_a(), forward.amount_out)
        else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out.get() <= amount_in,
            "round trip gained value: in={} back={}",
            amount_in,
            back.amount_out.get()
        );
    }

    // -- Property 6: external conservation ----------------------------------

    #[test]
    fn prop_ledger_supply_conserved(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        amount_in in swap_in_strategy(),
    ) {
        let h = seeded(ra, rb, amount_in);
        let supply_a = h.ledger_a.total_supply();
        let supply_b = h.ledger_b.total_supply();
        let _ = h
            .dex
            .swap(trader(), asset_a(), asset_b(), Amount::new(amount_in));
        let minted = h.dex.share_balance_of(provider());
        let _ = h.dex.remove_liquidity(provider(), minted);
        prop_assert_eq!(h.ledger_a.total_supply(), supply_a);
        prop_assert_eq!(h.ledger_b.total_supply(), supply_b);
    }
}
