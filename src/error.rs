//! Unified error types for the engine.
//!
//! All fallible operations across the crate return [`DexError`], split
//! along the failure taxonomy the engine observes: input validation
//! (rejected before any external call), external-dependency failures
//! (asset ledger refused a transfer), invariant failures (arithmetic that
//! would create or destroy value), and the reentrancy rejection. No
//! failure is retried internally; every one surfaces synchronously.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, DexError>;

/// Error type for every fallible engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DexError {
    // -- input validation ---------------------------------------------------
    /// A liquidity deposit specified a zero amount for either asset.
    #[error("invalid amounts: both deposit amounts must be positive")]
    InvalidAmounts,

    /// The first deposit is too small: its share count rounds to zero,
    /// which would permanently lock a non-withdrawable pool.
    #[error("insufficient initial liquidity: first deposit mints zero shares")]
    InsufficientInitialLiquidity,

    /// A follow-on deposit is too small: the proportional mint truncates
    /// to zero shares, so accepting it would confiscate the funds.
    #[error("deposit too small to mint any shares")]
    DepositTooSmall,

    /// A withdrawal specified zero shares.
    #[error("invalid share amount: must be positive")]
    InvalidShareAmount,

    /// The swap input asset is the null identity or not a pool asset.
    #[error("invalid input token")]
    InvalidInputToken,

    /// The swap output asset is the null identity or not a pool asset.
    #[error("invalid output token")]
    InvalidOutputToken,

    /// The swap input and output assets are the same.
    #[error("cannot swap same token")]
    SameTokenSwap,

    /// A swap specified a zero input amount.
    #[error("invalid amount: swap input must be positive")]
    InvalidAmount,

    /// A share transfer or mint targeted the null identity.
    #[error("zero account: operation requires a real counterparty")]
    ZeroAccount,

    /// Configuration rejected at construction time.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),

    // -- ledger failures ----------------------------------------------------
    /// A share-ledger operation exceeded the holder's balance.
    #[error("insufficient share balance")]
    InsufficientShares,

    /// A delegated share transfer exceeded the granted allowance.
    #[error("insufficient share allowance")]
    InsufficientAllowance,

    /// An external asset ledger refused to move funds.
    #[error("asset transfer failed: {0}")]
    TransferFailed(&'static str),

    // -- invariant failures -------------------------------------------------
    /// The pool cannot cover the computed output for this trade.
    #[error("insufficient liquidity for requested swap")]
    InsufficientLiquidity,

    /// Arithmetic overflow or underflow in reserve/share computation.
    /// Fatal for the current operation; never silently clamped.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in reserve/share computation.
    #[error("division by zero")]
    DivisionByZero,

    /// A post-condition on reserves failed (constant product decreased or
    /// a reserve moved in the wrong direction).
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    // -- concurrency --------------------------------------------------------
    /// A mutating entry point was re-entered while another mutating
    /// operation was in flight.
    #[error("reentrant call")]
    ReentrantCall,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        assert_eq!(DexError::SameTokenSwap.to_string(), "cannot swap same token");
        assert_eq!(DexError::InvalidInputToken.to_string(), "invalid input token");
        assert_eq!(DexError::ReentrantCall.to_string(), "reentrant call");
    }

    #[test]
    fn context_is_carried() {
        let e = DexError::Overflow("reserve_a overflow on add");
        assert!(e.to_string().contains("reserve_a overflow on add"));
    }

    #[test]
    fn errors_compare_by_value() {
        assert_eq!(DexError::InvalidAmounts, DexError::InvalidAmounts);
        assert_ne!(DexError::InvalidAmounts, DexError::InvalidAmount);
    }
}
