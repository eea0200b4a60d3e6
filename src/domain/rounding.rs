//! Explicit rounding direction for integer division.

/// Specifies the rounding direction for division on domain types.
///
/// Every division in the engine takes an explicit `Rounding` parameter so
/// that truncation is a visible decision, never an accident. The pool
/// math itself always rounds [`Rounding::Down`] (remainders stay in the
/// pool); [`Rounding::Up`] is part of the [`Amount`](super::Amount)
/// division API for callers that need ceiling semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}
