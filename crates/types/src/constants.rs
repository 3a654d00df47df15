//! Protocol constants.

/// Fixed-point scale factor: prices and fractions carry 18 decimals.
pub const ONE: u128 = 1_000_000_000_000_000_000;

/// Upper bound for fraction-valued parameters (100%).
pub const MAX_PERCENTAGE: u128 = ONE;

/// Divisor applied to the capped deviation before computing a supply
/// change. Fixed 50% smoothing, not a governance parameter.
pub const SMOOTHING_DIVISOR: u128 = 2;
