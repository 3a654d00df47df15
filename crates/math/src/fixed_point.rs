//! Percentage arithmetic at 1e18 scale.

use crate::big_int::mul_div_u128;
use elastic_types::constants::ONE;
use elastic_types::{RebaseError, RebaseResult};

/// |a - b|
pub fn absolute_difference(a: u128, b: u128) -> u128 {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

/// `value * fraction / 1e18`, truncating toward zero
pub fn percentage_of(value: u128, fraction: u128) -> RebaseResult<u128> {
    mul_div_u128(value, fraction, ONE)
}

/// Relative deviation of `observed` from `target` as a 1e18-scale fraction:
/// `|observed - target| * 1e18 / target`.
///
/// Truncation rounds deviations down, never up; reproducibility depends on
/// that direction.
pub fn relative_deviation(observed: u128, target: u128) -> RebaseResult<u128> {
    if target == 0 {
        return Err(RebaseError::DivisionByZero);
    }
    mul_div_u128(absolute_difference(observed, target), ONE, target)
}
