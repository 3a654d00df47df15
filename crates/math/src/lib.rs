//! # Fixed-Point Math
//!
//! Scaled (1e18-denominator) percentage arithmetic with explicit
//! overflow/underflow failure. Mul-div goes through a 256-bit intermediate
//! so a `u128 * u128` product never spuriously overflows, and every
//! division truncates toward zero.

pub mod big_int;
pub mod fixed_point;

pub use big_int::{mul_div_u128, widening_mul, U256};
pub use fixed_point::{absolute_difference, percentage_of, relative_deviation};
