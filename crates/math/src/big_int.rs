//! 256-bit intermediates for mul-div.
//!
//! Only the operations the rebase math needs are implemented. Division
//! always truncates toward zero; the rounding direction is part of the
//! mechanism's contract and must not change.

use elastic_types::{RebaseError, RebaseResult};

/// 256-bit unsigned integer built from two u128 halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U256 {
    /// Low 128 bits
    pub lo: u128,
    /// High 128 bits
    pub hi: u128,
}

impl U256 {
    pub const fn new(lo: u128, hi: u128) -> Self {
        Self { lo, hi }
    }

    pub const fn from_u128(value: u128) -> Self {
        Self { lo: value, hi: 0 }
    }

    pub const fn is_zero(&self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Convert to u128, returning None if the value needs the high half
    pub fn to_u128(&self) -> Option<u128> {
        if self.hi == 0 {
            Some(self.lo)
        } else {
            None
        }
    }

    /// Checked addition
    pub fn checked_add(&self, other: &U256) -> Option<U256> {
        let (lo, carry) = self.lo.overflowing_add(other.lo);
        let hi = self.hi.checked_add(other.hi)?.checked_add(carry as u128)?;
        Some(U256::new(lo, hi))
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: &U256) -> Option<U256> {
        let (lo, borrow) = self.lo.overflowing_sub(other.lo);
        let hi = self.hi.checked_sub(other.hi)?.checked_sub(borrow as u128)?;
        Some(U256::new(lo, hi))
    }

    fn bit(&self, index: u32) -> bool {
        if index < 128 {
            (self.lo >> index) & 1 == 1
        } else {
            (self.hi >> (index - 128)) & 1 == 1
        }
    }

    fn set_bit(&mut self, index: u32) {
        if index < 128 {
            self.lo |= 1 << index;
        } else {
            self.hi |= 1 << (index - 128);
        }
    }

    fn shl1(&self) -> U256 {
        U256::new(self.lo << 1, (self.hi << 1) | (self.lo >> 127))
    }

    /// Truncating division, None for a zero divisor.
    ///
    /// Shift-subtract long division; the remainder stays below the divisor,
    /// so it always fits in 256 bits.
    pub fn div(&self, divisor: &U256) -> Option<U256> {
        if divisor.is_zero() {
            return None;
        }
        if self.lt(divisor) {
            return Some(U256::default());
        }
        if self.hi == 0 && divisor.hi == 0 {
            return Some(U256::from_u128(self.lo / divisor.lo));
        }

        let mut quotient = U256::default();
        let mut remainder = U256::default();
        for index in (0..256).rev() {
            remainder = remainder.shl1();
            if self.bit(index) {
                remainder.lo |= 1;
            }
            if !remainder.lt(divisor) {
                remainder = remainder.checked_sub(divisor)?;
                quotient.set_bit(index);
            }
        }
        Some(quotient)
    }

    /// Compare if self < other
    pub fn lt(&self, other: &U256) -> bool {
        self.hi < other.hi || (self.hi == other.hi && self.lo < other.lo)
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.hi.cmp(&other.hi) {
            std::cmp::Ordering::Equal => self.lo.cmp(&other.lo),
            ordering => ordering,
        }
    }
}

/// Multiply two u128 values into a full 256-bit product
pub fn widening_mul(a: u128, b: u128) -> U256 {
    // Split into 64-bit parts for multiplication
    let a_lo = a as u64 as u128;
    let a_hi = a >> 64;
    let b_lo = b as u64 as u128;
    let b_hi = b >> 64;

    let lo_lo = a_lo * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_lo = a_hi * b_lo;
    let hi_hi = a_hi * b_hi;

    // Cross products can carry out of 128 bits; fold the carries into hi.
    let (mid, mid_carry) = lo_hi.overflowing_add(hi_lo);
    let (lo, lo_carry) = lo_lo.overflowing_add(mid << 64);
    let hi = hi_hi + (mid >> 64) + ((mid_carry as u128) << 64) + lo_carry as u128;

    U256::new(lo, hi)
}

/// `a * b / denominator` with a 256-bit intermediate, truncating toward zero.
///
/// Fails with `DivisionByZero` for a zero denominator and `MathOverflow`
/// when the quotient does not fit in u128.
pub fn mul_div_u128(a: u128, b: u128, denominator: u128) -> RebaseResult<u128> {
    if denominator == 0 {
        return Err(RebaseError::DivisionByZero);
    }

    let product = widening_mul(a, b);
    let quotient = product
        .div(&U256::from_u128(denominator))
        .ok_or(RebaseError::DivisionByZero)?;

    quotient.to_u128().ok_or(RebaseError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_basic_ops() {
        let a = U256::from_u128(100);
        let b = U256::from_u128(200);

        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.to_u128().unwrap(), 300);

        let diff = b.checked_sub(&a).unwrap();
        assert_eq!(diff.to_u128().unwrap(), 100);

        assert!(a.lt(&b));
        assert!(b.checked_sub(&b).unwrap().is_zero());
    }

    #[test]
    fn test_widening_mul_full_product() {
        let product = widening_mul(u128::MAX, u128::MAX);
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(product.lo, 1);
        assert_eq!(product.hi, u128::MAX - 1);

        let product = widening_mul(u128::MAX, 2);
        assert_eq!(product.lo, u128::MAX - 1);
        assert_eq!(product.hi, 1);
    }

    #[test]
    fn test_div_with_wide_dividend() {
        // (u128::MAX * 4) / 2 == u128::MAX * 2, which still needs the high half
        let product = widening_mul(u128::MAX, 4);
        let quotient = product.div(&U256::from_u128(2)).unwrap();
        assert_eq!(quotient, widening_mul(u128::MAX, 2));

        // Dividing back down fits in u128 again
        let narrow = product.div(&U256::from_u128(4)).unwrap();
        assert_eq!(narrow.to_u128().unwrap(), u128::MAX);
    }

    #[test]
    fn test_div_by_large_divisor() {
        // Divisor wider than 64 bits must still divide exactly
        let divisor = u128::MAX / 3;
        let product = widening_mul(divisor, 9);
        let quotient = product.div(&U256::from_u128(9)).unwrap();
        assert_eq!(quotient.to_u128().unwrap(), divisor);
    }

    #[test]
    fn test_mul_div_truncates_toward_zero() {
        assert_eq!(mul_div_u128(10, 3, 4).unwrap(), 7); // 30 / 4 = 7.5
        assert_eq!(mul_div_u128(1, 1, 2).unwrap(), 0);
        assert_eq!(mul_div_u128(10, 4, 5).unwrap(), 8); // exact
    }

    #[test]
    fn test_mul_div_errors() {
        assert_eq!(
            mul_div_u128(1, 1, 0).unwrap_err(),
            RebaseError::DivisionByZero
        );
        // Quotient exceeds u128
        assert_eq!(
            mul_div_u128(u128::MAX, 3, 2).unwrap_err(),
            RebaseError::MathOverflow
        );
    }

    #[test]
    fn test_mul_div_large_numbers() {
        let a = u128::MAX / 2;
        let result = mul_div_u128(a, 2, 2).unwrap();
        assert_eq!(result, a);
    }
}
