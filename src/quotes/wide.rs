//! Wide integer helpers shared by the curve strategies.
//!
//! Reserve products overflow `u64` long before they overflow anything the
//! swap program cares about, so every intermediate runs on `BigInt` and only
//! final amounts are narrowed back to `u64`.

use crate::core::{SwapError, SwapResult};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

/// Widen a `u64` amount.
pub fn wide(value: u64) -> BigInt {
    BigInt::from(value)
}

/// Truncating division that yields zero for a zero divisor.
pub fn div_or_zero(dividend: &BigInt, divisor: &BigInt) -> BigInt {
    if divisor.is_zero() {
        return BigInt::zero();
    }
    dividend / divisor
}

/// Ceiling division as performed on-chain: a zero floor quotient stays zero.
pub fn ceil_div(dividend: &BigInt, divisor: &BigInt) -> BigInt {
    let quotient = div_or_zero(dividend, divisor);
    if quotient.is_zero() {
        return quotient;
    }

    if !(dividend % divisor).is_zero() {
        quotient + 1
    } else {
        quotient
    }
}

/// Narrow back to a token amount. Negative or oversized values are errors.
pub fn to_u64(value: &BigInt) -> SwapResult<u64> {
    value.to_u64().ok_or(SwapError::MathOverflow)
}

/// `a - b`, floored at zero.
pub fn saturating_sub(a: &BigInt, b: &BigInt) -> BigInt {
    if a <= b {
        BigInt::zero()
    } else {
        a - b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case(10, 5, 2 ; "exact division")]
    #[test_case(11, 5, 3 ; "rounds up remainder")]
    #[test_case(0, 5, 0 ; "zero dividend")]
    #[test_case(4, 5, 0 ; "zero floor quotient stays zero")]
    #[test_case(7, 0, 0 ; "zero divisor")]
    fn test_ceil_div(dividend: u64, divisor: u64, expected: u64) {
        assert_eq!(ceil_div(&wide(dividend), &wide(divisor)), wide(expected));
    }

    #[test]
    fn test_div_or_zero() {
        assert_eq!(div_or_zero(&wide(9), &wide(2)), wide(4));
        assert_eq!(div_or_zero(&wide(9), &BigInt::zero()), BigInt::zero());
        assert_eq!(div_or_zero(&BigInt::from(-9), &wide(2)), BigInt::from(-4));
    }

    #[test]
    fn test_to_u64_rejects_out_of_range() {
        assert_eq!(to_u64(&wide(u64::MAX)).unwrap(), u64::MAX);
        assert!(matches!(
            to_u64(&(wide(u64::MAX) + 1)),
            Err(SwapError::MathOverflow)
        ));
        assert!(matches!(
            to_u64(&BigInt::from(-1)),
            Err(SwapError::MathOverflow)
        ));
    }

    #[test]
    fn test_saturating_sub() {
        assert_eq!(saturating_sub(&wide(10), &wide(3)), wide(7));
        assert_eq!(saturating_sub(&wide(3), &wide(10)), BigInt::zero());
    }

    proptest! {
        #[test]
        fn prop_ceil_div_bounds(a in 1u64.., b in 1u64..) {
            let (wa, wb) = (wide(a), wide(b));
            let result = ceil_div(&wa, &wb);
            if !result.is_zero() {
                prop_assert!(&result * &wb >= wa);
                prop_assert!((&result - 1) * &wb < wa);
            } else {
                prop_assert!(a < b);
            }
        }
    }
}
