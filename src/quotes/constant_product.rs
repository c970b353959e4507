use crate::core::{SwapError, SwapResult};
use crate::quotes::wide::{ceil_div, div_or_zero, saturating_sub, to_u64, wide};
use crate::quotes::SwapCurve;

/// Constant product curve: x * y = k
pub struct ConstantProductCurve;

impl ConstantProductCurve {
    pub fn new() -> Self {
        Self
    }
}

impl SwapCurve for ConstantProductCurve {
    fn output(&self, input_less_fee: u64, reserve_in: u64, reserve_out: u64) -> SwapResult<u64> {
        let invariant = wide(reserve_in) * wide(reserve_out);
        let new_reserve_out = ceil_div(&invariant, &(wide(reserve_in) + wide(input_less_fee)));

        to_u64(&saturating_sub(&wide(reserve_out), &new_reserve_out))
    }

    fn input_less_fee(
        &self,
        output_amount: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> SwapResult<u64> {
        if output_amount > reserve_out {
            return Err(SwapError::EstimatedAmountExceedsReserve {
                requested: output_amount,
                available: reserve_out,
            });
        }

        let invariant = wide(reserve_in) * wide(reserve_out);
        let new_reserve_in = ceil_div(&invariant, &wide(reserve_out - output_amount));

        to_u64(&saturating_sub(&new_reserve_in, &wide(reserve_in)))
    }

    /// Marginal-price estimate, not a curve evaluation.
    fn base_output(
        &self,
        input_less_fee: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> SwapResult<u64> {
        to_u64(&div_or_zero(
            &(wide(input_less_fee) * wide(reserve_out)),
            &wide(reserve_in),
        ))
    }
}

impl Default for ConstantProductCurve {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_matches_on_chain_rounding() {
        let curve = ConstantProductCurve::new();

        // invariant 2e12, new reserve out = ceil(2e12 / 1_009_975) = 1_980_248
        let output = curve.output(9_975, 1_000_000, 2_000_000).unwrap();
        assert_eq!(output, 19_752);
    }

    #[test]
    fn test_output_never_negative() {
        let curve = ConstantProductCurve::new();
        assert_eq!(curve.output(0, 1_000_000, 2_000_000).unwrap(), 0);
        assert_eq!(curve.output(1, 1_000_000, 0).unwrap(), 0);
    }

    #[test]
    fn test_output_handles_reserves_beyond_u64_product() {
        let curve = ConstantProductCurve::new();
        let reserve = u64::MAX / 2;
        let output = curve.output(1_000_000, reserve, reserve).unwrap();
        assert!(output > 0 && output <= 1_000_000);
    }

    #[test]
    fn test_input_less_fee_inverts_output() {
        let curve = ConstantProductCurve::new();
        assert_eq!(
            curve.input_less_fee(19_752, 1_000_000, 2_000_000).unwrap(),
            9_975
        );
    }

    #[test]
    fn test_input_less_fee_rejects_excessive_output() {
        let curve = ConstantProductCurve::new();
        let result = curve.input_less_fee(2_000_001, 1_000_000, 2_000_000);
        assert!(matches!(
            result,
            Err(SwapError::EstimatedAmountExceedsReserve {
                requested: 2_000_001,
                available: 2_000_000
            })
        ));
    }

    #[test]
    fn test_base_output_is_linear() {
        let curve = ConstantProductCurve::new();
        assert_eq!(curve.base_output(9_975, 1_000_000, 2_000_000).unwrap(), 19_950);
        assert_eq!(curve.base_output(9_975, 0, 2_000_000).unwrap(), 0);
    }
}
