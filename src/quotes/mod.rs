pub mod constant_product;
pub mod fee_calculator;
pub mod stable;
pub mod wide;

use crate::core::SwapResult;

pub use constant_product::ConstantProductCurve;
pub use stable::StableCurve;

/// Bonding curve strategy used by a pool.
///
/// All amounts are raw token units. `reserve_in` is the side the trader
/// pays into, `reserve_out` the side paid out.
pub trait SwapCurve: Send + Sync {
    /// Amount paid out for an input that already had its fees removed.
    fn output(&self, input_less_fee: u64, reserve_in: u64, reserve_out: u64) -> SwapResult<u64>;

    /// Input, before fees are added back, needed to receive `output_amount`.
    fn input_less_fee(
        &self,
        output_amount: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> SwapResult<u64>;

    /// Slippage-free reference output used for price impact.
    fn base_output(
        &self,
        input_less_fee: u64,
        reserve_in: u64,
        reserve_out: u64,
    ) -> SwapResult<u64>;
}
