use crate::core::{CurveType, FeeFraction, SwapError, SwapResult};
use crate::quotes::wide::{div_or_zero, to_u64, wide};

/// Fee charged on `base_amount` for a single fee fraction.
pub fn fee(base_amount: u64, numerator: u64, denominator: u64) -> SwapResult<u64> {
    if numerator == 0 {
        return Ok(0);
    }
    to_u64(&div_or_zero(
        &(wide(base_amount) * wide(numerator)),
        &wide(denominator),
    ))
}

/// Trading fee plus owner trade fee, as levied by the swap program on the input side.
pub fn total_fee(
    input_amount: u64,
    curve_type: &CurveType,
    trade_fee: FeeFraction,
    owner_trade_fee: FeeFraction,
) -> SwapResult<u64> {
    if let CurveType::Unknown(name) = curve_type {
        return Err(SwapError::UnknownCurve(name.clone()));
    }

    let trading_fee = fee(input_amount, trade_fee.numerator, trade_fee.denominator)?;
    let owner_fee = fee(
        input_amount,
        owner_trade_fee.numerator,
        owner_trade_fee.denominator,
    )?;

    trading_fee
        .checked_add(owner_fee)
        .ok_or(SwapError::MathOverflow)
}
