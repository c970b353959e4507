use crate::core::{SwapError, SwapResult};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Convert a human amount (e.g. `1.5` SOL) into raw base units, truncating.
pub fn to_base_units(amount: f64, decimals: u8) -> SwapResult<u64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(SwapError::InvalidAmount(format!("{}", amount)));
    }

    let amount = Decimal::from_f64(amount)
        .ok_or_else(|| SwapError::InvalidAmount(format!("{}", amount)))?;
    let scale = 10u64
        .checked_pow(decimals as u32)
        .map(Decimal::from)
        .ok_or(SwapError::MathOverflow)?;

    amount
        .checked_mul(scale)
        .and_then(|units| units.trunc().to_u64())
        .ok_or(SwapError::MathOverflow)
}

/// Raw base units as a decimal token amount.
pub fn from_base_units(amount: u64, decimals: u8) -> Decimal {
    let mut value = Decimal::from(amount);
    // Decimal supports at most 28 fractional digits; token decimals never get close.
    if value.set_scale(decimals as u32).is_err() {
        return Decimal::from(amount);
    }
    value.normalize()
}

/// Format large numbers with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let mut count = 0;

    for ch in s.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}
