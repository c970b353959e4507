pub mod route;

use crate::core::{
    CurveType, FeeFraction, SwapError, SwapResult, TokenAccountBalance,
    TOKEN_SWAP_V1_PROGRAM_ID, TOKEN_SWAP_V2_PROGRAM_ID,
};
use crate::quotes::fee_calculator;
use crate::quotes::wide::{div_or_zero, to_u64, wide};
use crate::quotes::{ConstantProductCurve, StableCurve, SwapCurve};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use route::Route;

/// Pools keyed by pool id, as published in the swap program's pool config.
pub type Pools = HashMap<String, Pool>;

/// Snapshot of a token-swap pool.
///
/// The numeric fields mirror the on-chain swap account. Balances are not part
/// of the config and are attached later with [`Pool::with_balances`], which
/// re-issues the pool instead of mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub account: String,
    pub authority: String,
    pub nonce: u64,
    pub pool_token_mint: String,
    pub token_account_a: String,
    pub token_account_b: String,
    pub fee_account: String,
    pub host_fee_account: Option<String>,
    pub fee_numerator: u64,
    pub fee_denominator: u64,
    pub owner_trade_fee_numerator: u64,
    pub owner_trade_fee_denominator: u64,
    pub owner_withdraw_fee_numerator: u64,
    pub owner_withdraw_fee_denominator: u64,
    pub host_fee_numerator: u64,
    pub host_fee_denominator: u64,
    pub token_a_name: String,
    pub token_b_name: String,
    pub curve_type: CurveType,
    pub amp: Option<u64>,
    pub program_version: Option<u64>,
    pub deprecated: Option<bool>,

    #[serde(skip)]
    pub token_a_balance: Option<TokenAccountBalance>,
    #[serde(skip)]
    pub token_b_balance: Option<TokenAccountBalance>,
}

/// Parse a `{ poolId: pool }` config document.
pub fn load_pools(json: &str) -> SwapResult<Pools> {
    let pools: Pools = serde_json::from_str(json)?;
    debug!("Loaded {} pool configs", pools.len());
    Ok(pools)
}

impl Pool {
    pub fn trade_fee(&self) -> FeeFraction {
        FeeFraction::new(self.fee_numerator, self.fee_denominator)
    }

    pub fn owner_trade_fee(&self) -> FeeFraction {
        FeeFraction::new(
            self.owner_trade_fee_numerator,
            self.owner_trade_fee_denominator,
        )
    }

    pub fn owner_withdraw_fee(&self) -> FeeFraction {
        FeeFraction::new(
            self.owner_withdraw_fee_numerator,
            self.owner_withdraw_fee_denominator,
        )
    }

    pub fn host_fee(&self) -> FeeFraction {
        FeeFraction::new(self.host_fee_numerator, self.host_fee_denominator)
    }

    pub fn is_stable(&self) -> bool {
        self.curve_type == CurveType::Stable
    }

    pub fn token_a_decimals(&self) -> Option<u8> {
        self.token_a_balance.map(|balance| balance.decimals)
    }

    pub fn token_b_decimals(&self) -> Option<u8> {
        self.token_b_balance.map(|balance| balance.decimals)
    }

    /// Program that executes swaps against this pool.
    pub fn swap_program_id(&self) -> &'static str {
        if self.program_version == Some(2) {
            TOKEN_SWAP_V2_PROGRAM_ID
        } else {
            TOKEN_SWAP_V1_PROGRAM_ID
        }
    }

    /// Check the config is quotable. Balances are not required here.
    pub fn validate(&self) -> SwapResult<()> {
        match &self.curve_type {
            CurveType::Stable if self.amp.is_none() => Err(SwapError::MissingAmp),
            CurveType::Unknown(name) => Err(SwapError::UnknownCurve(name.clone())),
            _ => Ok(()),
        }
    }

    /// Same pool with a fresh reserve snapshot.
    pub fn with_balances(
        &self,
        token_a_balance: TokenAccountBalance,
        token_b_balance: TokenAccountBalance,
    ) -> Pool {
        Pool {
            token_a_balance: Some(token_a_balance),
            token_b_balance: Some(token_b_balance),
            ..self.clone()
        }
    }

    /// Same pool traded in the opposite direction.
    ///
    /// Token accounts, names and balances always move together.
    pub fn reversed(&self) -> Pool {
        Pool {
            token_account_a: self.token_account_b.clone(),
            token_account_b: self.token_account_a.clone(),
            token_a_name: self.token_b_name.clone(),
            token_b_name: self.token_a_name.clone(),
            token_a_balance: self.token_b_balance,
            token_b_balance: self.token_a_balance,
            ..self.clone()
        }
    }

    /// Trading fee plus owner trade fee on `input_amount`.
    pub fn total_fee(&self, input_amount: u64) -> SwapResult<u64> {
        fee_calculator::total_fee(
            input_amount,
            &self.curve_type,
            self.trade_fee(),
            self.owner_trade_fee(),
        )
    }

    /// Amount received for `input_amount`, fees included.
    pub fn output_amount(&self, input_amount: u64) -> SwapResult<u64> {
        let fee = self.total_fee(input_amount)?;
        let input_amount_less_fee = input_amount.saturating_sub(fee);
        let output = self.curve_output(input_amount_less_fee)?;

        debug!(
            "Pool {} ({} -> {}): in={}, fee={}, out={}",
            self.account, self.token_a_name, self.token_b_name, input_amount, fee, output
        );

        Ok(output)
    }

    /// Input, fees included, needed to receive `estimated_output`.
    pub fn input_amount(&self, estimated_output: u64) -> SwapResult<u64> {
        let (reserve_in, reserve_out) = self.reserves()?;
        let input_amount_less_fee =
            self.curve()?
                .input_less_fee(estimated_output, reserve_in, reserve_out)?;

        self.gross_up(input_amount_less_fee)
    }

    /// Output after the slippage tolerance, truncated toward zero.
    ///
    /// The multiplication goes through `f64`, so outputs above 2^53 can be off
    /// by the float spacing at that magnitude.
    pub fn minimum_amount_out(&self, input_amount: u64, slippage: f64) -> SwapResult<u64> {
        let estimated_output = self.output_amount(input_amount)?;
        Ok((estimated_output as f64 * (1.0 - slippage)) as u64)
    }

    /// Input for an estimated output of `minimum_receive / (1 - slippage)`.
    pub fn input_amount_for(&self, minimum_receive: u64, slippage: f64) -> SwapResult<u64> {
        if slippage == 1.0 {
            return Err(SwapError::SlippageUndefined);
        }
        let estimated_output = (minimum_receive as f64 / (1.0 - slippage)) as u64;
        self.input_amount(estimated_output)
    }

    /// What the trader would receive with fees taken but no slippage.
    pub fn base_output_amount(&self, input_amount: u64) -> SwapResult<u64> {
        let (reserve_in, reserve_out) = self.reserves()?;
        let input_amount_less_fee = input_amount.saturating_sub(self.total_fee(input_amount)?);

        self.curve()?
            .base_output(input_amount_less_fee, reserve_in, reserve_out)
    }

    /// The fee on `input_amount`, valued in the output token.
    pub fn fees_in_output_token(&self, input_amount: u64) -> SwapResult<u64> {
        let fee = self.total_fee(input_amount)?;
        self.curve_output(fee)
    }

    fn curve_output(&self, input_amount_less_fee: u64) -> SwapResult<u64> {
        let (reserve_in, reserve_out) = self.reserves()?;
        self.curve()?
            .output(input_amount_less_fee, reserve_in, reserve_out)
    }

    fn reserves(&self) -> SwapResult<(u64, u64)> {
        match (self.token_a_balance, self.token_b_balance) {
            (Some(balance_a), Some(balance_b)) => Ok((balance_a.amount, balance_b.amount)),
            _ => Err(SwapError::BalancesUnavailable),
        }
    }

    fn curve(&self) -> SwapResult<Box<dyn SwapCurve>> {
        match &self.curve_type {
            CurveType::ConstantProduct => Ok(Box::new(ConstantProductCurve::new())),
            CurveType::Stable => {
                let amp = self.amp.ok_or(SwapError::MissingAmp)?;
                Ok(Box::new(StableCurve::new(amp)))
            }
            CurveType::Unknown(name) => Err(SwapError::UnknownCurve(name.clone())),
        }
    }

    // Add the trade fee (and owner fee, when configured) back onto a net input.
    fn gross_up(&self, input_amount_less_fee: u64) -> SwapResult<u64> {
        let fee_numerator = wide(self.fee_numerator);
        let fee_denominator = wide(self.fee_denominator);

        let (ratio_numerator, ratio_denominator) = if self.owner_trade_fee_denominator == 0 {
            (
                fee_denominator.clone(),
                wide(self.fee_denominator.saturating_sub(self.fee_numerator)),
            )
        } else {
            let owner_numerator = wide(self.owner_trade_fee_numerator);
            let owner_denominator = wide(self.owner_trade_fee_denominator);
            (
                &fee_denominator * &owner_denominator,
                &fee_denominator * &owner_denominator
                    - &fee_numerator * &owner_denominator
                    - &owner_numerator * &fee_denominator,
            )
        };

        to_u64(&div_or_zero(
            &(wide(input_amount_less_fee) * ratio_numerator),
            &ratio_denominator,
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn usdc_sol_pool() -> Pool {
        constant_product_pool("USDC", "SOL", 1_000_000, 2_000_000, (25, 10_000), (0, 0))
    }

    #[test]
    fn test_output_amount_constant_product() {
        assert_eq!(usdc_sol_pool().output_amount(10_000).unwrap(), 19_752);
    }

    #[test]
    fn test_input_amount_recovers_original_input() {
        let pool = usdc_sol_pool();
        let output = pool.output_amount(10_000).unwrap();
        assert_eq!(pool.input_amount(output).unwrap(), 10_000);
    }

    #[test]
    fn test_input_amount_with_owner_fee() {
        let pool = constant_product_pool("SOL", "ETH", 2_000_000, 500_000, (25, 10_000), (5, 10_000));
        let input = pool.input_amount(4_000).unwrap();
        assert_eq!(input, 16_178);
        assert_eq!(pool.output_amount(input).unwrap(), 4_000);
    }

    #[test]
    fn test_stable_pool_quotes() {
        let pool = stable_pool("USDC", "USDT", 1_000_000_000, 1_000_000_000, 100);
        assert_eq!(pool.output_amount(1_000_000).unwrap(), 998_991);
        assert_eq!(pool.input_amount(998_991).unwrap(), 1_000_000);
        assert_eq!(pool.base_output_amount(1_000_000).unwrap(), 999_000);
        assert_eq!(pool.fees_in_output_token(1_000_000).unwrap(), 1_000);

        let imbalanced = stable_pool("USDC", "USDT", 1_500_000_000, 500_000_000, 100);
        assert_eq!(imbalanced.output_amount(1_000_000).unwrap(), 981_746);
        // Gross-up covers trade and owner fee, so the forward quote lands back on target
        assert_eq!(imbalanced.input_amount(900_000).unwrap(), 916_730);
        assert_eq!(imbalanced.output_amount(916_730).unwrap(), 900_000);
        assert_eq!(imbalanced.base_output_amount(1_000_000).unwrap(), 988_155);
    }

    #[test]
    fn test_missing_balances_is_an_error() {
        let pool = Pool {
            token_b_balance: None,
            ..usdc_sol_pool()
        };
        assert!(matches!(
            pool.output_amount(10_000),
            Err(SwapError::BalancesUnavailable)
        ));
        assert!(matches!(
            pool.input_amount(10_000),
            Err(SwapError::BalancesUnavailable)
        ));
        assert!(matches!(
            pool.base_output_amount(10_000),
            Err(SwapError::BalancesUnavailable)
        ));
    }

    #[test]
    fn test_stable_pool_without_amp() {
        let pool = Pool {
            amp: None,
            ..stable_pool("USDC", "USDT", 1_000_000, 1_000_000, 100)
        };
        assert!(matches!(pool.validate(), Err(SwapError::MissingAmp)));
        assert!(matches!(pool.output_amount(1_000), Err(SwapError::MissingAmp)));
        assert!(matches!(pool.input_amount(1_000), Err(SwapError::MissingAmp)));
    }

    #[test]
    fn test_unknown_curve() {
        let pool = Pool {
            curve_type: CurveType::Unknown("Offset".to_string()),
            ..usdc_sol_pool()
        };
        assert!(matches!(pool.total_fee(1_000), Err(SwapError::UnknownCurve(_))));
        assert!(matches!(pool.output_amount(1_000), Err(SwapError::UnknownCurve(_))));
        assert!(matches!(pool.input_amount(1_000), Err(SwapError::UnknownCurve(_))));
    }

    #[test]
    fn test_estimated_amount_exceeds_reserve() {
        assert!(matches!(
            usdc_sol_pool().input_amount(2_000_001),
            Err(SwapError::EstimatedAmountExceedsReserve { .. })
        ));
    }

    #[test]
    fn test_minimum_amount_out() {
        let pool = usdc_sol_pool();
        assert_eq!(pool.minimum_amount_out(10_000, 0.0).unwrap(), 19_752);
        assert_eq!(pool.minimum_amount_out(10_000, 0.01).unwrap(), 19_554);
        assert_eq!(pool.minimum_amount_out(10_000, 1.0).unwrap(), 0);
    }

    #[test]
    fn test_input_amount_for() {
        let pool = usdc_sol_pool();
        assert!(matches!(
            pool.input_amount_for(19_554, 1.0),
            Err(SwapError::SlippageUndefined)
        ));

        // 19_554 / 0.99 truncates to an estimated output of 19_751
        assert_eq!(pool.input_amount_for(19_554, 0.01).unwrap(), 9_998);
        assert_eq!(pool.input_amount(19_751).unwrap(), 9_998);
    }

    #[test]
    fn test_slippage_float_path_near_2_pow_53() {
        let reserve = 1u64 << 60;
        let pool = constant_product_pool("BIG", "BIG2", reserve, reserve, (0, 10_000), (0, 0));

        // Odd output just below 2^53 survives the f64 intermediate exactly
        let input = (1u64 << 53) + 1;
        let output = pool.output_amount(input).unwrap();
        assert_eq!(output, 8_937_376_004_704_241);
        assert!(output < 1u64 << 53);
        assert_eq!(pool.minimum_amount_out(input, 0.0).unwrap(), output);
        assert_eq!(
            pool.input_amount_for(output, 0.0).unwrap(),
            pool.input_amount(output).unwrap()
        );

        // Above 2^53 odd outputs round to the nearest even value
        let input = (1u64 << 54) + 3;
        let output = pool.output_amount(input).unwrap();
        assert_eq!(output, 17_737_253_917_028_417);
        assert_eq!(pool.minimum_amount_out(input, 0.0).unwrap(), output - 1);

        let input = 1u64 << 54;
        let output = pool.output_amount(input).unwrap();
        assert_eq!(output, 17_737_253_917_028_415);
        assert_eq!(pool.minimum_amount_out(input, 0.0).unwrap(), output + 1);
    }

    #[test]
    fn test_reversed_swaps_sides_together() {
        let pool = usdc_sol_pool();
        let reversed = pool.reversed();

        assert_eq!(reversed.token_account_a, pool.token_account_b);
        assert_eq!(reversed.token_account_b, pool.token_account_a);
        assert_eq!(reversed.token_a_name, "SOL");
        assert_eq!(reversed.token_b_name, "USDC");
        assert_eq!(reversed.token_a_balance, pool.token_b_balance);
        assert_eq!(reversed.token_b_balance, pool.token_a_balance);
        assert_eq!(reversed.account, pool.account);
        assert_eq!(reversed.reversed(), pool);

        // 10_000 SOL in against 2_000_000 SOL / 1_000_000 USDC
        assert_eq!(reversed.output_amount(10_000).unwrap(), 4_962);
    }

    #[test]
    fn test_with_balances_reissues_pool() {
        let pool = Pool {
            token_a_balance: None,
            token_b_balance: None,
            ..usdc_sol_pool()
        };
        let loaded = pool.with_balances(
            TokenAccountBalance::new(1_000_000, 6),
            TokenAccountBalance::new(2_000_000, 9),
        );

        assert!(pool.token_a_balance.is_none());
        assert_eq!(loaded.token_a_decimals(), Some(6));
        assert_eq!(loaded.token_b_decimals(), Some(9));
        assert_eq!(loaded.output_amount(10_000).unwrap(), 19_752);
    }

    #[test]
    fn test_swap_program_id_by_version() {
        let pool = usdc_sol_pool();
        assert_eq!(pool.swap_program_id(), TOKEN_SWAP_V2_PROGRAM_ID);

        let legacy = Pool {
            program_version: None,
            ..pool
        };
        assert_eq!(legacy.swap_program_id(), TOKEN_SWAP_V1_PROGRAM_ID);
    }

    #[test]
    fn test_load_pools_from_config() {
        let json = r#"{
            "USDC/USDT[stable]": {
                "account": "pool-account",
                "authority": "pool-authority",
                "nonce": 254,
                "poolTokenMint": "lp-mint",
                "tokenAccountA": "vault-usdc",
                "tokenAccountB": "vault-usdt",
                "feeAccount": "fee-account",
                "hostFeeAccount": null,
                "feeNumerator": 4,
                "feeDenominator": 10000,
                "ownerTradeFeeNumerator": 6,
                "ownerTradeFeeDenominator": 10000,
                "ownerWithdrawFeeNumerator": 0,
                "ownerWithdrawFeeDenominator": 0,
                "hostFeeNumerator": 0,
                "hostFeeDenominator": 0,
                "tokenAName": "USDC",
                "tokenBName": "USDT",
                "curveType": "Stable",
                "amp": 100,
                "programVersion": 2
            }
        }"#;

        let pools = load_pools(json).unwrap();
        let pool = &pools["USDC/USDT[stable]"];

        assert!(pool.is_stable());
        assert_eq!(pool.amp, Some(100));
        assert_eq!(pool.trade_fee(), FeeFraction::new(4, 10_000));
        assert_eq!(pool.owner_trade_fee(), FeeFraction::new(6, 10_000));
        assert_eq!(pool.token_a_name, "USDC");
        assert!(pool.token_a_balance.is_none());
        assert!(pool.validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_inverse_never_under_compensates(input in 1_000u64..1_000_000) {
            let pool = constant_product_pool(
                "USDC", "SOL", 1_000_000_000, 2_000_000_000, (25, 10_000), (5, 10_000),
            );
            let output = pool.output_amount(input).unwrap();
            prop_assert!(pool.input_amount(output).unwrap() >= input);
        }
    }
}
