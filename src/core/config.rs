use crate::core::{constants::*, error::SwapResult, SwapError};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub pools_file: String,
    pub balances_file: String,
    pub default_slippage_bps: u16,
    pub max_slippage_bps: u16,
    pub balance_cache_ttl_secs: u64,
    pub prefers_direct_swap: bool,
}

impl Config {
    pub fn from_env() -> SwapResult<Self> {
        Ok(Self {
            pools_file: env::var("POOLS_FILE").unwrap_or_else(|_| DEFAULT_POOLS_FILE.to_string()),
            balances_file: env::var("BALANCES_FILE")
                .unwrap_or_else(|_| DEFAULT_BALANCES_FILE.to_string()),
            default_slippage_bps: env::var("DEFAULT_SLIPPAGE_BPS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(DEFAULT_SLIPPAGE_BPS),
            max_slippage_bps: env::var("MAX_SLIPPAGE_BPS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(MAX_SLIPPAGE_BPS),
            balance_cache_ttl_secs: env::var("BALANCE_CACHE_TTL_SECS")
                .unwrap_or_default()
                .parse()
                .unwrap_or(BALANCE_CACHE_TTL),
            prefers_direct_swap: env::var("PREFERS_DIRECT_SWAP")
                .unwrap_or_default()
                .parse()
                .unwrap_or(PREFERS_DIRECT_SWAP),
        })
    }

    pub fn validate(&self) -> SwapResult<()> {
        if self.max_slippage_bps > 10000 {
            return Err(SwapError::ConfigError(
                "Max slippage cannot exceed 100%".to_string(),
            ));
        }

        if self.default_slippage_bps > self.max_slippage_bps {
            return Err(SwapError::ConfigError(
                "Default slippage cannot exceed max slippage".to_string(),
            ));
        }

        if self.balance_cache_ttl_secs == 0 {
            return Err(SwapError::ConfigError(
                "Balance cache TTL must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Convert basis points into the slippage fraction used by the quoting math,
    /// rejecting anything above the configured maximum.
    pub fn slippage_fraction(&self, slippage_bps: u16) -> SwapResult<f64> {
        if slippage_bps > self.max_slippage_bps {
            return Err(SwapError::InvalidSlippage(format!(
                "{} bps exceeds the maximum of {} bps",
                slippage_bps, self.max_slippage_bps
            )));
        }
        Ok(slippage_bps as f64 / BPS_DENOMINATOR)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pools_file: DEFAULT_POOLS_FILE.to_string(),
            balances_file: DEFAULT_BALANCES_FILE.to_string(),
            default_slippage_bps: DEFAULT_SLIPPAGE_BPS,
            max_slippage_bps: MAX_SLIPPAGE_BPS,
            balance_cache_ttl_secs: BALANCE_CACHE_TTL,
            prefers_direct_swap: PREFERS_DIRECT_SWAP,
        }
    }
}
