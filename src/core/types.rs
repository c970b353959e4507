use crate::core::constants::{CONSTANT_PRODUCT_CURVE, STABLE_CURVE};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Curve discriminant as published by the swap program.
///
/// Unrecognized discriminants are kept rather than rejected at parse time,
/// so a pool config with a future curve still loads and only fails once it
/// is asked for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CurveType {
    ConstantProduct,
    Stable,
    Unknown(String),
}

impl From<String> for CurveType {
    fn from(value: String) -> Self {
        match value.as_str() {
            CONSTANT_PRODUCT_CURVE => CurveType::ConstantProduct,
            STABLE_CURVE => CurveType::Stable,
            _ => CurveType::Unknown(value),
        }
    }
}

impl From<CurveType> for String {
    fn from(value: CurveType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveType::ConstantProduct => write!(f, "{}", CONSTANT_PRODUCT_CURVE),
            CurveType::Stable => write!(f, "{}", STABLE_CURVE),
            CurveType::Unknown(name) => write!(f, "{}", name),
        }
    }
}

/// A fee expressed as `numerator / denominator` of the traded amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeFraction {
    pub numerator: u64,
    pub denominator: u64,
}

impl FeeFraction {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

/// Reserve snapshot of one pool token account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAccountBalance {
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: u64,
    pub decimals: u8,
}

impl TokenAccountBalance {
    pub fn new(amount: u64, decimals: u8) -> Self {
        Self { amount, decimals }
    }
}

// RPC balance responses carry the raw amount as a string.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(u64),
        Text(String),
    }

    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(amount) => Ok(amount),
        RawAmount::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

/// What the first hop of a transitive route produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntermediaryTokenInfo {
    pub token_name: String,
    pub estimated_output: u64,
    pub min_amount_out: u64,
    pub is_next_hop_stable: bool,
}

/// Amounts and accounts for one swap instruction of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapLeg {
    pub pool_account: String,
    pub program_id: String,
    pub source: String,
    pub destination: String,
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}

/// Everything the CLI shows for a forward quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteSummary {
    pub route: Vec<String>,
    pub amount_in: u64,
    pub amount_out: u64,
    pub min_amount_out: u64,
    pub liquidity_provider_fees: Vec<u64>,
    pub price_impact: Decimal,
    pub intermediary: Option<IntermediaryTokenInfo>,
}
