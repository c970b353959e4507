use thiserror::Error;

pub type SwapResult<T> = Result<T, SwapError>;

#[derive(Error, Debug)]
pub enum SwapError {
    #[error("Pool balances are not loaded")]
    BalancesUnavailable,

    #[error("Amp does not exist in stable pool config")]
    MissingAmp,

    #[error("Unknown curve type: {0}")]
    UnknownCurve(String),

    #[error("Estimated amount exceeds pool output: requested {requested}, available {available}")]
    EstimatedAmountExceedsReserve { requested: u64, available: u64 },

    #[error("Invalid route: expected 1 or 2 pools, got {0}")]
    InvalidRoute(usize),

    #[error("Intermediary token account is required for a transitive swap")]
    MissingIntermediaryToken,

    #[error("Slippage of 100% leaves the required input undefined")]
    SlippageUndefined,

    #[error("Math overflow in calculation")]
    MathOverflow,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid slippage: {0}")]
    InvalidSlippage(String),

    #[error("No candidate route produced a quote")]
    NoQuotableRoute,

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for SwapError {
    fn from(err: serde_json::Error) -> Self {
        SwapError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for SwapError {
    fn from(err: std::io::Error) -> Self {
        SwapError::Io(err.to_string())
    }
}
