pub mod cache;
pub mod cli;
pub mod core;
pub mod pool;
pub mod quotes;
pub mod selection;
pub mod utils;

// Re-export commonly used types
pub use cache::BalanceCache;
pub use core::{Config, CurveType, QuoteSummary, SwapError, SwapResult, TokenAccountBalance};
pub use pool::{Pool, Pools, Route};
pub use quotes::{ConstantProductCurve, StableCurve, SwapCurve};
pub use selection::RouteSelector;
