// Token swap program IDs (Mainnet)
pub const TOKEN_SWAP_V1_PROGRAM_ID: &str = "DjVE6JNiYqPL2QXyCUUh8rNjHrbz9hXHNYt99MQ59qw1";
pub const TOKEN_SWAP_V2_PROGRAM_ID: &str = "9W959DqEETiGZocYWCQPaJ6sBmUzgfxXfqGeTEdp3aQP";

// Curve type discriminants as published in the pool configs
pub const CONSTANT_PRODUCT_CURVE: &str = "ConstantProduct";
pub const STABLE_CURVE: &str = "Stable";

// Stable curve parameters (two-asset pools only)
pub const N_COINS: u64 = 2;
pub const N_COINS_SQUARED: u64 = 4;
pub const MAX_SOLVER_ITERATIONS: usize = 32;

// Route shape
pub const MAX_ROUTE_HOPS: usize = 2;

// Slippage Configuration
pub const DEFAULT_SLIPPAGE_BPS: u16 = 50; // 0.5%
pub const MAX_SLIPPAGE_BPS: u16 = 1000; // 10%
pub const BPS_DENOMINATOR: f64 = 10_000.0;

// Cache TTL in seconds
pub const BALANCE_CACHE_TTL: u64 = 30;

// Route selection
pub const PREFERS_DIRECT_SWAP: bool = true;

// Default input files
pub const DEFAULT_POOLS_FILE: &str = "pools.json";
pub const DEFAULT_BALANCES_FILE: &str = "balances.json";
