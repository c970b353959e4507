use clap::{Args, Parser, Subcommand};

pub mod commands;
pub mod display;

#[derive(Parser)]
#[command(name = "pool-quote")]
#[command(about = "Offline swap quotes for token-swap pools and two-hop routes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Quote the output of swapping an amount along a route
    Quote(QuoteArgs),

    /// Find the input needed to receive a minimum output along a route
    Input(InputArgs),
}

/// Where pools and balances are read from.
#[derive(Args, Clone, Debug)]
pub struct SourceArgs {
    /// Pools JSON file (map of pool id to pool)
    #[arg(long, env = "POOLS_FILE")]
    pub pools: Option<String>,

    /// Balances JSON file (map of token account to balance)
    #[arg(long, env = "BALANCES_FILE")]
    pub balances: Option<String>,
}

#[derive(Parser)]
pub struct QuoteArgs {
    /// Candidate routes, each a comma-separated list of one or two pool ids
    /// (e.g. `USDC/SOL,SOL/ETH`). `B/A` selects pool `A/B` reversed
    #[arg(required = true)]
    pub routes: Vec<String>,

    /// Amount to swap (in token units, considering decimals)
    #[arg(short, long)]
    pub amount: f64,

    /// Slippage tolerance in basis points (default from config)
    #[arg(short, long)]
    pub slippage: Option<u16>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Parser)]
pub struct InputArgs {
    /// Candidate routes, each a comma-separated list of one or two pool ids
    /// (e.g. `USDC/SOL,SOL/ETH`). `B/A` selects pool `A/B` reversed
    #[arg(required = true)]
    pub routes: Vec<String>,

    /// Minimum amount to receive, in raw base units
    #[arg(short, long)]
    pub minimum_out: u64,

    /// Slippage tolerance in basis points (default from config)
    #[arg(short, long)]
    pub slippage: Option<u16>,

    #[command(flatten)]
    pub source: SourceArgs,
}
