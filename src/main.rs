use clap::Parser;
use pool_quote::cli::{commands, Cli, Commands};
use pool_quote::core::{Config, SwapError};

#[tokio::main]
async fn main() -> Result<(), SwapError> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = Config::from_env()?;
    config.validate()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    match cli.command {
        Commands::Quote(args) => commands::quote::execute(args, &config).await?,
        Commands::Input(args) => commands::input::execute(args, &config).await?,
    }

    Ok(())
}
