use anyhow::Result;
use clap::Parser;
use fxbridge::RatesSource;
use fxbridge::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,

    /// Serve built-in fixed rates instead of querying openexchangerates.org
    #[arg(long)]
    fixed_rates: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let source = if cli.fixed_rates {
        RatesSource::Fixed
    } else {
        RatesSource::OpenExchange
    };
    let result = fxbridge::run(cli.config_path.as_deref(), source).await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
