//! ratepath CLI
//!
//! Lists known currencies and exchange edges, and converts amounts across
//! chains of exchange rates read from a JSON rate file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratepath_fx::{FxEngine, FxEngineConfig, JsonFileRateSource};

mod commands;

/// ratepath CLI
#[derive(Parser, Debug)]
#[command(name = "ratepath")]
#[command(about = "Multi-hop currency conversion over a rate file")]
struct Args {
    /// JSON rate file (overrides RATEPATH_RATES_FILE)
    #[arg(short, long, global = true)]
    rates: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every known currency
    Currencies,

    /// List every known exchange edge
    Exchanges,

    /// Convert an amount between two currencies
    Convert {
        /// Source currency code
        from: String,

        /// Target currency code
        to: String,

        /// Amount to convert
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let mut config = FxEngineConfig::from_env();
    if let Some(rates) = args.rates.clone() {
        config.rates_file = Some(rates);
    }

    // Initialize logging; stdout is reserved for command output.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(
            args.json_logs
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!args.json_logs)
                .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let rates_file = config
        .rates_file
        .clone()
        .ok_or_else(|| anyhow::anyhow!("No rate file given; pass --rates or set RATEPATH_RATES_FILE"))?;

    info!(rates_file = %rates_file.display(), "Starting ratepath");

    let source = Arc::new(JsonFileRateSource::new(rates_file));
    let engine = FxEngine::new(source, config);

    match commands::run(&engine, args.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", serde_json::to_string_pretty(&commands::error_body(&e))?);
            Ok(ExitCode::FAILURE)
        }
    }
}
