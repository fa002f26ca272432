//! Derivation Chain report CLI
//!
//! Builds the derivation chain report for one time series against an
//! AQUARIUS Publish server and prints it as JSON.
//!
//! Usage:
//!   cargo run --bin derivation_chain -- \
//!     --series 3bd6d5f1c2b04c2e8fbd4e3ac5e0e2a1 \
//!     --config derivation_chain.yaml \
//!     --pretty
//!
//! Connection settings come from the config file and AQUARIUS_* environment
//! variables (a `.env` file is honoured).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use derivation_chain::{AquariusClient, Config, ReportBuilder, RequestParameters};

/// Derivation chain report for a time series
#[derive(Parser, Debug)]
#[command(name = "derivation_chain")]
#[command(about = "Discover and report the derivation chain of a time series")]
struct Args {
    /// Unique id of the primary time series
    #[arg(long, short = 's')]
    series: String,

    /// Requesting user recorded in the report
    #[arg(long, short = 'u', env = "USER", default_value = "unknown")]
    user: String,

    /// YAML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,derivation_chain=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    tracing::info!(base_url = %config.aquarius.base_url, "Using AQUARIUS Publish API");

    let client = Arc::new(AquariusClient::new(&config.aquarius)?);
    let builder = ReportBuilder::with_source(client, config.report);

    let report = builder
        .build_report(&RequestParameters::new(args.series), &args.user)
        .await?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
