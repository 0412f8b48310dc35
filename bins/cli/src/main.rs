//! Hearth CLI
//!
//! Loan calculations over the ledger engine, printed as JSON.
//!
//! # Usage
//!
//! ```bash
//! hearth emi --principal 100000 --rate 15 --tenor 12
//! hearth schedule --principal 100000 --rate 15 --tenor 12 --start 2026-01-01
//! hearth payoff --principal 100000 --paid 40000 --rate 15 --disbursed 2026-01-01 --on 2026-07-01
//! hearth allocate --payment 9025.83 --principal 100000 --interest 1250 --penalty 70
//! hearth classify --principal 24000 --rate 12 --tenor 12 --start 2026-01-01 --today 2026-03-08
//! ```
//!
//! Configuration is read from `config/default.toml`, `config/{RUN_MODE}.toml`,
//! and `HEARTH__*` environment variables. Logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Invalid input or configuration

mod args;
mod commands;

use hearth_shared::AppConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = args::parse_args();
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        penalty_rate = %config.ledger.penalty_rate_per_day_percent,
        "Configuration loaded"
    );

    let output = commands::run(&args.command, config.ledger.penalty_rate_per_day_percent)?;
    println!("{output}");
    Ok(())
}
