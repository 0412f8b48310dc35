//! Application configuration management.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger engine settings.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Chart of accounts: semantic role name to ledger account.
    #[serde(default)]
    pub chart: ChartConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Ledger engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Daily overdue penalty rate, in percent of the overdue amount per day.
    #[serde(default = "default_penalty_rate")]
    pub penalty_rate_per_day_percent: Decimal,
}

fn default_penalty_rate() -> Decimal {
    Decimal::new(1, 1) // 0.1% per day
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            penalty_rate_per_day_percent: default_penalty_rate(),
        }
    }
}

/// Chart of accounts configuration.
///
/// Keys are role names (`cash`, `loans-receivable`, ...); `snake_case`
/// spellings are accepted so roles can be set from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartConfig {
    /// Role name to ledger account ID.
    #[serde(default)]
    pub accounts: HashMap<String, Uuid>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "hearth=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("HEARTH").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
