use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// The root configuration structure shared by the watcher and the web server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub portfolio: Portfolio,
    pub watcher: WatcherSettings,
    pub analytics: AnalyticsSettings,
    pub server: ServerSettings,
}

/// Locations of the files shared with the trading process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Account-state document written by the trading process.
    pub status_file: PathBuf,
    /// Derived-metrics document, written only by the watcher.
    pub metrics_file: PathBuf,
    /// Append-only trade ledger (CSV).
    pub trade_ledger: PathBuf,
    /// Directory for rotated log files.
    pub log_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    /// Starting capital. Floor for the high-water-mark and base for total return.
    pub initial_capital: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WatcherSettings {
    pub poll_interval_ms: u64,
    /// Pause after a failed cycle before polling resumes.
    pub error_cooldown_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Annualisation factor for the Sharpe ratio. 365 assumes daily observations.
    pub periods_per_year: u32,
    /// Number of ledger rows exposed in the report, newest first.
    pub recent_trades: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    /// Route of the single informational endpoint.
    pub report_path: String,
}

// --- Default Implementations ---
// These mirror the deployment the trading process expects, so every section
// may be omitted from the toml.

impl Default for Paths {
    fn default() -> Self {
        Self {
            status_file: PathBuf::from("status.json"),
            metrics_file: PathBuf::from("metrics.json"),
            trade_ledger: PathBuf::from("data.csv"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            initial_capital: dec!(100000),
        }
    }
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            error_cooldown_ms: 5000,
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            periods_per_year: 365,
            recent_trades: 50,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            report_path: "/live-quant-strategy-doge".to_string(),
        }
    }
}

impl WatcherSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn error_cooldown(&self) -> Duration {
        Duration::from_millis(self.error_cooldown_ms)
    }
}

impl Config {
    /// Rejects settings that would make the derived statistics meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.portfolio.initial_capital <= Decimal::ZERO {
            return Err(ConfigError::Validation(
                "portfolio.initial_capital must be greater than 0".to_string(),
            ));
        }
        if self.watcher.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "watcher.poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.analytics.periods_per_year == 0 {
            return Err(ConfigError::Validation(
                "analytics.periods_per_year must be greater than 0".to_string(),
            ));
        }
        if self.analytics.recent_trades == 0 {
            return Err(ConfigError::Validation(
                "analytics.recent_trades must be greater than 0".to_string(),
            ));
        }
        let path = &self.server.report_path;
        if !path.starts_with('/') || path == "/" {
            return Err(ConfigError::Validation(format!(
                "server.report_path must be an absolute path other than '/', got '{path}'"
            )));
        }
        Ok(())
    }
}

/// Command-line arguments shared by every binary that needs the configuration.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file.
    #[arg(long, short, default_value = crate::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.watcher.poll_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analytics.periods_per_year = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.analytics.recent_trades = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.report_path = "/".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.server.report_path = "report".to_string();
        assert!(config.validate().is_err());
    }
}
