use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::{TracingGuards, init_tracing};
pub use settings::{AnalyticsSettings, Config, Paths, Portfolio, ServerSettings, WatcherSettings};

#[cfg(feature = "clap")]
pub use settings::ConfigArgs;

/// The file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "equitywatch.toml";

/// Prefix for environment overrides, e.g. `EQUITYWATCH__WATCHER__POLL_INTERVAL_MS`.
pub const ENV_PREFIX: &str = "EQUITYWATCH";

/// Loads the application configuration.
///
/// Built-in defaults are layered under the TOML file at `path` (optional, a
/// missing file is not an error) and environment variables on top. The result
/// is validated before it is returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let load_error = |source| ConfigError::Load {
        path: path.to_path_buf(),
        source,
    };

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .map_err(load_error)?;

    // Every section carries serde defaults, so an empty source still deserializes.
    let config = builder.try_deserialize::<Config>().map_err(load_error)?;
    config.validate()?;

    Ok(config)
}
