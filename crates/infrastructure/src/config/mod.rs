//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `weather`: OpenWeatherMap access
//! - `dashboard`: Location, retention and refresh cadence

mod dashboard;
mod server;
mod weather;

use serde::Deserialize;

pub use dashboard::DashboardConfig;
pub use server::{LogFormat, ServerConfig};
pub use weather::WeatherAppConfig;

/// Prefix for environment overrides (e.g. `WEATHERDASH_SERVER__PORT`)
pub const ENV_PREFIX: &str = "WEATHERDASH";

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather service configuration
    #[serde(default)]
    pub weather: WeatherAppConfig,

    /// Dashboard behavior
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Sources in increasing precedence: built-in defaults, `config.toml`
    /// in the working directory, `WEATHERDASH_*` environment variables.
    /// Nested keys use a double underscore, e.g. `WEATHERDASH_WEATHER__API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value has the wrong type.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using `file` (without extension) as the optional file source
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or a value has the wrong type.
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("dashboard.default_location", "London")?
            // Load from file if exists
            .add_source(config::File::with_name(file).required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
