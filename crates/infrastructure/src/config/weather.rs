//! Weather service configuration.

use integration_weather::{PLACEHOLDER_API_KEY, WeatherConfig, WeatherUnits};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// OpenWeatherMap access settings
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherAppConfig {
    /// API base URL
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key
    ///
    /// Obtain from <https://openweathermap.org/api>
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Unit system (default: metric)
    #[serde(default)]
    pub units: WeatherUnits,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_base_url() -> String {
    WeatherConfig::default().base_url
}

const fn default_weather_timeout() -> u64 {
    10
}

impl Default for WeatherAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            api_key: None,
            units: WeatherUnits::default(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

impl WeatherAppConfig {
    /// Whether a usable API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| {
            let key = k.expose_secret().trim();
            !key.is_empty() && key != PLACEHOLDER_API_KEY
        })
    }

    /// Client configuration for the weather integration
    #[must_use]
    pub fn to_client_config(&self) -> WeatherConfig {
        WeatherConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            units: self.units,
            timeout_secs: self.timeout_secs,
        }
    }
}
