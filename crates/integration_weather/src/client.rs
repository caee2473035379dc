//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap current weather and forecast endpoints.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    CurrentResponse, CurrentWeather, Forecast, ForecastEntry, ForecastResponse, WeatherUnits,
};

/// Key value shipped in sample configs; treated as "no key configured"
pub const PLACEHOLDER_API_KEY: &str = "YOUR_VALID_API_KEY_HERE";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No usable API key is configured
    #[error("Missing API key: set weather.api_key to a valid OpenWeatherMap key")]
    MissingApiKey,

    /// The HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API rejected the key
    #[error("Unauthorized: the weather service rejected the API key")]
    Unauthorized,

    /// The API does not know the location
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API base URL (default: <http://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (`appid` parameter)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Unit system (default: metric)
    #[serde(default)]
    pub units: WeatherUnits,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            units: WeatherUnits::default(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current weather for a named location
    async fn get_current(&self, location: &str) -> Result<CurrentWeather, WeatherError>;

    /// Get the 3-hourly forecast feed for a named location
    async fn get_forecast(&self, location: &str) -> Result<Forecast, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Unit system used for requests
    #[must_use]
    pub const fn units(&self) -> WeatherUnits {
        self.config.units
    }

    /// The configured API key, unless absent, blank or the placeholder
    fn api_key(&self) -> Result<&str, WeatherError> {
        let key = self
            .config
            .api_key
            .as_ref()
            .map(|k| k.expose_secret().trim())
            .unwrap_or_default();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(WeatherError::MissingApiKey);
        }
        Ok(key)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Send a GET with the standard query and decode the JSON body
    async fn fetch<T: DeserializeOwned>(&self, path: &str, location: &str) -> Result<T, WeatherError> {
        let key = self.api_key()?;
        let url = self.endpoint(path);
        debug!(url = %url, location = %location, "Fetching from weather service");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", key),
                ("units", self.config.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.without_url().to_string()))?;

        let response = Self::check_status(response, location)?;

        response
            .json::<T>()
            .await
            .map_err(|e| WeatherError::ParseError(e.without_url().to_string()))
    }

    fn check_status(response: Response, location: &str) -> Result<Response, WeatherError> {
        let status = response.status();
        match status {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(WeatherError::Unauthorized),
            StatusCode::NOT_FOUND => Err(WeatherError::LocationNotFound(location.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(WeatherError::RateLimitExceeded),
            s if s.is_server_error() => Err(WeatherError::ServiceUnavailable(format!("HTTP {s}"))),
            s => Err(WeatherError::RequestFailed(format!("HTTP {s}"))),
        }
    }

    /// Map the raw current-weather payload, requiring the `main` and `wind` blocks
    fn parse_current(raw: CurrentResponse) -> Result<CurrentWeather, WeatherError> {
        let main = raw
            .main
            .ok_or_else(|| WeatherError::ParseError("No 'main' block in response".to_string()))?;
        let wind = raw
            .wind
            .ok_or_else(|| WeatherError::ParseError("No 'wind' block in response".to_string()))?;
        let humidity = main
            .humidity
            .ok_or_else(|| WeatherError::ParseError("No humidity in response".to_string()))?;
        let pressure = main
            .pressure
            .ok_or_else(|| WeatherError::ParseError("No pressure in response".to_string()))?;

        Ok(CurrentWeather {
            location_name: raw.name,
            temperature: main.temp,
            humidity,
            wind_speed: wind.speed,
            pressure,
            condition: raw.weather.into_iter().next().map(|w| w.main),
        })
    }

    /// Map the raw forecast payload, deriving local times from the city offset
    fn parse_forecast(raw: ForecastResponse) -> Result<Forecast, WeatherError> {
        let (location_name, utc_offset_secs) = raw
            .city
            .map_or((None, 0), |c| (c.name, c.timezone.unwrap_or(0)));

        let offset = FixedOffset::east_opt(utc_offset_secs).ok_or_else(|| {
            WeatherError::ParseError(format!("Invalid UTC offset: {utc_offset_secs}"))
        })?;

        let entries = raw
            .list
            .into_iter()
            .map(|item| {
                let time: DateTime<Utc> = DateTime::from_timestamp(item.dt, 0).ok_or_else(|| {
                    WeatherError::ParseError(format!("Invalid timestamp: {}", item.dt))
                })?;
                Ok(ForecastEntry {
                    time,
                    local_time: time.with_timezone(&offset).naive_local(),
                    temperature: item.main.temp,
                    condition: item
                        .weather
                        .into_iter()
                        .next()
                        .map_or_else(|| "Unknown".to_string(), |w| w.main),
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        Ok(Forecast {
            location_name,
            utc_offset_secs,
            entries,
        })
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self))]
    async fn get_current(&self, location: &str) -> Result<CurrentWeather, WeatherError> {
        let raw: CurrentResponse = self.fetch("weather", location).await?;
        Self::parse_current(raw)
    }

    #[instrument(skip(self))]
    async fn get_forecast(&self, location: &str) -> Result<Forecast, WeatherError> {
        let raw: ForecastResponse = self.fetch("forecast", location).await?;
        Self::parse_forecast(raw)
    }
}
