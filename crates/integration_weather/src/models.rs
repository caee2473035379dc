//! Weather data models
//!
//! Public types returned by the client and the raw OpenWeatherMap payloads
//! they are parsed from.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit system requested from the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherUnits {
    /// Celsius, m/s
    #[default]
    Metric,
    /// Fahrenheit, mph
    Imperial,
    /// Kelvin, m/s
    Standard,
}

impl WeatherUnits {
    /// Value of the `units` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Standard => "standard",
        }
    }

    /// Temperature unit suffix
    #[must_use]
    pub const fn temperature_symbol(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
            Self::Standard => "K",
        }
    }

    /// Wind speed unit
    #[must_use]
    pub const fn wind_speed_symbol(self) -> &'static str {
        match self {
            Self::Metric | Self::Standard => "m/s",
            Self::Imperial => "mph",
        }
    }
}

impl fmt::Display for WeatherUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current weather observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Place name as resolved by the API
    pub location_name: Option<String>,
    /// Temperature
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed
    pub wind_speed: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Weather category label (e.g. "Clouds")
    pub condition: Option<String>,
}

/// One entry of the forecast feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast time (UTC)
    pub time: DateTime<Utc>,
    /// Forecast time in the location's local time zone
    pub local_time: NaiveDateTime,
    /// Temperature
    pub temperature: f64,
    /// Weather category label (e.g. "Rain")
    pub condition: String,
}

/// Forecast feed for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Place name as resolved by the API
    pub location_name: Option<String>,
    /// Offset of the location's time zone from UTC in seconds
    pub utc_offset_secs: i32,
    /// Entries in feed order
    pub entries: Vec<ForecastEntry>,
}

// ============================================================================
// Raw API payloads
// ============================================================================

/// `GET /weather` response
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub main: Option<MainBlock>,
    #[serde(default)]
    pub wind: Option<WindBlock>,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainBlock {
    pub temp: f64,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindBlock {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionBlock {
    pub main: String,
}

/// `GET /forecast` response
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastItem>,
    #[serde(default)]
    pub city: Option<CityBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastItem {
    pub dt: i64,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CityBlock {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub timezone: Option<i32>,
}
