//! A single weather observation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// When the observation was taken (poll time)
    pub timestamp: DateTime<Utc>,
    /// Temperature (°C, °F or K depending on the requested units)
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Wind speed (m/s, or mph with imperial units)
    pub wind_speed: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
}

/// The four charted value series of a [`Sample`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesField {
    /// Temperature (°C, °F or K depending on the requested units)
    Temperature,
    /// Relative humidity in %
    Humidity,
    /// Wind speed (m/s, or mph with imperial units)
    WindSpeed,
    /// Atmospheric pressure in hPa
    Pressure,
}

impl SeriesField {
    /// All fields, in chart panel order
    pub const ALL: [Self; 4] = [
        Self::Temperature,
        Self::Humidity,
        Self::WindSpeed,
        Self::Pressure,
    ];

    /// Read this field from a sample
    #[must_use]
    pub const fn value_of(self, sample: &Sample) -> f64 {
        match self {
            Self::Temperature => sample.temperature,
            Self::Humidity => sample.humidity,
            Self::WindSpeed => sample.wind_speed,
            Self::Pressure => sample.pressure,
        }
    }
}
