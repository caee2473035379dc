//! Weather service port
//!
//! Defines the interface for weather data retrieval.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use domain::{ForecastPoint, Location, Sample};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// One successful poll of the current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Place name as resolved by the weather service
    pub location_name: Option<String>,
    /// The measured values, stamped with the poll time
    pub sample: Sample,
    /// Weather category label (e.g. "Clouds")
    pub condition: Option<String>,
}

/// Raw multi-point forecast feed for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastFeed {
    /// Place name as resolved by the weather service
    pub location_name: Option<String>,
    /// Offset of the location's time zone from UTC in seconds
    pub utc_offset_secs: i32,
    /// Points in feed order, with local timestamps
    pub points: Vec<ForecastPoint>,
}

impl ForecastFeed {
    /// The calendar date at the forecast location at instant `now`
    #[must_use]
    pub fn local_today(&self, now: DateTime<Utc>) -> NaiveDate {
        (now + Duration::seconds(i64::from(self.utc_offset_secs))).date_naive()
    }
}

/// Port for weather service operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Poll the current conditions for a location
    async fn current(&self, location: &Location) -> Result<Observation, ApplicationError>;

    /// Fetch the forecast feed for a location
    async fn forecast(&self, location: &Location) -> Result<ForecastFeed, ApplicationError>;
}
