//! Forecast service
//!
//! Fetches the forecast feed and collapses it into upcoming days.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{DEFAULT_FORECAST_DAYS, ForecastDay, Location, aggregate_forecast};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::WeatherPort};

/// Aggregated forecast for a location
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    /// Place name as resolved by the weather service, or the location itself
    pub display_name: String,
    /// Upcoming days in feed order
    pub days: Vec<ForecastDay>,
}

/// Service producing per-day forecast aggregates
pub struct ForecastService {
    weather: Arc<dyn WeatherPort>,
    max_days: usize,
}

impl std::fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastService")
            .field("weather", &"<WeatherPort>")
            .field("max_days", &self.max_days)
            .finish()
    }
}

impl ForecastService {
    /// Create a service returning at most `max_days` days
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, max_days: usize) -> Self {
        Self { weather, max_days }
    }

    /// Create a service returning the default four days
    #[must_use]
    pub fn with_defaults(weather: Arc<dyn WeatherPort>) -> Self {
        Self::new(weather, DEFAULT_FORECAST_DAYS)
    }

    /// Upcoming days for `location`, relative to the current time
    ///
    /// # Errors
    ///
    /// Returns an error if the forecast feed cannot be fetched.
    pub async fn upcoming_days(
        &self,
        location: &Location,
    ) -> Result<ForecastSummary, ApplicationError> {
        self.upcoming_days_at(location, Utc::now()).await
    }

    /// Upcoming days for `location` as seen at instant `now`
    ///
    /// "Today" is taken in the location's own time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the forecast feed cannot be fetched.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn upcoming_days_at(
        &self,
        location: &Location,
        now: DateTime<Utc>,
    ) -> Result<ForecastSummary, ApplicationError> {
        let feed = self.weather.forecast(location).await?;
        let today = feed.local_today(now);
        let days = aggregate_forecast(&feed.points, today, self.max_days);

        debug!(points = feed.points.len(), days = days.len(), %today, "Aggregated forecast");

        Ok(ForecastSummary {
            display_name: feed
                .location_name
                .unwrap_or_else(|| location.to_string()),
            days,
        })
    }
}
