//! Application state shared across handlers

use std::sync::Arc;

use application::{
    ports::{SessionStore, WeatherPort},
    services::{DashboardService, ForecastService, LocationService},
};
use infrastructure::{AppConfig, TemplateEngine};

use crate::error::ApiError;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Rolling series shared by all sessions
    pub dashboard: Arc<DashboardService>,
    /// Upcoming-days forecast
    pub forecast: Arc<ForecastService>,
    /// Per-session location lookup
    pub locations: Arc<LocationService>,
    /// Chart and page templates
    pub templates: TemplateEngine,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the services from their ports and the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default location is blank or the
    /// templates fail to compile.
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        sessions: Arc<dyn SessionStore>,
        config: AppConfig,
    ) -> Result<Self, ApiError> {
        let default_location = config
            .dashboard
            .location()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self {
            dashboard: Arc::new(DashboardService::new(
                Arc::clone(&weather),
                config.dashboard.max_samples,
            )),
            forecast: Arc::new(ForecastService::new(weather, config.dashboard.forecast_days)),
            locations: Arc::new(LocationService::new(sessions, default_location)),
            templates: TemplateEngine::new()?.with_units(config.weather.units),
            config: Arc::new(config),
        })
    }
}
