//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::{ForecastFeed, Observation, WeatherPort};
use async_trait::async_trait;
use chrono::Utc;
use domain::{ForecastPoint, Location, Sample};
use integration_weather::{
    CurrentWeather, Forecast, OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for weather services using the OpenWeatherMap API
pub struct WeatherAdapter {
    client: Box<dyn WeatherClient>,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &"<WeatherClient>")
            .finish()
    }
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: impl WeatherClient + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::MissingApiKey | WeatherError::Unauthorized => {
                ApplicationError::Configuration(err.to_string())
            },
            WeatherError::LocationNotFound(name) => ApplicationError::NotFound(name),
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            WeatherError::ParseError(e) => {
                ApplicationError::ExternalService(format!("Malformed response: {e}"))
            },
        }
    }

    /// Stamp the current conditions with the poll time
    fn map_current(current: CurrentWeather) -> Observation {
        Observation {
            location_name: current.location_name,
            sample: Sample {
                timestamp: Utc::now(),
                temperature: current.temperature,
                humidity: current.humidity,
                wind_speed: current.wind_speed,
                pressure: current.pressure,
            },
            condition: current.condition,
        }
    }

    fn map_forecast(forecast: Forecast) -> ForecastFeed {
        ForecastFeed {
            location_name: forecast.location_name,
            utc_offset_secs: forecast.utc_offset_secs,
            points: forecast
                .entries
                .into_iter()
                .map(|entry| ForecastPoint {
                    time: entry.local_time,
                    condition: entry.condition,
                    temperature: entry.temperature,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(location = %location))]
    async fn current(&self, location: &Location) -> Result<Observation, ApplicationError> {
        let result = self
            .client
            .get_current(location.as_str())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(current) => {
                debug!(
                    temperature = current.temperature,
                    humidity = current.humidity,
                    wind_speed = current.wind_speed,
                    pressure = current.pressure,
                    "Retrieved current weather"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current weather");
            },
        }

        result.map(Self::map_current)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn forecast(&self, location: &Location) -> Result<ForecastFeed, ApplicationError> {
        let result = self
            .client
            .get_forecast(location.as_str())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(forecast) => {
                debug!(points = forecast.entries.len(), "Retrieved weather forecast");
            },
            Err(e) => {
                debug!(error = %e, "Failed to get weather forecast");
            },
        }

        result.map(Self::map_forecast)
    }
}
