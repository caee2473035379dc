//! OpenWeatherMap integration
//!
//! Client for the OpenWeatherMap 2.5 API (<https://openweathermap.org/api>).
//! Provides current conditions and the 5 day / 3 hour forecast feed for a
//! location given by name.

pub mod client;
mod models;

pub use client::{
    OpenWeatherMapClient, PLACEHOLDER_API_KEY, WeatherClient, WeatherConfig, WeatherError,
};
pub use models::{CurrentWeather, Forecast, ForecastEntry, WeatherUnits};
