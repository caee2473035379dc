//! Entities and aggregates of the dashboard domain

mod forecast;
mod sample;
mod series_buffer;

pub use forecast::{DEFAULT_FORECAST_DAYS, ForecastDay, ForecastPoint, aggregate_forecast};
pub use sample::{Sample, SeriesField};
pub use series_buffer::{DEFAULT_MAX_SAMPLES, SeriesBuffer};
