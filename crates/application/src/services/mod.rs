//! Application services - Use case implementations

mod dashboard_service;
mod forecast_service;
mod location_service;

pub use dashboard_service::{DashboardService, DashboardSnapshot};
pub use forecast_service::{ForecastService, ForecastSummary};
pub use location_service::LocationService;
