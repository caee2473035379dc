//! WeatherDash HTTP presentation layer
//!
//! Serves the auto-refreshing dashboard page and a health endpoint.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
