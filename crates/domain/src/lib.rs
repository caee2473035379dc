//! Domain layer for WeatherDash
//!
//! Contains the rolling sample buffer, forecast aggregation, value objects
//! and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
