//! Application layer - Use cases and orchestration
//!
//! Contains the poll → buffer cycle, forecast aggregation use case and the
//! port definitions adapters implement.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
