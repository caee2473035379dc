//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Location name is empty or unusable
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Session identifier could not be parsed
    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),
}
