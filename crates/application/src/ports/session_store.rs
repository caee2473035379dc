//! Session store port
//!
//! Remembers the last searched location per browser session.

use async_trait::async_trait;
use domain::{Location, SessionId};
#[cfg(test)]
use mockall::automock;

/// Port for session-scoped location storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The location stored for a session, if any
    async fn location(&self, session: &SessionId) -> Option<Location>;

    /// Store the location for a session, replacing any previous one
    async fn set_location(&self, session: SessionId, location: Location);

    /// Number of sessions with a stored location
    async fn session_count(&self) -> usize;
}
