//! Session location handling
//!
//! Resolves which location a browser session is looking at.

use std::sync::Arc;

use domain::{Location, SessionId};
use tracing::{debug, instrument};

use crate::ports::SessionStore;

/// Resolves and remembers per-session locations with a fallback default
pub struct LocationService {
    store: Arc<dyn SessionStore>,
    default_location: Location,
}

impl std::fmt::Debug for LocationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationService")
            .field("store", &"<SessionStore>")
            .field("default_location", &self.default_location)
            .finish()
    }
}

impl LocationService {
    /// Create a service falling back to `default_location`
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, default_location: Location) -> Self {
        Self {
            store,
            default_location,
        }
    }

    /// Location used when a session has none stored
    #[must_use]
    pub const fn default_location(&self) -> &Location {
        &self.default_location
    }

    /// The session's stored location, or the default
    pub async fn resolve(&self, session: &SessionId) -> Location {
        self.store
            .location(session)
            .await
            .unwrap_or_else(|| self.default_location.clone())
    }

    /// Store a submitted location for the session and return the one in effect
    ///
    /// Blank input keeps whatever the session had before.
    #[instrument(skip(self))]
    pub async fn remember(&self, session: SessionId, input: &str) -> Location {
        match Location::new(input) {
            Ok(location) => {
                debug!(%session, %location, "Stored session location");
                self.store.set_location(session, location.clone()).await;
                location
            },
            Err(e) => {
                debug!(%session, error = %e, "Ignoring submitted location");
                self.resolve(&session).await
            },
        }
    }
}
