//! Dashboard behavior configuration.

use std::time::Duration;

use domain::{DEFAULT_FORECAST_DAYS, DEFAULT_MAX_SAMPLES, DomainError, Location};
use serde::{Deserialize, Serialize};

use crate::adapters::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE};

/// Location, retention and refresh cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Location shown to sessions that have not searched yet
    #[serde(default = "default_location")]
    pub default_location: String,

    /// Number of samples kept in the rolling series
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,

    /// Browser reload delay of the web page in seconds
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    /// Number of upcoming forecast days shown
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,

    /// Delay between polls of the live terminal feed in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Upper bound on sessions with a remembered location
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,

    /// Seconds without a request after which a session is forgotten
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_location() -> String {
    "London".to_string()
}

const fn default_max_samples() -> usize {
    DEFAULT_MAX_SAMPLES
}

const fn default_refresh_secs() -> u64 {
    15
}

const fn default_forecast_days() -> usize {
    DEFAULT_FORECAST_DAYS
}

const fn default_poll_interval_secs() -> u64 {
    1
}

const fn default_max_sessions() -> u64 {
    DEFAULT_MAX_SESSIONS
}

const fn default_session_idle_secs() -> u64 {
    DEFAULT_SESSION_IDLE.as_secs()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_location: default_location(),
            max_samples: default_max_samples(),
            refresh_secs: default_refresh_secs(),
            forecast_days: default_forecast_days(),
            poll_interval_secs: default_poll_interval_secs(),
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

impl DashboardConfig {
    /// The default location as a validated value
    ///
    /// # Errors
    ///
    /// Returns an error if the configured name is blank.
    pub fn location(&self) -> Result<Location, DomainError> {
        Location::new(&self.default_location)
    }

    /// Delay between polls of the live terminal feed
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Idle time after which a session is forgotten
    #[must_use]
    pub const fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}
