//! Live dashboard service
//!
//! Owns the process-wide rolling series and runs the poll → buffer cycle.
//! All sessions share one series; it follows whichever location was polled
//! last and starts over whenever that location changes.

use std::sync::Arc;

use domain::{DEFAULT_MAX_SAMPLES, Location, Sample, SeriesBuffer};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::ports::{Observation, WeatherPort};

/// State of the dashboard after one poll
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Location the series belongs to
    pub location: Location,
    /// Place name as resolved by the weather service, or the location itself
    pub display_name: String,
    /// Copy of the series at the end of the poll
    pub series: SeriesBuffer,
    /// Weather category of the last successful poll
    pub condition: Option<String>,
    /// Why this poll produced no sample, if it failed
    pub poll_error: Option<String>,
}

impl DashboardSnapshot {
    /// Whether this poll appended a sample
    #[must_use]
    pub const fn updated(&self) -> bool {
        self.poll_error.is_none()
    }

    /// Most recent sample in the series
    #[must_use]
    pub fn latest(&self) -> Option<Sample> {
        self.series.latest()
    }
}

#[derive(Debug)]
struct TrackedSeries {
    location: Option<Location>,
    display_name: Option<String>,
    condition: Option<String>,
    buffer: SeriesBuffer,
}

impl TrackedSeries {
    fn new(max_samples: usize) -> Self {
        Self {
            location: None,
            display_name: None,
            condition: None,
            buffer: SeriesBuffer::new(max_samples),
        }
    }

    /// Point the series at `location`, clearing it if that is a new place
    fn track(&mut self, location: &Location) {
        let same = self
            .location
            .as_ref()
            .is_some_and(|current| current.is_same_place(location));
        if same {
            return;
        }

        if let Some(previous) = &self.location {
            info!(from = %previous, to = %location, "Tracked location changed, resetting series");
        }
        self.buffer.reset();
        self.display_name = None;
        self.condition = None;
        self.location = Some(location.clone());
    }

    fn record(&mut self, observation: Observation) {
        self.buffer.append(observation.sample);
        if observation.location_name.is_some() {
            self.display_name = observation.location_name;
        }
        self.condition = observation.condition;
    }

    fn snapshot(&self, location: &Location, poll_error: Option<String>) -> DashboardSnapshot {
        DashboardSnapshot {
            location: location.clone(),
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| location.to_string()),
            series: self.buffer.clone(),
            condition: self.condition.clone(),
            poll_error,
        }
    }
}

/// Poll → buffer cycle over a shared, mutex-guarded series
pub struct DashboardService {
    weather: Arc<dyn WeatherPort>,
    tracked: Mutex<TrackedSeries>,
}

impl std::fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tracked = self.tracked.lock();
        f.debug_struct("DashboardService")
            .field("weather", &"<WeatherPort>")
            .field("location", &tracked.location)
            .field("samples", &tracked.buffer.len())
            .finish()
    }
}

impl DashboardService {
    /// Create a service retaining at most `max_samples` samples
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, max_samples: usize) -> Self {
        Self {
            weather,
            tracked: Mutex::new(TrackedSeries::new(max_samples)),
        }
    }

    /// Create a service with the default retention of 60 samples
    #[must_use]
    pub fn with_defaults(weather: Arc<dyn WeatherPort>) -> Self {
        Self::new(weather, DEFAULT_MAX_SAMPLES)
    }

    /// Poll once for `location` and fold the result into the series
    ///
    /// A failed poll leaves the series untouched and is reported through
    /// [`DashboardSnapshot::poll_error`]; it never fails the call.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn poll(&self, location: &Location) -> DashboardSnapshot {
        // The lock is only taken once the request has completed.
        let result = self.weather.current(location).await;

        let mut tracked = self.tracked.lock();
        tracked.track(location);

        let poll_error = match result {
            Ok(observation) => {
                tracked.record(observation);
                debug!(samples = tracked.buffer.len(), "Appended sample");
                None
            },
            Err(e) => {
                warn!(error = %e, "Failed to retrieve current weather data, keeping existing series");
                Some(e.to_string())
            },
        };

        tracked.snapshot(location, poll_error)
    }

    /// Snapshot of the series without polling
    #[must_use]
    pub fn snapshot(&self) -> Option<DashboardSnapshot> {
        let tracked = self.tracked.lock();
        tracked
            .location
            .as_ref()
            .map(|location| tracked.snapshot(location, None))
    }

    /// The location the series currently belongs to
    #[must_use]
    pub fn tracked_location(&self) -> Option<Location> {
        self.tracked.lock().location.clone()
    }

    /// Number of samples currently held
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.tracked.lock().buffer.len()
    }

    /// Drop all samples and forget the tracked location
    pub fn reset(&self) {
        let mut tracked = self.tracked.lock();
        tracked.buffer.reset();
        tracked.location = None;
        tracked.display_name = None;
        tracked.condition = None;
    }
}
