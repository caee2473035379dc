//! Rolling series buffer
//!
//! Keeps the most recent samples as five parallel series (time, temperature,
//! humidity, wind speed, pressure). The series only change by whole samples,
//! so they always have the same length.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use domain::{Sample, SeriesBuffer};
//!
//! let mut buffer = SeriesBuffer::new(2);
//! for temperature in [10.0, 11.0, 12.0] {
//!     buffer.append(Sample {
//!         timestamp: Utc::now(),
//!         temperature,
//!         humidity: 50.0,
//!         wind_speed: 1.0,
//!         pressure: 1013.0,
//!     });
//! }
//!
//! assert_eq!(buffer.len(), 2);
//! assert_eq!(buffer.temperatures().iter().copied().collect::<Vec<_>>(), vec![11.0, 12.0]);
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::sample::{Sample, SeriesField};

/// Default number of samples retained
pub const DEFAULT_MAX_SAMPLES: usize = 60;

/// Bounded FIFO history of samples stored column-wise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesBuffer {
    capacity: usize,
    timestamps: VecDeque<DateTime<Utc>>,
    temperatures: VecDeque<f64>,
    humidity: VecDeque<f64>,
    wind_speeds: VecDeque<f64>,
    pressures: VecDeque<f64>,
}

impl SeriesBuffer {
    /// Create an empty buffer holding at most `capacity` samples
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        // One spare slot: append pushes before it evicts.
        let slots = capacity + 1;
        Self {
            capacity,
            timestamps: VecDeque::with_capacity(slots),
            temperatures: VecDeque::with_capacity(slots),
            humidity: VecDeque::with_capacity(slots),
            wind_speeds: VecDeque::with_capacity(slots),
            pressures: VecDeque::with_capacity(slots),
        }
    }

    /// Append a sample to every series, evicting the oldest one when full
    pub fn append(&mut self, sample: Sample) {
        self.timestamps.push_back(sample.timestamp);
        self.temperatures.push_back(sample.temperature);
        self.humidity.push_back(sample.humidity);
        self.wind_speeds.push_back(sample.wind_speed);
        self.pressures.push_back(sample.pressure);

        if self.timestamps.len() > self.capacity {
            self.timestamps.pop_front();
            self.temperatures.pop_front();
            self.humidity.pop_front();
            self.wind_speeds.pop_front();
            self.pressures.pop_front();
        }
    }

    /// Remove every sample
    pub fn reset(&mut self) {
        self.timestamps.clear();
        self.temperatures.clear();
        self.humidity.clear();
        self.wind_speeds.clear();
        self.pressures.clear();
    }

    /// Number of samples currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the buffer holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Maximum number of samples retained
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sample timestamps in arrival order
    #[must_use]
    pub const fn timestamps(&self) -> &VecDeque<DateTime<Utc>> {
        &self.timestamps
    }

    /// Temperatures in arrival order
    #[must_use]
    pub const fn temperatures(&self) -> &VecDeque<f64> {
        &self.temperatures
    }

    /// Humidity values in arrival order
    #[must_use]
    pub const fn humidity(&self) -> &VecDeque<f64> {
        &self.humidity
    }

    /// Wind speeds in arrival order
    #[must_use]
    pub const fn wind_speeds(&self) -> &VecDeque<f64> {
        &self.wind_speeds
    }

    /// Pressures in arrival order
    #[must_use]
    pub const fn pressures(&self) -> &VecDeque<f64> {
        &self.pressures
    }

    /// The value series for one charted field
    #[must_use]
    pub const fn series(&self, field: SeriesField) -> &VecDeque<f64> {
        match field {
            SeriesField::Temperature => &self.temperatures,
            SeriesField::Humidity => &self.humidity,
            SeriesField::WindSpeed => &self.wind_speeds,
            SeriesField::Pressure => &self.pressures,
        }
    }

    /// Most recent sample, if any
    #[must_use]
    pub fn latest(&self) -> Option<Sample> {
        self.samples().next_back()
    }

    /// Iterate over whole samples in arrival order
    pub fn samples(
        &self,
    ) -> impl DoubleEndedIterator<Item = Sample> + ExactSizeIterator + '_ {
        self.timestamps
            .iter()
            .zip(&self.temperatures)
            .zip(&self.humidity)
            .zip(&self.wind_speeds)
            .zip(&self.pressures)
            .map(
                |((((timestamp, temperature), humidity), wind_speed), pressure)| Sample {
                    timestamp: *timestamp,
                    temperature: *temperature,
                    humidity: *humidity,
                    wind_speed: *wind_speed,
                    pressure: *pressure,
                },
            )
    }
}

impl Default for SeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SAMPLES)
    }
}
