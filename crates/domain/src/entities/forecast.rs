//! Forecast aggregation
//!
//! Collapses a multi-point forecast feed (one point every few hours) into one
//! record per upcoming calendar day: the mean temperature and the most
//! frequent weather category of that day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Default number of upcoming days produced by [`aggregate_forecast`]
pub const DEFAULT_FORECAST_DAYS: usize = 4;

/// A single point of a forecast feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Local time the point refers to
    pub time: NaiveDateTime,
    /// Weather category label (e.g. "Rain", "Clouds")
    pub condition: String,
    /// Temperature in °C
    pub temperature: f64,
}

/// Aggregate of all forecast points of one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date of the bucket
    pub date: NaiveDate,
    /// Arithmetic mean of the bucket's temperatures
    pub average_temperature: f64,
    /// Most frequent category label in the bucket
    pub condition: String,
    /// Number of forecast points that went into this day
    pub points: usize,
}

impl ForecastDay {
    /// Average temperature rounded to the nearest whole degree
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rounded_temperature(&self) -> i64 {
        self.average_temperature.round() as i64
    }

    /// Short display label, e.g. "Mon, Jan 15"
    #[must_use]
    pub fn label(&self) -> String {
        self.date.format("%a, %b %d").to_string()
    }

    /// Emoji for the dominant condition
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self.condition.as_str() {
            "Clear" => "☀️",
            "Clouds" => "☁️",
            "Rain" => "🌧️",
            "Drizzle" => "🌦️",
            "Thunderstorm" => "⛈️",
            "Snow" => "❄️",
            "Mist" | "Fog" | "Haze" | "Smoke" | "Dust" | "Sand" | "Ash" => "🌫️",
            "Squall" | "Tornado" => "🌪️",
            _ => "❓",
        }
    }
}

#[derive(Debug)]
struct Bucket<'a> {
    date: NaiveDate,
    temperature_sum: f64,
    count: usize,
    // label counts in first-seen order
    labels: Vec<(&'a str, usize)>,
}

impl<'a> Bucket<'a> {
    const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            temperature_sum: 0.0,
            count: 0,
            labels: Vec::new(),
        }
    }

    fn add(&mut self, point: &'a ForecastPoint) {
        self.temperature_sum += point.temperature;
        self.count += 1;
        match self
            .labels
            .iter_mut()
            .find(|(label, _)| *label == point.condition)
        {
            Some((_, n)) => *n += 1,
            None => self.labels.push((point.condition.as_str(), 1)),
        }
    }

    fn dominant(&self) -> &'a str {
        let mut best: Option<(&'a str, usize)> = None;
        for &(label, n) in &self.labels {
            if best.is_none_or(|(_, top)| n > top) {
                best = Some((label, n));
            }
        }
        best.map_or("", |(label, _)| label)
    }

    fn finish(self) -> ForecastDay {
        ForecastDay {
            date: self.date,
            average_temperature: self.temperature_sum / self.count as f64,
            condition: self.dominant().to_string(),
            points: self.count,
        }
    }
}

/// Group forecast points into upcoming days
///
/// Only dates strictly after `today` are considered. Once `max_days` distinct
/// dates have been opened, points for any further date are ignored; points
/// for already-open dates are still counted. Days are returned in the order
/// their first point appears in the feed, which is not necessarily
/// chronological. Category ties go to the label seen first.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use domain::{ForecastPoint, aggregate_forecast};
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let at = |d: u32, h: u32| {
///     NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
/// };
/// let points = vec![
///     ForecastPoint { time: at(16, 0), condition: "Rain".into(), temperature: 10.0 },
///     ForecastPoint { time: at(16, 3), condition: "Rain".into(), temperature: 20.0 },
///     ForecastPoint { time: at(16, 6), condition: "Clouds".into(), temperature: 12.0 },
/// ];
///
/// let days = aggregate_forecast(&points, today, 4);
/// assert_eq!(days.len(), 1);
/// assert_eq!(days[0].rounded_temperature(), 14);
/// assert_eq!(days[0].condition, "Rain");
/// ```
#[must_use]
pub fn aggregate_forecast(
    points: &[ForecastPoint],
    today: NaiveDate,
    max_days: usize,
) -> Vec<ForecastDay> {
    let mut buckets: Vec<Bucket<'_>> = Vec::with_capacity(max_days);

    for point in points {
        let date = point.time.date();
        if date <= today {
            continue;
        }

        let index = match buckets.iter().position(|b| b.date == date) {
            Some(i) => i,
            None if buckets.len() < max_days => {
                buckets.push(Bucket::new(date));
                buckets.len() - 1
            },
            None => continue,
        };
        buckets[index].add(point);
    }

    buckets.into_iter().map(Bucket::finish).collect()
}
