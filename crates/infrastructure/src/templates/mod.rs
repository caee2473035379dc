//! Template engine module for rendering the dashboard
//!
//! Uses Tera with an embedded template for the HTML dashboard page. The chart
//! image is drawn by [`crate::charts::svg`] and inlined as a `data:` URI.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::{DashboardPage, TemplateEngine};
//!
//! let engine = TemplateEngine::new()?;
//! let chart_uri = engine.chart_data_uri(&series, "London")?;
//! let page = DashboardPage::new("London", chart_uri, 15, engine.labels());
//! let html = engine.render_dashboard(&page)?;
//! ```

use std::sync::Arc;

use domain::{ForecastDay, Sample, SeriesBuffer, SeriesField};
use integration_weather::WeatherUnits;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::charts::{ChartError, ChartSize, PANELS, UnitLabels, format_time, svg, svg_data_uri};

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),

    /// Invalid template context
    #[error("Invalid context: {0}")]
    Context(String),

    /// Chart drawing failed
    #[error(transparent)]
    Chart(#[from] ChartError),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Latest observation, formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestReading {
    /// Clock time of the observation
    pub time: String,
    /// One annotated value per chart panel, in panel order
    pub values: Vec<ReadingValue>,
}

/// One labelled value of a [`LatestReading`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingValue {
    /// Panel title
    pub label: String,
    /// Value with unit
    pub value: String,
    /// Panel color
    pub color: String,
}

impl LatestReading {
    /// Format every panel value of `sample` with `labels`
    #[must_use]
    pub fn new(sample: &Sample, labels: UnitLabels) -> Self {
        Self {
            time: format_time(&sample.timestamp),
            values: PANELS
                .iter()
                .map(|panel| ReadingValue {
                    label: labels.title(panel),
                    value: labels.annotate(panel.field, panel.field.value_of(sample)),
                    color: panel.color.to_string(),
                })
                .collect(),
        }
    }
}

/// One forecast day, formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastCard {
    /// Date label, e.g. "Mon, Jan 15"
    pub label: String,
    /// Condition emoji
    pub icon: String,
    /// Average temperature rounded to whole degrees
    pub temperature: i64,
    /// Dominant condition
    pub condition: String,
}

impl From<&ForecastDay> for ForecastCard {
    fn from(day: &ForecastDay) -> Self {
        Self {
            label: day.label(),
            icon: day.icon().to_string(),
            temperature: day.rounded_temperature(),
            condition: day.condition.clone(),
        }
    }
}

/// Data of the dashboard page
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    /// Location shown in the search field
    pub city: String,
    /// Browser reload delay in seconds
    pub refresh_secs: u64,
    /// `data:` URI of the chart image
    pub chart_uri: String,
    /// Temperature symbol of the forecast cards
    pub temperature_unit: &'static str,
    /// Latest observation, if any
    pub latest: Option<LatestReading>,
    /// Weather category of the latest observation
    pub condition: Option<String>,
    /// Why this refresh produced no new sample
    pub poll_error: Option<String>,
    /// Upcoming days; empty hides the forecast section
    pub forecast: Vec<ForecastCard>,
    #[serde(skip)]
    labels: UnitLabels,
}

impl DashboardPage {
    /// Page with a chart and nothing else
    #[must_use]
    pub fn new(
        city: impl Into<String>,
        chart_uri: impl Into<String>,
        refresh_secs: u64,
        labels: UnitLabels,
    ) -> Self {
        Self {
            city: city.into(),
            refresh_secs,
            chart_uri: chart_uri.into(),
            temperature_unit: labels.symbol(SeriesField::Temperature),
            latest: None,
            condition: None,
            poll_error: None,
            forecast: Vec::new(),
            labels,
        }
    }

    /// Show the latest observation
    #[must_use]
    pub fn with_latest(mut self, sample: Option<&Sample>, condition: Option<String>) -> Self {
        self.latest = sample.map(|s| LatestReading::new(s, self.labels));
        self.condition = condition;
        self
    }

    /// Show a notice that this refresh failed
    #[must_use]
    pub fn with_poll_error(mut self, error: Option<String>) -> Self {
        self.poll_error = error;
        self
    }

    /// Show the forecast section
    #[must_use]
    pub fn with_forecast(mut self, days: &[ForecastDay]) -> Self {
        self.forecast = days.iter().map(ForecastCard::from).collect();
        self
    }
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Live Weather Dashboard</title>
    <meta http-equiv="refresh" content="{{ refresh_secs }}">
    <style>
        body { font-family: 'Arial', sans-serif; background-color: #f0f2f5; margin: 0; padding: 20px; text-align: center; }
        .container { max-width: 1200px; margin: auto; background-color: #fff; padding: 20px; border-radius: 8px; box-shadow: 0 4px 8px rgba(0,0,0,0.1); }
        h1 { color: #333; }
        .form-container { margin-bottom: 20px; }
        input[type="text"] { padding: 10px; border: 1px solid #ccc; border-radius: 4px; }
        button { padding: 10px 20px; background-color: #4CAF50; color: white; border: none; border-radius: 4px; cursor: pointer; }
        button:hover { background-color: #45a049; }
        .notice { color: #a94442; background-color: #f2dede; padding: 10px; border-radius: 4px; }
        .current { display: flex; justify-content: center; gap: 24px; flex-wrap: wrap; }
        .reading { font-size: 18px; font-weight: bold; }
        .forecast { display: flex; justify-content: center; gap: 16px; flex-wrap: wrap; margin-top: 20px; }
        .day { background-color: #f7f7fa; border-radius: 8px; padding: 12px 18px; min-width: 120px; }
        .icon { font-size: 32px; }
        img { max-width: 100%; height: auto; margin-top: 20px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Live Weather Dashboard</h1>
        <div class="form-container">
            <form method="post">
                <input type="text" name="city" placeholder="Enter city name..." value="{{ city }}">
                <button type="submit">Update City</button>
            </form>
        </div>
{% if poll_error %}
        <p class="notice">Could not refresh the weather for {{ city }} ({{ poll_error }}). Showing the last known values.</p>
{% endif %}
{% if latest %}
        <div class="current">
{% for reading in latest.values %}
            <div class="reading" style="color: {{ reading.color }}">{{ reading.label }}: {{ reading.value }}</div>
{% endfor %}
{% if condition %}
            <div class="reading">{{ condition }}</div>
{% endif %}
            <div class="reading">Updated {{ latest.time }}</div>
        </div>
{% endif %}
        <img src="{{ chart_uri | safe }}" alt="Live Weather Dashboard">
{% if forecast %}
        <h2>Forecast</h2>
        <div class="forecast">
{% for day in forecast %}
            <div class="day">
                <div class="date">{{ day.label }}</div>
                <div class="icon">{{ day.icon }}</div>
                <div class="temp">{{ day.temperature }}{{ temperature_unit }}</div>
                <div class="condition">{{ day.condition }}</div>
            </div>
{% endfor %}
        </div>
{% endif %}
    </div>
</body>
</html>
"#;
}

const PAGE_TEMPLATE: &str = "dashboard/index.html";

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
    chart_size: ChartSize,
    labels: UnitLabels,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("chart_size", &self.chart_size)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Create a new template engine with the default chart size
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded template fails to compile.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_chart_size(ChartSize::default())
    }

    /// Create a new template engine drawing charts of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded template fails to compile.
    pub fn with_chart_size(chart_size: ChartSize) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_template(PAGE_TEMPLATE, embedded::DASHBOARD_HTML)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        Ok(Self {
            tera: Arc::new(tera),
            chart_size,
            labels: UnitLabels::default(),
        })
    }

    /// Label values in the unit system the API was asked for
    #[must_use]
    pub const fn with_units(mut self, units: WeatherUnits) -> Self {
        self.labels = UnitLabels::new(units);
        self
    }

    /// Unit labels used for charts and pages
    #[must_use]
    pub const fn labels(&self) -> UnitLabels {
        self.labels
    }

    /// Chart of `series` as a `data:image/svg+xml;base64` URI
    ///
    /// # Errors
    ///
    /// Returns an error if drawing the chart fails.
    pub fn chart_data_uri(
        &self,
        series: &SeriesBuffer,
        city: &str,
    ) -> Result<String, TemplateError> {
        let svg = svg::render(series, city, self.labels, self.chart_size)?;
        Ok(svg_data_uri(&svg))
    }

    /// Render the dashboard page
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_dashboard(&self, page: &DashboardPage) -> Result<String, TemplateError> {
        let ctx =
            Context::from_serialize(page).map_err(|e| TemplateError::Context(e.to_string()))?;
        self.tera.render(PAGE_TEMPLATE, &ctx).map_err(TemplateError::from)
    }
}
