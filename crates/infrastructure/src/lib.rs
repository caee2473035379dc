//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and provides the
//! configuration, logging, chart drawing and page templates shared by the
//! web and terminal front ends.

pub mod adapters;
pub mod charts;
pub mod config;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use charts::{ChartError, ChartSize, UnitLabels, terminal::TerminalPlot};
pub use config::{AppConfig, DashboardConfig, LogFormat, ServerConfig, WeatherAppConfig};
pub use telemetry::{LogTarget, TelemetryConfig, TelemetryError, init_telemetry};
pub use templates::{DashboardPage, ForecastCard, TemplateEngine, TemplateError};
