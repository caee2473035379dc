//! Dashboard charts
//!
//! Four stacked panels (temperature, humidity, wind speed, pressure) sharing a
//! time axis. [`svg`] draws them with plotters for the web page; [`terminal`]
//! draws the same panels as sparklines for a terminal.

pub mod svg;
pub mod terminal;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Local, Utc};
use domain::SeriesField;
use integration_weather::WeatherUnits;
use thiserror::Error;

/// Chart drawing errors
#[derive(Debug, Error)]
pub enum ChartError {
    /// The plotting backend failed
    #[error("Chart drawing failed: {0}")]
    Draw(String),
}

/// Static description of one chart panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelStyle {
    /// Series drawn in the panel
    pub field: SeriesField,
    /// Panel heading without unit
    pub name: &'static str,
    /// Y axis label without unit
    pub axis_name: &'static str,
    /// Line color as `#RRGGBB`
    pub color: &'static str,
}

impl PanelStyle {
    /// Color as an RGB triple
    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color.trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };
        (channel(0), channel(2), channel(4))
    }
}

/// Panels in display order
pub const PANELS: [PanelStyle; 4] = [
    PanelStyle {
        field: SeriesField::Temperature,
        name: "Temperature",
        axis_name: "Temp",
        color: "#E94560",
    },
    PanelStyle {
        field: SeriesField::Humidity,
        name: "Humidity",
        axis_name: "Humidity",
        color: "#45B8AC",
    },
    PanelStyle {
        field: SeriesField::WindSpeed,
        name: "Wind Speed",
        axis_name: "Wind Speed",
        color: "#6C4A8D",
    },
    PanelStyle {
        field: SeriesField::Pressure,
        name: "Atmospheric Pressure",
        axis_name: "Pressure",
        color: "#F39C12",
    },
];

/// Unit symbols of each series for the configured unit system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitLabels {
    temperature: &'static str,
    wind_speed: &'static str,
}

impl Default for UnitLabels {
    fn default() -> Self {
        Self::new(WeatherUnits::default())
    }
}

impl UnitLabels {
    /// Labels matching the values the API returns for `units`
    #[must_use]
    pub const fn new(units: WeatherUnits) -> Self {
        Self {
            temperature: units.temperature_symbol(),
            wind_speed: units.wind_speed_symbol(),
        }
    }

    /// Unit symbol of a series
    #[must_use]
    pub const fn symbol(&self, field: SeriesField) -> &'static str {
        match field {
            SeriesField::Temperature => self.temperature,
            SeriesField::Humidity => "%",
            SeriesField::WindSpeed => self.wind_speed,
            SeriesField::Pressure => "hPa",
        }
    }

    /// Panel heading, e.g. `Temperature (°C)`
    #[must_use]
    pub fn title(&self, panel: &PanelStyle) -> String {
        format!("{} ({})", panel.name, self.symbol(panel.field))
    }

    /// Y axis label, e.g. `Temp (°C)`
    #[must_use]
    pub fn axis_label(&self, panel: &PanelStyle) -> String {
        format!("{} ({})", panel.axis_name, self.symbol(panel.field))
    }

    /// Value with its unit, e.g. `7.5°C` or `4.1 m/s`
    #[must_use]
    pub fn annotate(&self, field: SeriesField, value: f64) -> String {
        let symbol = self.symbol(field);
        if symbol.starts_with('°') || symbol == "%" {
            format!("{value}{symbol}")
        } else {
            format!("{value} {symbol}")
        }
    }
}

/// Canvas dimensions of the SVG chart in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    /// Canvas width
    pub width: u32,
    /// Height of each panel, heading included
    pub panel_height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 1200,
            panel_height: 300,
        }
    }
}

const TITLE_HEIGHT: u32 = 60;

impl ChartSize {
    /// Canvas height for all panels plus the chart title
    #[must_use]
    pub fn height(&self) -> u32 {
        let panels = u32::try_from(PANELS.len()).unwrap_or(u32::MAX);
        TITLE_HEIGHT.saturating_add(self.panel_height.saturating_mul(panels))
    }
}

/// Chart heading for a location
#[must_use]
pub fn chart_title(city: &str) -> String {
    format!("Live Weather Dashboard for {city}")
}

/// Encode an SVG document as a `data:` URI for an `<img>` source
#[must_use]
pub fn svg_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

/// Clock time of a sample in the local time zone
#[must_use]
pub fn format_time(t: &DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Tight bounds over `values`, widened when all values are equal
///
/// Returns `None` for an empty input.
#[must_use]
pub fn value_bounds<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let (min, max) = values
        .into_iter()
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    if (max - min).abs() < f64::EPSILON {
        let pad = (min.abs() * 0.05).max(1.0);
        return Some((min - pad, max + pad));
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_labels() {
        let labels = UnitLabels::default();
        assert_eq!(labels.annotate(SeriesField::Temperature, 7.5), "7.5°C");
        assert_eq!(labels.annotate(SeriesField::Humidity, 81.0), "81%");
        assert_eq!(labels.annotate(SeriesField::WindSpeed, 4.12), "4.12 m/s");
        assert_eq!(labels.annotate(SeriesField::Pressure, 1009.0), "1009 hPa");

        let titles: Vec<String> = PANELS.iter().map(|p| labels.title(p)).collect();
        assert_eq!(
            titles,
            vec![
                "Temperature (°C)",
                "Humidity (%)",
                "Wind Speed (m/s)",
                "Atmospheric Pressure (hPa)"
            ]
        );
        assert_eq!(labels.axis_label(&PANELS[0]), "Temp (°C)");
    }

    #[test]
    fn imperial_labels() {
        let labels = UnitLabels::new(WeatherUnits::Imperial);
        assert_eq!(labels.annotate(SeriesField::Temperature, 50.0), "50°F");
        assert_eq!(labels.annotate(SeriesField::WindSpeed, 9.0), "9 mph");
        assert_eq!(labels.title(&PANELS[2]), "Wind Speed (mph)");
        assert_eq!(labels.annotate(SeriesField::Pressure, 1009.0), "1009 hPa");
    }

    #[test]
    fn standard_labels_use_kelvin() {
        let labels = UnitLabels::new(WeatherUnits::Standard);
        assert_eq!(labels.annotate(SeriesField::Temperature, 280.5), "280.5 K");
        assert_eq!(labels.title(&PANELS[0]), "Temperature (K)");
    }

    #[test]
    fn panel_colors() {
        let colors: Vec<&str> = PANELS.iter().map(|p| p.color).collect();
        assert_eq!(colors, vec!["#E94560", "#45B8AC", "#6C4A8D", "#F39C12"]);
        assert_eq!(PANELS[0].rgb(), (0xE9, 0x45, 0x60));
    }

    #[test]
    fn data_uri_is_base64_svg() {
        let uri = svg_data_uri("<svg/>");
        assert_eq!(uri, "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn bounds_pad_flat_series() {
        let (lo, hi) = value_bounds([5.0, 5.0]).unwrap();
        assert!(lo < 5.0 && hi > 5.0);
        assert!(((lo + hi) / 2.0 - 5.0).abs() < 1e-9);

        assert_eq!(value_bounds([1.0, 3.0, 2.0]), Some((1.0, 3.0)));
        assert!(value_bounds(std::iter::empty()).is_none());
    }

    #[test]
    fn chart_height_covers_all_panels() {
        let size = ChartSize {
            width: 800,
            panel_height: 200,
        };
        assert_eq!(size.height(), TITLE_HEIGHT + 800);
    }
}
