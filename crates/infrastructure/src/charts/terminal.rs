//! Terminal rendition of the dashboard
//!
//! Draws each panel as a colored sparkline with its range and latest value.
//! The output starts with a clear-screen sequence so repeated writes redraw
//! in place.

use domain::SeriesBuffer;
use integration_weather::WeatherUnits;

use super::{PANELS, PanelStyle, UnitLabels, chart_title, format_time, value_bounds};

/// Clear the screen and move the cursor home
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
/// Hide the cursor while redrawing
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Show the cursor again
pub const SHOW_CURSOR: &str = "\x1b[?25h";

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Sparkline of the last `width` values
///
/// Values are scaled between the minimum and maximum of the visible window.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sparkline(values: &[f64], width: usize) -> String {
    let visible = &values[values.len().saturating_sub(width)..];
    let Some((min, max)) = value_bounds(visible.iter().copied()) else {
        return String::new();
    };
    let top = (BARS.len() - 1) as f64;

    visible
        .iter()
        .map(|v| {
            let level = ((v - min) / (max - min) * top).round().clamp(0.0, top);
            BARS[level as usize]
        })
        .collect()
}

/// Renders the series as a block of terminal text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalPlot {
    width: usize,
    color: bool,
    labels: UnitLabels,
}

impl Default for TerminalPlot {
    fn default() -> Self {
        Self {
            width: 60,
            color: true,
            labels: UnitLabels::default(),
        }
    }
}

impl TerminalPlot {
    /// Plot with sparklines at most `width` characters wide
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            ..Self::default()
        }
    }

    /// Enable or disable ANSI colors
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Label values in the unit system the API was asked for
    #[must_use]
    pub const fn with_units(mut self, units: WeatherUnits) -> Self {
        self.labels = UnitLabels::new(units);
        self
    }

    /// Full frame, including the leading clear-screen sequence
    #[must_use]
    pub fn frame(&self, series: &SeriesBuffer, city: &str) -> String {
        format!("{CLEAR_SCREEN}{}", self.render(series, city))
    }

    /// Plot text without any cursor control
    #[must_use]
    pub fn render(&self, series: &SeriesBuffer, city: &str) -> String {
        let title = chart_title(city);
        let mut lines = vec![self.bold(&title), "=".repeat(title.chars().count())];

        for panel in &PANELS {
            lines.push(String::new());
            lines.extend(self.panel(series, panel));
        }

        lines.push(String::new());
        lines.push(
            match (series.timestamps().front(), series.timestamps().back()) {
                (Some(first), Some(last)) => format!(
                    "Time {} - {} ({} samples)",
                    format_time(first),
                    format_time(last),
                    series.len()
                ),
                _ => "Waiting for the first sample...".to_string(),
            },
        );

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn panel(&self, series: &SeriesBuffer, panel: &PanelStyle) -> Vec<String> {
        let values: Vec<f64> = series.series(panel.field).iter().copied().collect();

        let latest = values
            .last()
            .map(|v| self.labels.annotate(panel.field, *v))
            .unwrap_or_default();
        let heading = format!(
            "{}  {}",
            self.bold(&self.labels.title(panel)),
            self.colored(panel, &latest)
        );

        let Some((min, max)) = values
            .iter()
            .copied()
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
        else {
            return vec![heading, "  No data yet".to_string()];
        };

        vec![
            heading,
            format!("  {}", self.colored(panel, &sparkline(&values, self.width))),
            format!("  min {min}  max {max}"),
        ]
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn colored(&self, panel: &PanelStyle, text: &str) -> String {
        if self.color {
            let (r, g, b) = panel.rgb();
            format!("\x1b[38;2;{r};{g};{b}m{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
