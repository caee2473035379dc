//! SVG rendition of the dashboard drawn with plotters
//!
//! Each panel plots its series against seconds since the first sample; the
//! time labels below the bottom panel map those offsets back to clock time.

use std::ops::Range;

use chrono::{DateTime, TimeDelta, Utc};
use domain::SeriesBuffer;
use plotters::{coord::Shift, drawing::DrawingAreaErrorKind, prelude::*};

use super::{
    ChartError, ChartSize, PANELS, PanelStyle, UnitLabels, chart_title, format_time, value_bounds,
};

const FONT: &str = "sans-serif";
const X_LABELS: usize = 6;
const Y_LABELS: usize = 5;
const PLACEHOLDER: &str = "No data yet";

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Self::Draw(e.to_string())
    }
}

/// Shared time axis of all panels
#[derive(Debug, Clone, PartialEq)]
struct TimeAxis {
    start: Option<DateTime<Utc>>,
    range: Range<f64>,
}

impl TimeAxis {
    fn new(series: &SeriesBuffer) -> Self {
        let timestamps = series.timestamps();
        let (Some(first), Some(last)) = (timestamps.front(), timestamps.back()) else {
            return Self {
                start: None,
                range: 0.0..1.0,
            };
        };

        let span = seconds_between(*first, *last);
        let range = if span > 0.0 { 0.0..span } else { -1.0..1.0 };
        Self {
            start: Some(*first),
            range,
        }
    }

    fn x_of(&self, t: &DateTime<Utc>) -> f64 {
        self.start.map_or(0.0, |start| seconds_between(start, *t))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn label(&self, x: f64) -> String {
        let offset = TimeDelta::milliseconds((x * 1000.0).round() as i64);
        self.start
            .map(|start| format_time(&(start + offset)))
            .unwrap_or_default()
    }

    fn middle(&self) -> f64 {
        (self.range.start + self.range.end) / 2.0
    }
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

fn format_tick(v: f64) -> String {
    let rounded = (v * 10.0).round() / 10.0;
    if rounded.fract().abs() < f64::EPSILON {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Draw `series` as a standalone SVG document
///
/// # Errors
///
/// Returns an error if the plotting backend fails.
pub fn render(
    series: &SeriesBuffer,
    city: &str,
    labels: UnitLabels,
    size: ChartSize,
) -> Result<String, ChartError> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (size.width, size.height())).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled(&chart_title(city), (FONT, 28).into_font())?;

        let axis = TimeAxis::new(series);
        let areas = root.split_evenly((PANELS.len(), 1));
        let last = areas.len().saturating_sub(1);
        for (i, (area, panel)) in areas.iter().zip(PANELS.iter()).enumerate() {
            draw_panel(area, series, panel, labels, &axis, i == last)?;
        }
        root.present()?;
    }
    Ok(svg)
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    series: &SeriesBuffer,
    panel: &PanelStyle,
    labels: UnitLabels,
    axis: &TimeAxis,
    bottom: bool,
) -> Result<(), ChartError> {
    let values = series.series(panel.field);
    let (r, g, b) = panel.rgb();
    let color = RGBColor(r, g, b);
    let (y_min, y_max) = value_bounds(values.iter().copied()).unwrap_or((0.0, 1.0));

    let mut chart = ChartBuilder::on(area)
        .caption(labels.title(panel), (FONT, 18).into_font())
        .margin(10)
        .x_label_area_size(if bottom { 50 } else { 10 })
        .y_label_area_size(80)
        .build_cartesian_2d(axis.range.clone(), y_min..y_max)?;

    let x_formatter = |x: &f64| {
        if bottom {
            axis.label(*x)
        } else {
            String::new()
        }
    };
    let y_formatter = |y: &f64| format_tick(*y);

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(X_LABELS)
        .y_labels(Y_LABELS)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .y_desc(labels.axis_label(panel));
    if bottom {
        mesh.x_desc("Time");
    }
    mesh.draw()?;

    if values.is_empty() {
        chart.draw_series(std::iter::once(Text::new(
            PLACEHOLDER,
            (axis.middle(), (y_min + y_max) / 2.0),
            (FONT, 16).into_font().color(&RGBColor(0x88, 0x88, 0x88)),
        )))?;
        return Ok(());
    }

    let points: Vec<(f64, f64)> = series
        .timestamps()
        .iter()
        .zip(values)
        .map(|(t, v)| (axis.x_of(t), *v))
        .collect();

    chart.draw_series(
        LineSeries::new(points.iter().copied(), color.stroke_width(2)).point_size(4),
    )?;

    if let Some(&(x, y)) = points.last() {
        chart.draw_series(std::iter::once(Text::new(
            labels.annotate(panel.field, y),
            (x, y),
            (FONT, 13).into_font().color(&color),
        )))?;
    }
    Ok(())
}
