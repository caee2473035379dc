//! Live feed loop
//!
//! Polls the weather, redraws the terminal plot and waits, until the
//! shutdown future resolves.

use std::{
    future::Future,
    io::{self, BufRead, Write},
    time::Duration,
};

use application::services::DashboardService;
use domain::Location;
use infrastructure::charts::terminal::{HIDE_CURSOR, SHOW_CURSOR, TerminalPlot};
use thiserror::Error;
use tracing::{debug, info};

/// Prompt shown when no location was given on the command line
pub const LOCATION_PROMPT: &str = "Enter the city name: ";

/// Errors of the live feed
#[derive(Debug, Error)]
pub enum LiveError {
    /// Nothing usable was entered at the prompt
    #[error("No city name was entered. Please try again.")]
    EmptyLocation,

    /// Terminal I/O failed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Ask for a location on `output` and read one line from `input`
///
/// # Errors
///
/// Returns [`LiveError::EmptyLocation`] for blank input or end of input.
pub fn prompt_location<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Location, LiveError> {
    write!(output, "{LOCATION_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Location::new(&line).map_err(|_| LiveError::EmptyLocation)
}

/// Drives the poll → redraw cycle for one location
#[derive(Debug)]
pub struct LiveFeed {
    dashboard: DashboardService,
    location: Location,
    plot: TerminalPlot,
    interval: Duration,
}

impl LiveFeed {
    /// Feed for `location` with the default plot and a one second interval
    #[must_use]
    pub fn new(dashboard: DashboardService, location: Location) -> Self {
        Self {
            dashboard,
            location,
            plot: TerminalPlot::default(),
            interval: Duration::from_secs(1),
        }
    }

    /// Use the given plot settings
    #[must_use]
    pub const fn with_plot(mut self, plot: TerminalPlot) -> Self {
        self.plot = plot;
        self
    }

    /// Pause between polls
    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// The followed location
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// Number of samples currently plotted
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.dashboard.sample_count()
    }

    /// Poll once and redraw on `out`, or report the failure on `err`
    ///
    /// Returns whether a new sample was added.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to either stream fails.
    pub async fn tick<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> io::Result<bool> {
        let snapshot = self.dashboard.poll(&self.location).await;

        if snapshot.updated() {
            write!(out, "{}", self.plot.frame(&snapshot.series, &snapshot.display_name))?;
            out.flush()?;
            Ok(true)
        } else {
            writeln!(err, "{}", self.retry_message())?;
            Ok(false)
        }
    }

    /// Run until `shutdown` resolves, then restore the cursor
    ///
    /// Returns the number of completed poll cycles.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to either stream fails.
    pub async fn run<O, E, F>(&self, out: &mut O, err: &mut E, shutdown: F) -> io::Result<u64>
    where
        O: Write,
        E: Write,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        write!(out, "{HIDE_CURSOR}")?;
        info!(location = %self.location, interval = ?self.interval, "Live feed started");

        let mut cycles = 0;
        let result = loop {
            tokio::select! {
                () = &mut shutdown => break Ok(cycles),
                result = self.cycle(out, err) => match result {
                    Ok(()) => cycles += 1,
                    Err(e) => break Err(e),
                },
            }
        };

        debug!(cycles, "Live feed stopping");
        write!(out, "{SHOW_CURSOR}")?;
        writeln!(out, "\nLive feed stopped by user.")?;
        out.flush()?;
        result
    }

    async fn cycle<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> io::Result<()> {
        self.tick(out, err).await?;
        tokio::time::sleep(self.interval).await;
        Ok(())
    }

    fn retry_message(&self) -> String {
        let secs = self.interval.as_secs_f64();
        let unit = if (secs - 1.0).abs() < f64::EPSILON {
            "second"
        } else {
            "seconds"
        };
        format!("Failed to retrieve current weather data. Retrying in {secs} {unit}...")
    }
}
