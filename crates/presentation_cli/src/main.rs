//! WeatherDash live terminal feed
//!
//! Follows one city and redraws its weather plot every poll interval.

#![allow(clippy::print_stderr)]

use std::{io, process::ExitCode, sync::Arc};

use application::{ports::WeatherPort, services::DashboardService};
use clap::Parser;
use domain::Location;
use infrastructure::{
    AppConfig, LogTarget, TelemetryConfig, TerminalPlot, WeatherAdapter, init_telemetry,
};
use presentation_cli::{Cli, LiveError, LiveFeed, prompt_location};
use tracing::{error, warn};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so they don't tear through the plot
    init_telemetry(
        &TelemetryConfig::new(cli.log_filter()).with_target(LogTarget::Stderr),
    )?;

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    let location = match cli.location.as_deref() {
        Some(name) => Location::new(name).map_err(|_| LiveError::EmptyLocation),
        None => prompt_location(&mut io::stdin().lock(), &mut io::stdout()),
    };
    let location = match location {
        Ok(location) => location,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        },
    };

    if !config.weather.has_api_key() {
        warn!("No OpenWeatherMap API key configured, set WEATHERDASH_WEATHER__API_KEY");
    }

    let weather: Arc<dyn WeatherPort> = Arc::new(
        WeatherAdapter::with_config(config.weather.to_client_config())
            .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {e}"))?,
    );

    let feed = LiveFeed::new(
        DashboardService::new(weather, config.dashboard.max_samples),
        location,
    )
    .with_plot(
        TerminalPlot::new(cli.width)
            .with_color(!cli.no_color)
            .with_units(config.weather.units),
    )
    .with_interval(config.dashboard.poll_interval());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    feed.run(&mut io::stdout(), &mut io::stderr(), shutdown)
        .await?;

    Ok(ExitCode::SUCCESS)
}
