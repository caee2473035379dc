//! Dashboard page handlers
//!
//! Every request polls the weather once, so the browser's meta refresh is
//! what drives the rolling series forward.

use axum::{Form, extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;
use domain::Location;
use infrastructure::DashboardPage;
use serde::Deserialize;
use tracing::{instrument, warn};

use super::session::ensure_session;
use crate::{error::ApiError, state::AppState};

/// City search form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityForm {
    /// Submitted city name; blank keeps the current one
    #[serde(default)]
    pub city: String,
}

/// Render the dashboard for the session's location
#[instrument(skip(state, jar))]
pub async fn show_dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), ApiError> {
    let (jar, session) = ensure_session(jar);
    let location = state.locations.resolve(&session).await;
    let page = render_dashboard(&state, &location).await?;
    Ok((jar, page))
}

/// Store the submitted city for the session, then render the dashboard
#[instrument(skip(state, jar))]
pub async fn update_city(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CityForm>,
) -> Result<(CookieJar, Html<String>), ApiError> {
    let (jar, session) = ensure_session(jar);
    let location = state.locations.remember(session, &form.city).await;
    let page = render_dashboard(&state, &location).await?;
    Ok((jar, page))
}

async fn render_dashboard(state: &AppState, location: &Location) -> Result<Html<String>, ApiError> {
    let (snapshot, forecast) = tokio::join!(
        state.dashboard.poll(location),
        state.forecast.upcoming_days(location)
    );

    let forecast_days = match forecast {
        Ok(summary) => summary.days,
        Err(e) => {
            warn!(error = %e, "Forecast unavailable, omitting section");
            Vec::new()
        },
    };

    let chart_uri = state
        .templates
        .chart_data_uri(&snapshot.series, &snapshot.display_name)?;

    let page = DashboardPage::new(
        location.as_str(),
        chart_uri,
        state.config.dashboard.refresh_secs,
        state.templates.labels(),
    )
    .with_latest(snapshot.latest().as_ref(), snapshot.condition.clone())
    .with_poll_error(snapshot.poll_error.clone())
    .with_forecast(&forecast_days);

    Ok(Html(state.templates.render_dashboard(&page)?))
}
