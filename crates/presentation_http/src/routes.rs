//! Route definitions

use axum::{Router, routing::get};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard page; POST submits the city form
        .route(
            "/",
            get(handlers::dashboard::show_dashboard).post(handlers::dashboard::update_city),
        )
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Attach state
        .with_state(state)
}
