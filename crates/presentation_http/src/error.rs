//! API error handling
//!
//! Failures that reach a handler are server-side: a bad configuration or a
//! page that failed to render. Details are only included in the response body
//! when `server.expose_error_details` is set.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use infrastructure::TemplateError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Configure whether internal error details should be exposed in responses.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configuration cannot serve requests
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Rendering the page failed
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn to_body(&self, expose: bool) -> (StatusCode, ErrorResponse) {
        let (code, detail) = match self {
            Self::Configuration(msg) => ("configuration_error", msg),
            Self::Internal(msg) => ("internal_error", msg),
        };

        let body = ErrorResponse {
            error: "An internal error occurred".to_string(),
            code: code.to_string(),
            details: expose.then(|| detail.clone()),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        let (status, body) = self.to_body(should_expose_details());
        (status, Json(body)).into_response()
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_messages() {
        assert_eq!(
            ApiError::Configuration("blank location".to_string()).to_string(),
            "Configuration error: blank location"
        );
        assert_eq!(
            ApiError::Internal("unexpected".to_string()).to_string(),
            "Internal error: unexpected"
        );
    }

    #[test]
    fn error_response_skips_empty_details() {
        let resp = ErrorResponse {
            error: "An internal error occurred".to_string(),
            code: "internal_error".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("code"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn template_error_converts_to_internal() {
        let err = ApiError::from(TemplateError::NotFound("dashboard/x.html".to_string()));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn details_only_when_exposed() {
        let err = ApiError::Internal("Chart drawing failed: io".to_string());

        let (status, hidden) = err.to_body(false);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hidden.code, "internal_error");
        assert!(hidden.details.is_none());

        let (_, shown) = err.to_body(true);
        assert_eq!(shown.details.as_deref(), Some("Chart drawing failed: io"));
    }

    #[test]
    fn all_errors_are_server_errors() {
        for err in [
            ApiError::Configuration("x".to_string()),
            ApiError::Internal("x".to_string()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
