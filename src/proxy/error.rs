//! Proxy error taxonomy and HTTP mapping.
//!
//! # Responsibilities
//! - Classify upstream failures (timeout, unreachable, bad status)
//! - Reject requests missing required parameters before any upstream call
//! - Map each failure to an HTTP response, never claiming success
//!
//! # Design Decisions
//! - Upstream error statuses are propagated verbatim; a blanket 502
//!   would discard information the caller can use
//! - Timeouts map to 504, connection/DNS failures to 502
//! - Error bodies are small JSON objects, matching the API surface

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure modes of a single proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("missing required query parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("upstream request timed out")]
    UpstreamTimeout,

    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),
}

impl ProxyError {
    /// HTTP status this error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamStatus(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UpstreamUnreachable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (
            self.status(),
            [(header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
