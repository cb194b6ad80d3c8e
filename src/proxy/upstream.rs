//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Build the upstream target URL from the configured base and a suffix
//! - Issue the outbound GET with a bounded timeout
//! - Classify transport failures and non-2xx statuses
//!
//! # Design Decisions
//! - One pooled reqwest client for the process; the protocol is
//!   stateless GET/response so pooling is purely an optimization
//! - Bodies are relayed as opaque bytes, never parsed
//! - The timeout covers the whole call, the only suspension point in
//!   a proxied request

use std::time::Duration;

use axum::body::Bytes;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::proxy::endpoint::Endpoint;
use crate::proxy::error::ProxyError;

/// Client for the kashite upstream API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Create a client with the configured base URL and call timeout.
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        // A 3xx is a non-2xx upstream status and must surface as one;
        // never chase redirects off the configured base.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("kashite-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Target URL for an endpoint.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.suffix())
    }

    /// Fetch an endpoint with the given query parameters, relaying the
    /// JSON body verbatim on any 2xx response.
    pub async fn fetch(
        &self,
        endpoint: Endpoint,
        params: &[(String, String)],
    ) -> Result<Bytes, ProxyError> {
        let url = self.endpoint_url(endpoint);

        let mut request = self.http.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }

        let response = request.send().await.map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        response
            .bytes()
            .await
            .map_err(classify_transport_error)
    }
}

fn classify_transport_error(e: reqwest::Error) -> ProxyError {
    if e.is_timeout() {
        ProxyError::UpstreamTimeout
    } else {
        ProxyError::UpstreamUnreachable(e.to_string())
    }
}
