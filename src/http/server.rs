//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the proxy routes and static fallback
//! - Wire up middleware (request ID, tracing, inbound timeout)
//! - Bind the server to a listener with graceful shutdown
//! - Forward enumerated endpoints to the upstream API
//! - Observability (metrics, correlation IDs)

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::assets::StaticAssets;
use crate::config::GatewayConfig;
use crate::http::request::{self, MakeRequestUuid};
use crate::observability::metrics;
use crate::proxy::endpoint::{Endpoint, QueryPolicy};
use crate::proxy::error::ProxyError;
use crate::proxy::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub assets: StaticAssets,
}

/// HTTP server for the edge gateway.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let state = AppState {
            upstream: UpstreamClient::new(&config.upstream, &config.timeouts)?,
            assets: StaticAssets::new(&config.static_assets),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/test/{endpoint}", get(forward_handler))
            .fallback(asset_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Proxy handler for `/api/test/{endpoint}`.
///
/// Resolves the suffix against the fixed endpoint set, applies its
/// query policy, and relays the upstream JSON body verbatim.
async fn forward_handler(
    State(state): State<AppState>,
    Path(suffix): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let request_id = request::request_id(&headers).to_string();

    let Some(endpoint) = Endpoint::from_suffix(&suffix) else {
        tracing::debug!(request_id = %request_id, suffix = %suffix, "Unknown proxy endpoint");
        metrics::record_request("unknown", 404, start);
        return (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            serde_json::json!({ "error": "unknown endpoint" }).to_string(),
        )
            .into_response();
    };

    let forwarded: Vec<(String, String)> = match endpoint.query_policy() {
        QueryPolicy::None => Vec::new(),
        QueryPolicy::PassThrough => params,
        QueryPolicy::Required(name) => {
            match params.into_iter().find(|(key, _)| key == name) {
                Some(pair) => vec![pair],
                None => {
                    let err = ProxyError::MissingParameter(name);
                    tracing::debug!(
                        request_id = %request_id,
                        endpoint = endpoint.suffix(),
                        "Missing required query parameter"
                    );
                    metrics::record_request(endpoint.suffix(), err.status().as_u16(), start);
                    return err.into_response();
                }
            }
        }
    };

    tracing::debug!(
        request_id = %request_id,
        endpoint = endpoint.suffix(),
        params = forwarded.len(),
        "Forwarding to upstream"
    );

    match state.upstream.fetch(endpoint, &forwarded).await {
        Ok(body) => {
            metrics::record_request(endpoint.suffix(), 200, start);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Body::from(body),
            )
                .into_response()
        }
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                endpoint = endpoint.suffix(),
                error = %err,
                "Upstream call failed"
            );
            metrics::record_request(endpoint.suffix(), err.status().as_u16(), start);
            err.into_response()
        }
    }
}

/// Fallback handler serving the static front-end bundle.
async fn asset_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    match method {
        Method::GET => state.assets.serve(uri.path(), false).await,
        Method::HEAD => state.assets.serve(uri.path(), true).await,
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
