use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use deskproxy_core::SanitizedConfig;
use serde::Serialize;
use std::sync::Arc;

use crate::metrics::encode_metrics;
use crate::state::AppState;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Routes advertised by the diagnostic endpoints.
pub const TICKET_ENDPOINTS: &[&str] = &["/api/tickets/client-by-empresa?cf_empresa=NAME"];

const SERVICE_MESSAGE: &str = "Freshdesk ticket API running";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub features: Vec<&'static str>,
    pub endpoints: Vec<&'static str>,
}

/// GET /
///
/// Health status plus a short description of what the service offers.
pub async fn root() -> Json<RootResponse> {
    let mut endpoints = vec!["/health", "/api/tickets/status"];
    endpoints.extend_from_slice(TICKET_ENDPOINTS);

    Json(RootResponse {
        status: "healthy",
        message: SERVICE_MESSAGE,
        version: VERSION,
        features: vec!["tickets_by_empresa", "direct_freshdesk_integration"],
        endpoints,
    })
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: SERVICE_MESSAGE,
        version: VERSION,
    })
}

/// GET /api/config
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// GET /metrics
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        encode_metrics(),
    )
}
