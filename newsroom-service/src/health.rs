//! Liveness endpoints served by every service

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Body of `GET /`
pub const LIVENESS_MARKER: &str = "up and running";

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug)]
struct ServiceInfo {
    name: String,
    version: String,
}

/// Router with `GET /` and `GET /health`
///
/// Services merge this into their own router. Pass the binary's
/// `env!("CARGO_PKG_VERSION")` as `version`.
pub fn router(service: impl Into<String>, version: impl Into<String>) -> Router {
    let info = Arc::new(ServiceInfo {
        name: service.into(),
        version: version.into(),
    });

    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health))
        .with_state(info)
}

/// Plain-text liveness marker
pub async fn liveness() -> &'static str {
    LIVENESS_MARKER
}

async fn health(State(info): State<Arc<ServiceInfo>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: info.name.clone(),
        version: Some(info.version.clone()),
    };

    (StatusCode::OK, Json(response))
}
