//! API gateway
//!
//! Runs as its own process next to the other services. It serves only the
//! liveness endpoints and does not forward requests.

use axum::Router;
use newsroom_service::health;

/// Name used for configuration lookup and health reporting
pub const SERVICE_NAME: &str = "api-gateway";

/// Complete router
pub fn app() -> Router {
    health::router(SERVICE_NAME, env!("CARGO_PKG_VERSION"))
}
