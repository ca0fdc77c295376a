//! Censor service
//!
//! `POST /censor` answers whether a text contains one of the configured
//! banned substrings.

use std::sync::Arc;

use axum::Router;
use newsroom_service::health;

pub mod censor;
pub mod handlers;
pub mod models;

pub use censor::{Censor, CensorConfig};

/// Name used for configuration lookup and health reporting
pub const SERVICE_NAME: &str = "censor";

/// Complete router: censor route plus liveness
pub fn app(censor: Arc<Censor>) -> Router {
    handlers::router(censor).merge(health::router(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}
