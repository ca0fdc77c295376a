//! News service
//!
//! `GET /news/id` returns one post; `GET /news/reg` searches posts by regular
//! expression, ten per page. Both take their parameters as a JSON body.

use std::sync::Arc;

use axum::Router;
use newsroom_service::health;

pub mod handlers;
pub mod models;
pub mod store;

pub use store::{MemoryNewsStore, NewsStore, PgNewsStore};

/// Name used for configuration lookup and health reporting
pub const SERVICE_NAME: &str = "news";

/// Complete router: news routes plus liveness
pub fn app<S: NewsStore + 'static>(store: Arc<S>) -> Router {
    handlers::router(store).merge(health::router(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}
