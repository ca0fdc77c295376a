//! Comments service
//!
//! `POST /comments` stores a comment (optionally a reply) on a news item;
//! `GET /comments/news` lists a news item's comments oldest first.

use std::sync::Arc;

use axum::Router;
use newsroom_service::health;

pub mod handlers;
pub mod models;
pub mod store;

pub use store::{CommentStore, MemoryCommentStore, PgCommentStore};

/// Name used for configuration lookup and health reporting
pub const SERVICE_NAME: &str = "comments";

/// Complete router: comment routes plus liveness
pub fn app<S: CommentStore + 'static>(store: Arc<S>) -> Router {
    handlers::router(store).merge(health::router(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}
