//! Post storage
//!
//! [`NewsStore`] is the contract the handlers depend on. [`PgNewsStore`]
//! backs the running service; [`MemoryNewsStore`] holds a fixed set of posts
//! and is used by tests and local experiments.

use std::future::Future;

use newsroom_service::pagination::Page;
use newsroom_service::repository::RepositoryResult;

use crate::models::Post;

mod memory;
mod postgres;

pub use memory::MemoryNewsStore;
pub use postgres::PgNewsStore;

/// Read-only access to published posts
pub trait NewsStore: Send + Sync {
    /// Fetch one post; `NotFound` when no post has this id
    fn lookup(&self, id: i64) -> impl Future<Output = RepositoryResult<Post>> + Send;

    /// Posts whose title or content matches `pattern`, newest first
    ///
    /// `page` is clamped into range. An empty result is a success with
    /// `pages_number == 0`; an unparsable pattern is an error.
    fn search(
        &self,
        pattern: &str,
        page: u32,
    ) -> impl Future<Output = RepositoryResult<Page<Post>>> + Send;
}
