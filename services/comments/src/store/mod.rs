//! Comment storage

use std::future::Future;

use newsroom_service::repository::{RepositoryError, RepositoryOperation, RepositoryResult};

use crate::models::{Comment, NewComment};

mod memory;
mod postgres;

pub use memory::MemoryCommentStore;
pub use postgres::PgCommentStore;

/// Persistence contract for comments
pub trait CommentStore: Send + Sync {
    /// Store a comment and return it with its assigned id and time
    ///
    /// A reply's parent must exist and belong to the same news item.
    fn add(&self, comment: NewComment) -> impl Future<Output = RepositoryResult<Comment>> + Send;

    /// All comments of a news item, oldest first
    fn list_by_news(
        &self,
        news_id: i64,
    ) -> impl Future<Output = RepositoryResult<Vec<Comment>>> + Send;
}

/// Check a reply against its parent's news id (`None` when the parent is missing)
fn check_parent(parent_id: i64, parent_news_id: Option<i64>, news_id: i64) -> RepositoryResult<()> {
    match parent_news_id {
        None => Err(RepositoryError::not_found("parent comment", parent_id)
            .with_operation(RepositoryOperation::Insert)),
        Some(id) if id != news_id => Err(RepositoryError::constraint_violation(
            RepositoryOperation::Insert,
            format!(
                "parent comment {} belongs to news {}, not {}",
                parent_id, id, news_id
            ),
        )),
        Some(_) => Ok(()),
    }
}
