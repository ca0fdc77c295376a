use tokio::sync::RwLock;

use newsroom_service::repository::RepositoryResult;

use super::{check_parent, CommentStore};
use crate::models::{Comment, NewComment};

/// In-memory comment store
#[derive(Debug, Default)]
pub struct MemoryCommentStore {
    comments: RwLock<Vec<Comment>>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CommentStore for MemoryCommentStore {
    async fn add(&self, comment: NewComment) -> RepositoryResult<Comment> {
        let mut comments = self.comments.write().await;

        if let Some(parent_id) = comment.parent_id {
            let parent_news_id = comments
                .iter()
                .find(|c| c.id == parent_id)
                .map(|c| c.news_id);
            check_parent(parent_id, parent_news_id, comment.news_id)?;
        }

        let stored = Comment {
            id: comments.last().map_or(1, |c| c.id + 1),
            news_id: comment.news_id,
            parent_id: comment.parent_id,
            content: comment.content,
            pub_time: chrono::Utc::now().timestamp(),
        };
        comments.push(stored.clone());

        Ok(stored)
    }

    async fn list_by_news(&self, news_id: i64) -> RepositoryResult<Vec<Comment>> {
        // Insertion order is creation order
        let comments = self.comments.read().await;
        Ok(comments
            .iter()
            .filter(|c| c.news_id == news_id)
            .cloned()
            .collect())
    }
}
