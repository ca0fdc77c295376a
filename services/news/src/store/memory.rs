use regex::Regex;

use newsroom_service::pagination::{paginate, Page};
use newsroom_service::repository::{RepositoryError, RepositoryResult};

use super::NewsStore;
use crate::models::Post;

/// Fixed in-memory set of posts
///
/// Search uses the `regex` crate, which agrees with PostgreSQL's `~` on the
/// common subset (no backreferences or lookaround).
#[derive(Debug, Clone, Default)]
pub struct MemoryNewsStore {
    // newest first
    posts: Vec<Post>,
}

impl MemoryNewsStore {
    pub fn new(posts: impl IntoIterator<Item = Post>) -> Self {
        let mut posts: Vec<Post> = posts.into_iter().collect();
        posts.sort_by(|a, b| b.pub_time.cmp(&a.pub_time).then(b.id.cmp(&a.id)));
        Self { posts }
    }
}

impl NewsStore for MemoryNewsStore {
    async fn lookup(&self, id: i64) -> RepositoryResult<Post> {
        self.posts
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("post", id))
    }

    async fn search(&self, pattern: &str, page: u32) -> RepositoryResult<Page<Post>> {
        let re = Regex::new(pattern).map_err(|e| RepositoryError::invalid_pattern(e.to_string()))?;

        let matches: Vec<Post> = self
            .posts
            .iter()
            .filter(|post| re.is_match(&post.title) || re.is_match(&post.content))
            .cloned()
            .collect();

        Ok(paginate(matches, page))
    }
}
