use serde::{Deserialize, Serialize};

/// A published news item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Publication time, Unix seconds
    pub pub_time: i64,
    pub link: String,
}

/// Body of `GET /news/id`
///
/// An absent `id` decodes as `0`, which never names a stored post.
#[derive(Debug, Deserialize)]
pub struct GetPostByIdRequest {
    #[serde(default)]
    pub id: i64,
}

/// Body of `GET /news/reg`
#[derive(Debug, Deserialize)]
pub struct GetPostsByRegExpRequest {
    #[serde(default)]
    pub reg_exp: String,
    /// Zero, negative or absent means the first page
    #[serde(default)]
    pub current_page: i64,
}

#[derive(Debug, Serialize)]
pub struct PostBody {
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct PostsBody {
    pub posts: Vec<Post>,
}
