use serde::{Deserialize, Serialize};

/// A comment on a news post, optionally replying to another comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub news_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub content: String,
    /// Creation time, Unix seconds
    pub pub_time: i64,
}

/// Body of `POST /comments`
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub news_id: i64,
    #[serde(default)]
    pub parent_id: Option<i64>,
    pub content: String,
}

/// Body of `GET /comments/news`
#[derive(Debug, Deserialize)]
pub struct ListCommentsRequest {
    pub news_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub comment: Comment,
}

#[derive(Debug, Serialize)]
pub struct CommentsBody {
    pub comments: Vec<Comment>,
}
