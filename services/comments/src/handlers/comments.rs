use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::{get, post},
    Router,
};

use newsroom_service::envelope::{decode_body, Failure, Success};
use newsroom_service::Error;

use crate::models::{CommentBody, CommentsBody, ListCommentsRequest, NewComment};
use crate::store::CommentStore;

/// Comment routes bound to `store`
pub fn router<S: CommentStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/comments", post(add_comment::<S>))
        .route("/comments/news", get(list_comments::<S>))
        .with_state(store)
}

/// Add a comment to a news item
pub async fn add_comment<S: CommentStore>(
    State(store): State<Arc<S>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Success<CommentBody>, Failure> {
    let new_comment: NewComment = decode_body(body)?;

    if new_comment.content.trim().is_empty() {
        return Err(Error::Validation("comment content cannot be empty".to_string()).into());
    }

    let comment = store.add(new_comment).await.map_err(Error::from)?;

    tracing::info!(
        id = comment.id,
        news_id = comment.news_id,
        "Comment added"
    );

    Ok(Success::new(CommentBody { comment }))
}

/// List the comments of a news item
pub async fn list_comments<S: CommentStore>(
    State(store): State<Arc<S>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Success<CommentsBody>, Failure> {
    let req: ListCommentsRequest = decode_body(body)?;

    let comments = store.list_by_news(req.news_id).await.map_err(Error::from)?;

    tracing::debug!(news_id = req.news_id, count = comments.len(), "Listing comments");

    Ok(Success::new(CommentsBody { comments }))
}
