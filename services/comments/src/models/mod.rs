// Domain models
pub mod comment;

pub use comment::{Comment, CommentBody, CommentsBody, ListCommentsRequest, NewComment};
