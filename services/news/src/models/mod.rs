// Domain models
pub mod post;

pub use post::{GetPostByIdRequest, GetPostsByRegExpRequest, Post, PostBody, PostsBody};
