// Handler modules
pub mod comments;

pub use comments::{add_comment, list_comments, router};
