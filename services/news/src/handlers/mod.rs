// Handler modules
pub mod news;

pub use news::{get_post_by_id, get_posts_by_reg_exp, router};
