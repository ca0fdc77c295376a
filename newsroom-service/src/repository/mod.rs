//! Store adapter plumbing shared by the services
//!
//! Each service declares its own store trait (news posts, comments) using
//! RPITIT async methods returning [`RepositoryResult`]. This module holds the
//! pieces those traits have in common: the structured error and the result
//! alias.
//!
//! # Example
//!
//! ```rust,ignore
//! use newsroom_service::pagination::Page;
//! use newsroom_service::repository::RepositoryResult;
//!
//! pub trait NewsStore: Send + Sync {
//!     fn lookup(&self, id: i64) -> impl Future<Output = RepositoryResult<Post>> + Send;
//!     fn search(&self, pattern: &str, page: u32)
//!         -> impl Future<Output = RepositoryResult<Page<Post>>> + Send;
//! }
//! ```

mod error;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};

/// Result type for store adapter operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
