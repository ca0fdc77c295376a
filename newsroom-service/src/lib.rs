//! # newsroom-service
//!
//! Shared runtime for the newsroom HTTP services (news, comments, censor and
//! the API gateway).
//!
//! ## Features
//!
//! - **Envelope protocol**: every endpoint answers with a JSON
//!   `{"success": ...}` envelope, failures as `400` with an `error` string
//! - **Layered configuration**: defaults, TOML files, `NEWSROOM_*` and legacy
//!   `<SERVICE>_PORT` / `DB_URL` variables
//! - **Request tracking**: TypeID request ids propagated in `x-request-id`
//! - **Pagination**: fixed page size with clamped page resolution
//! - **Storage plumbing**: structured repository errors and a PostgreSQL pool
//!   with retrying connect (`database` feature)
//! - **Graceful shutdown** on SIGTERM and SIGINT
//!
//! ## Example
//!
//! ```rust,no_run
//! use newsroom_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load_for_service("censor")?;
//!     init_tracing(&config)?;
//!
//!     let app = health::router("censor", env!("CARGO_PKG_VERSION"));
//!
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod observability;
pub mod pagination;
pub mod repository;
pub mod server;

#[cfg(feature = "database")]
pub mod database;

pub use config::Config;
pub use error::{Error, Result};

/// Common imports for service crates
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig};
    pub use crate::envelope::{decode, decode_body, Failure, Success};
    pub use crate::error::{Error, Result};
    pub use crate::health;
    pub use crate::ids::{CorrelationId, MakeTypedRequestId, RequestId};
    pub use crate::middleware::with_request_tracking;
    pub use crate::observability::init_tracing;
    pub use crate::pagination::{Page, Pagination, ITEMS_ON_PAGE};
    pub use crate::repository::{
        RepositoryError, RepositoryErrorKind, RepositoryOperation, RepositoryResult,
    };
    pub use crate::server::Server;

    #[cfg(feature = "database")]
    pub use crate::database::create_pool;

    pub use axum::{
        body::Bytes,
        extract::State,
        routing::{get, post},
        Router,
    };
    pub use serde::{Deserialize, Serialize};
}
