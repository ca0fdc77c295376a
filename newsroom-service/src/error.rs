//! Error types and HTTP response conversion
//!
//! Every request-level failure is rendered as a [`Failure`] envelope. The
//! request-scoped kinds (decode, dependency, not found, storage) answer with
//! `400 Bad Request`; failures of the service itself answer with `500`.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::Failure;
use crate::repository::{RepositoryError, RepositoryErrorKind};

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type shared by all newsroom services
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Configuration loaded but violates an invariant
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tracing subscriber could not be installed
    #[error("Tracing error: {0}")]
    Tracing(String),

    /// Connection pool could not be created
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request body could not be read, e.g. it exceeds the size limit
    #[error("{0}")]
    Body(#[from] BytesRejection),

    /// Request body is not valid JSON for the endpoint
    #[error("{0}")]
    Decode(serde_json::Error),

    /// The serving layer did not provide the store to the handler
    #[error("could not get the DB from context")]
    DependencyMissing,

    /// Request decoded but its content is unacceptable
    #[error("{0}")]
    Validation(String),

    /// Store adapter failure (not found or storage failure)
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Response body could not be serialized
    #[error("failed to encode response: {0}")]
    Encode(serde_json::Error),
}

impl Error {
    /// HTTP status paired with this error's failure envelope
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Body(rejection) => rejection.status(),
            Error::Decode(_)
            | Error::DependencyMissing
            | Error::Validation(_)
            | Error::Repository(_) => StatusCode::BAD_REQUEST,
            Error::Config(_)
            | Error::InvalidConfig(_)
            | Error::Tracing(_)
            | Error::Connection(_)
            | Error::Io(_)
            | Error::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            Error::Repository(e) if e.is_retriable() => {
                tracing::warn!(
                    operation = %e.operation,
                    kind = %e.kind,
                    "Transient storage failure: {}", e.message
                );
            }
            Error::Repository(e) if e.kind != RepositoryErrorKind::NotFound => {
                tracing::error!(
                    operation = %e.operation,
                    kind = %e.kind,
                    "Storage failure: {}", e.message
                );
            }
            Error::Repository(_) | Error::Body(_) | Error::Decode(_) | Error::Validation(_) => {
                tracing::debug!("Request rejected: {}", self);
            }
            _ => tracing::error!("{}", self),
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        err.log();
        Failure::with_status(err.status(), err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        Failure::from(self).into_response()
    }
}
