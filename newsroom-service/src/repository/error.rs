//! Repository error types
//!
//! Store adapters report failures as a [`RepositoryError`]. The wire contract
//! does not distinguish kinds (every failure becomes the same envelope), but
//! the kind drives logging and lets callers branch on "not found".
//!
//! # Example
//!
//! ```rust
//! use newsroom_service::repository::{RepositoryError, RepositoryErrorKind};
//!
//! let error = RepositoryError::not_found("post", 42);
//! assert_eq!(error.kind, RepositoryErrorKind::NotFound);
//! assert_eq!(error.to_string(), "lookup: post 42 not found");
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Fetching a single record by identifier
    Lookup,
    /// Pattern search over stored records
    Search,
    /// Counting records for pagination
    Count,
    /// Listing records by an owning key
    List,
    /// Inserting a record
    Insert,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lookup => write!(f, "lookup"),
            Self::Search => write!(f, "search"),
            Self::Count => write!(f, "count"),
            Self::List => write!(f, "list"),
            Self::Insert => write!(f, "insert"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// No record matches the identifier
    NotFound,
    /// The search pattern is not a valid regular expression
    InvalidPattern,
    /// Database constraint violation
    ConstraintViolation,
    /// Failed to reach the database
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Any other query or transport failure
    StorageFailure,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::InvalidPattern => write!(f, "invalid_pattern"),
            Self::ConstraintViolation => write!(f, "constraint_violation"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::StorageFailure => write!(f, "storage_failure"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
        }
    }

    /// Create a "not found" error for a record type and identifier
    pub fn not_found(entity: &str, id: impl fmt::Display) -> Self {
        Self::new(
            RepositoryOperation::Lookup,
            RepositoryErrorKind::NotFound,
            format!("{} {} not found", entity, id),
        )
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::Search,
            RepositoryErrorKind::InvalidPattern,
            message,
        )
    }

    /// Create a generic storage failure
    pub fn storage_failure(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::StorageFailure, message)
    }

    /// Create a constraint violation error
    pub fn constraint_violation(
        operation: RepositoryOperation,
        message: impl Into<String>,
    ) -> Self {
        Self::new(operation, RepositoryErrorKind::ConstraintViolation, message)
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::Lookup,
            RepositoryErrorKind::ConnectionFailed,
            message,
        )
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Transient failures; the request path never retries, this is for logging
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation, self.message)
    }
}

impl std::error::Error for RepositoryError {}

/// PostgreSQL SQLSTATE for an invalid regular expression
#[cfg(feature = "database")]
const INVALID_REGULAR_EXPRESSION: &str = "2201B";

#[cfg(feature = "database")]
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error as E;

        match err {
            E::RowNotFound => Self::new(
                RepositoryOperation::Lookup,
                RepositoryErrorKind::NotFound,
                "record not found",
            ),
            E::PoolTimedOut => Self::new(
                RepositoryOperation::Lookup,
                RepositoryErrorKind::Timeout,
                "connection pool timed out",
            ),
            E::PoolClosed => Self::connection_failed("connection pool is closed"),
            E::WorkerCrashed => Self::connection_failed("database worker crashed"),
            E::Io(e) => Self::connection_failed(e.to_string()),
            E::Tls(e) => Self::connection_failed(format!("TLS error: {}", e)),
            E::Database(db_err) => {
                let kind = if db_err.code().as_deref() == Some(INVALID_REGULAR_EXPRESSION) {
                    RepositoryErrorKind::InvalidPattern
                } else if db_err.is_unique_violation()
                    || db_err.is_foreign_key_violation()
                    || db_err.is_check_violation()
                {
                    RepositoryErrorKind::ConstraintViolation
                } else {
                    RepositoryErrorKind::StorageFailure
                };
                Self::new(RepositoryOperation::Lookup, kind, db_err.message())
            }
            other => Self::storage_failure(RepositoryOperation::Lookup, other.to_string()),
        }
    }
}
