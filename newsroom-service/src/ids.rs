//! Request identifiers and the per-request correlation id
//!
//! Incoming requests without an `x-request-id` header get a TypeID request id
//! (`req_<base32 uuidv7>`) from [`MakeTypedRequestId`]. Handlers read the id
//! through the [`CorrelationId`] extractor and echo it in their envelopes.

use std::convert::Infallible;
use std::fmt;

use axum::extract::FromRequestParts;
use http::{request::Parts, HeaderValue, Request};
use mti::prelude::*;
use tower_http::request_id::{MakeRequestId, RequestId as TowerRequestId};

/// Header carrying the correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Time-sortable request identifier, e.g. `req_01h455vb4pex5vsknk084sn02q`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(MagicTypeId);

impl RequestId {
    /// The prefix used for request IDs
    pub const PREFIX: &'static str = "req";

    /// Creates a new request ID with a UUIDv7
    #[must_use]
    pub fn new() -> Self {
        Self(Self::PREFIX.create_type_id::<V7>())
    }

    /// Returns the request ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `MakeRequestId` for tower-http that issues [`RequestId`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeTypedRequestId;

impl MakeRequestId for MakeTypedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<TowerRequestId> {
        let id = RequestId::new();
        let header_value = HeaderValue::from_str(id.as_str()).ok()?;
        Some(TowerRequestId::new(header_value))
    }
}

/// Correlation id of the current request
///
/// Read from the id assigned by the request tracking layer, falling back to
/// a raw `x-request-id` header. Absent when neither is present, which only
/// happens for routers served without [`crate::middleware::with_request_tracking`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationId(Option<String>);

impl CorrelationId {
    /// Borrow the id, if any
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Take the id for embedding in an envelope
    pub fn into_inner(self) -> Option<String> {
        self.0
    }

    fn from_parts(parts: &Parts) -> Self {
        let value = parts
            .extensions
            .get::<TowerRequestId>()
            .map(TowerRequestId::header_value)
            .or_else(|| parts.headers.get(REQUEST_ID_HEADER))
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        Self(value)
    }
}

impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
