//! Failure envelope for responses produced outside handlers
//!
//! Layers such as the timeout and the body limit answer on their own, with an
//! empty or plain-text body. This middleware rewrites any error response that
//! is not already JSON into a [`Failure`] carrying the same status and the
//! request's correlation id.

use std::any::Any;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{header, HeaderMap, StatusCode};

use crate::envelope::Failure;
use crate::ids::CorrelationId;

/// `axum::middleware::from_fn` handler wrapping non-JSON error responses
pub async fn envelope_failures(
    correlation: CorrelationId,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_json(response.headers()) {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    let reason = status.canonical_reason().unwrap_or("request failed");

    tracing::debug!(status = status.as_u16(), "Wrapping middleware failure in envelope");

    let mut wrapped = Failure::with_status(status, reason.to_lowercase())
        .with_request_id(correlation.into_inner())
        .into_response();

    for name in [header::CONTENT_TYPE, header::CONTENT_LENGTH, header::CONTENT_ENCODING] {
        parts.headers.remove(&name);
    }
    wrapped.headers_mut().extend(parts.headers);
    wrapped
}

/// `CatchPanicLayer::custom` handler answering with a `500` failure
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(panic = detail, "Handler panicked");

    Failure::with_status(StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
