//! Request tracking middleware
//!
//! Assigns every request a correlation id, echoes it back in the
//! `x-request-id` response header and masks credentials in traced headers.

use axum::Router;
use http::HeaderName;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

use crate::ids::MakeTypedRequestId;

/// Sensitive headers that should be masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Generates a `req_<uuidv7>` id unless the client already sent one
pub fn request_id_layer() -> SetRequestIdLayer<MakeTypedRequestId> {
    SetRequestIdLayer::x_request_id(MakeTypedRequestId)
}

/// Copies the request id onto the response
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Marks credential headers as sensitive so `TraceLayer` redacts them
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    let headers = SENSITIVE_HEADERS
        .iter()
        .map(|h| HeaderName::from_static(*h))
        .collect::<Vec<_>>();

    SetSensitiveRequestHeadersLayer::new(headers)
}

/// Wrap a router with the request tracking layers
///
/// The id layer is outermost so everything below it, including handlers,
/// sees the assigned id.
pub fn with_request_tracking(router: Router) -> Router {
    router
        .layer(sensitive_headers_layer())
        .layer(request_id_propagation_layer())
        .layer(request_id_layer())
}
