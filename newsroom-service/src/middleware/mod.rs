//! Middleware shared by every newsroom service

pub mod failure_envelope;
pub mod request_tracking;

pub use failure_envelope::{envelope_failures, handle_panic};

pub use request_tracking::{
    request_id_layer, request_id_propagation_layer, sensitive_headers_layer,
    with_request_tracking, SENSITIVE_HEADERS,
};
