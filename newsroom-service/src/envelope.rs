//! JSON response envelope shared by every endpoint
//!
//! Successful responses carry `"success": true` next to the endpoint's
//! payload fields; failures carry `"success": false` and an `"error"` string.
//! The status code is fixed on the response before the body is attached.
//!
//! ```text
//! {"success":true,"post":{...}}
//! {"success":true,"posts":[...],"pagination":{...},"request_id":"req_..."}
//! {"success":false,"error":"lookup: post 7 not found"}
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use newsroom_service::envelope::{Failure, Success};
//!
//! #[derive(Serialize)]
//! struct PostBody { post: Post }
//!
//! async fn get_post(...) -> Result<Success<PostBody>, Failure> {
//!     let post = store.lookup(id).await.map_err(Error::from)?;
//!     Ok(Success::new(PostBody { post }))
//! }
//! ```

use axum::{
    body::{Body, Bytes},
    extract::rejection::BytesRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pagination::Pagination;

const ENCODE_FAILURE_BODY: &str = r#"{"success":false,"error":"failed to encode response"}"#;

/// Successful response envelope
#[derive(Debug, Clone, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    payload: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
}

impl<T> Success<T> {
    /// Wrap a payload whose fields are flattened into the envelope
    pub fn new(payload: T) -> Self {
        Self {
            success: true,
            payload,
            pagination: None,
            request_id: None,
        }
    }

    /// Attach pagination metadata
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Attach the correlation id, if the request has one
    #[must_use]
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        encode(StatusCode::OK, &self)
    }
}

/// Failure response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Failure {
    /// Always `false`
    pub success: bool,
    /// Human readable reason
    pub error: String,
    /// Correlation id for endpoints that echo it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip, default = "bad_request")]
    status: StatusCode,
}

fn bad_request() -> StatusCode {
    StatusCode::BAD_REQUEST
}

impl Failure {
    /// Create a `400 Bad Request` failure
    pub fn new(error: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, error)
    }

    /// Create a failure with an explicit status
    pub fn with_status(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            request_id: None,
            status,
        }
    }

    /// Attach the correlation id, if the request has one
    #[must_use]
    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Status code this failure is answered with
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        encode(self.status, &self)
    }
}

/// Serialize an envelope, committing the status before the body
///
/// An envelope that cannot be serialized is logged and answered with `500`.
fn encode<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => json_response(status, Body::from(bytes)),
        Err(err) => {
            tracing::error!(error = %Error::Encode(err), "Failed to write response");
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                Body::from(ENCODE_FAILURE_BODY),
            )
        }
    }
}

fn json_response(status: StatusCode, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

/// Decode a JSON request body
///
/// GET endpoints take their parameters as a JSON body, so the raw bytes are
/// decoded here instead of through the `Json` extractor, which insists on a
/// `Content-Type` header and answers with its own rejection format.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(Error::Decode)
}

/// Decode a request body taken as `Result<Bytes, BytesRejection>`
///
/// A body that could not be read, for example one over the size limit,
/// becomes [`Error::Body`] and keeps the rejection's status.
pub fn decode_body<T: DeserializeOwned>(
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<T> {
    decode(&body?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    #[derive(Serialize)]
    struct Greeting {
        greeting: &'static str,
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_flattens_payload() {
        let response = Success::new(Greeting { greeting: "hi" }).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            body_json(response).await,
            json!({"success": true, "greeting": "hi"})
        );
    }

    #[tokio::test]
    async fn test_success_with_pagination_and_request_id() {
        let response = Success::new(Greeting { greeting: "hi" })
            .with_pagination(Pagination::new(2, 3))
            .with_request_id(Some("req_1".to_string()))
            .into_response();
        assert_eq!(
            body_json(response).await,
            json!({
                "success": true,
                "greeting": "hi",
                "pagination": {"current_page": 2, "pages_number": 3, "items_on_page": 10},
                "request_id": "req_1"
            })
        );
    }

    #[tokio::test]
    async fn test_failure_defaults_to_bad_request() {
        let response = Failure::new("boom").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "error": "boom"})
        );
    }

    #[tokio::test]
    async fn test_failure_keeps_request_id() {
        let response = Failure::new("boom")
            .with_request_id(Some("req_2".to_string()))
            .into_response();
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "error": "boom", "request_id": "req_2"})
        );
    }

    #[test]
    fn test_decode_reports_serde_error() {
        #[derive(Debug, Deserialize)]
        struct ById {
            #[allow(dead_code)]
            id: i64,
        }

        let err = decode::<ById>(b"{invalid").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_decode_body_rejection() {
        use axum::extract::FromRequest;
        use axum::http::Request;

        let request = Request::builder()
            .body(Body::from(vec![b' '; 3 * 1024 * 1024]))
            .unwrap();
        let body = Bytes::from_request(request, &()).await;

        let err = decode_body::<Value>(body).unwrap_err();
        assert!(matches!(err, Error::Body(_)));
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_unserializable_payload_is_server_error() {
        struct Broken;

        impl Serialize for Broken {
            fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("broken"))
            }
        }

        #[derive(Serialize)]
        struct Holder {
            value: Broken,
        }

        let response = Success::new(Holder { value: Broken }).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "error": "failed to encode response"})
        );
    }
}
