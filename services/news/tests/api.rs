use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use news::models::Post;
use news::{app, MemoryNewsStore};
use newsroom_service::middleware::with_request_tracking;
use newsroom_service::{server::Server, Config};

fn post(id: i64, title: &str, content: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        content: content.to_string(),
        pub_time: 1_700_000_000 + id,
        link: format!("https://news.example/{}", id),
    }
}

/// 25 posts mentioning "market" plus a few unrelated ones
fn fixture() -> MemoryNewsStore {
    let mut posts: Vec<Post> = (1..=25)
        .map(|id| post(id, &format!("Market update #{}", id), "stocks moved"))
        .collect();
    posts.push(post(100, "Football", "the derby ended 2:2"));
    posts.push(post(101, "Weather", "a sunny market day downtown"));
    MemoryNewsStore::new(posts)
}

fn router() -> Router {
    with_request_tracking(app(Arc::new(fixture())))
}

async fn send(uri: &str, body: &str) -> (StatusCode, Value) {
    let response = router()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<i64> {
    body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn get_by_id_returns_post() {
    let (status, body) = send("/news/id", r#"{"id": 7}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["post"]["id"], 7);
    assert_eq!(body["post"]["title"], "Market update #7");
    assert_eq!(body["post"]["link"], "https://news.example/7");
    assert!(body.get("request_id").is_none());
}

#[tokio::test]
async fn get_by_id_unknown_is_failure() {
    let (status, body) = send("/news/id", r#"{"id": 4242}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("not found"), "unexpected error: {}", error);
}

#[tokio::test]
async fn get_by_id_without_id_is_not_found() {
    let (status, body) = send("/news/id", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn get_by_id_malformed_body() {
    let (status, body) = send("/news/id", "{invalid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn search_first_page() {
    let (status, body) = send("/news/reg", r#"{"reg_exp": "Market", "current_page": 1}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["posts"].as_array().unwrap().len(), 10);
    assert_eq!(
        body["pagination"],
        json!({"current_page": 1, "pages_number": 3, "items_on_page": 10})
    );
    // newest first
    assert_eq!(ids(&body)[0], 25);
    assert!(body["request_id"].as_str().unwrap().starts_with("req_"));
}

#[tokio::test]
async fn search_matches_content_too() {
    let (_, body) = send("/news/reg", r#"{"reg_exp": "market"}"#).await;

    assert_eq!(ids(&body), vec![101]);
}

#[tokio::test]
async fn search_unset_page_is_first_page() {
    let (_, first) = send("/news/reg", r#"{"reg_exp": "Market", "current_page": 1}"#).await;

    for body in [
        r#"{"reg_exp": "Market"}"#,
        r#"{"reg_exp": "Market", "current_page": 0}"#,
        r#"{"reg_exp": "Market", "current_page": -3}"#,
    ] {
        let (status, page) = send("/news/reg", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["pagination"]["current_page"], 1);
        assert_eq!(ids(&page), ids(&first));
    }
}

#[tokio::test]
async fn search_past_last_page_returns_last_page() {
    let (_, last) = send("/news/reg", r#"{"reg_exp": "Market", "current_page": 3}"#).await;
    let (status, past) = send("/news/reg", r#"{"reg_exp": "Market", "current_page": 5}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(past["pagination"]["current_page"], 3);
    assert_eq!(ids(&past), ids(&last));
    assert_eq!(ids(&last), vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn search_is_idempotent() {
    let request = r#"{"reg_exp": "update #1", "current_page": 1}"#;
    let (_, a) = send("/news/reg", request).await;
    let (_, b) = send("/news/reg", request).await;

    assert_eq!(a["posts"], b["posts"]);
    assert_eq!(a["pagination"], b["pagination"]);
}

#[tokio::test]
async fn search_without_matches() {
    let (status, body) = send("/news/reg", r#"{"reg_exp": "^nothing here$", "current_page": 2}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["posts"], json!([]));
    assert_eq!(
        body["pagination"],
        json!({"current_page": 1, "pages_number": 0, "items_on_page": 10})
    );
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn search_invalid_pattern_keeps_request_id() {
    let (status, body) = send("/news/reg", r#"{"reg_exp": "(unclosed"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert!(body["request_id"].as_str().unwrap().starts_with("req_"));
}

#[tokio::test]
async fn search_malformed_body_keeps_request_id() {
    let (status, body) = send("/news/reg", "{invalid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["request_id"].is_string());
}

async fn send_oversized(router: Router) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/news/reg")
                .body(Body::from(vec![b' '; 3 * 1024 * 1024]))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn search_oversized_body_keeps_request_id() {
    let (status, body) = send_oversized(router()).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], false);
    assert!(body["request_id"].as_str().unwrap().starts_with("req_"));
}

#[tokio::test]
async fn search_oversized_body_through_server_stack() {
    let server = Server::new(Config::for_service("news"));
    let (status, body) = send_oversized(server.apply_middleware(app(Arc::new(fixture())))).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
    assert!(body["request_id"].as_str().unwrap().starts_with("req_"));
}

#[tokio::test]
async fn liveness() {
    let response = router()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"up and running");
}
