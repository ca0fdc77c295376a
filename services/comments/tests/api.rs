use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use comments::{app, MemoryCommentStore};

async fn send(router: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
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

fn router() -> Router {
    app(Arc::new(MemoryCommentStore::new()))
}

#[tokio::test]
async fn add_and_list_comments() {
    let router = router();

    let (status, first) = send(
        &router,
        "POST",
        "/comments",
        json!({"news_id": 3, "content": "great read"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    assert_eq!(first["comment"]["news_id"], 3);

    let parent_id = first["comment"]["id"].as_i64().unwrap();
    let (status, reply) = send(
        &router,
        "POST",
        "/comments",
        json!({"news_id": 3, "parent_id": parent_id, "content": "agreed"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["comment"]["parent_id"], parent_id);

    send(
        &router,
        "POST",
        "/comments",
        json!({"news_id": 4, "content": "elsewhere"}),
    )
    .await;

    let (status, listed) = send(&router, "GET", "/comments/news", json!({"news_id": 3})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["success"], true);
    let contents: Vec<&str> = listed["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["great read", "agreed"]);
}

#[tokio::test]
async fn empty_content_is_rejected() {
    let (status, body) = send(
        &router(),
        "POST",
        "/comments",
        json!({"news_id": 1, "content": "   "}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "error": "comment content cannot be empty"})
    );
}

#[tokio::test]
async fn reply_across_news_items_is_rejected() {
    let router = router();
    let (_, first) = send(
        &router,
        "POST",
        "/comments",
        json!({"news_id": 1, "content": "hello"}),
    )
    .await;

    let (status, body) = send(
        &router,
        "POST",
        "/comments",
        json!({"news_id": 2, "parent_id": first["comment"]["id"], "content": "wrong thread"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/comments")
                .body(Body::from("{invalid"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_for_unknown_news_is_empty() {
    let (status, body) = send(&router(), "GET", "/comments/news", json!({"news_id": 9})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "comments": []}));
}
