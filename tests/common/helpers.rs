// tests/common/helpers.rs
//! Shared helper functions for integration tests

use axum::{
    body::Body,
    http::{self, Method, Request, StatusCode},
    response::Response,
    Router,
};
use board_server::create_router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub fn create_test_app(pool: PgPool) -> Router {
    create_router(pool)
}

/// Sends a request with a JSON body and returns the raw response.
pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Sends a bodyless GET and returns the raw response.
pub async fn send_get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn read_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn read_json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).expect("response body was not valid JSON")
}

/// Creates a thread through the API and returns its id.
pub async fn create_test_thread(app: &Router, board: &str, text: &str, password: &str) -> Uuid {
    let response = send_json(
        app,
        Method::POST,
        &format!("/api/threads/{}", board),
        json!({ "text": text, "delete_password": password }),
    )
    .await;

    let status = response.status();
    let body = read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "failed to create thread: {}", body);

    Uuid::parse_str(body["id"].as_str().expect("thread id missing")).unwrap()
}

/// Creates a reply through the API and returns its id.
pub async fn create_test_reply(
    app: &Router,
    board: &str,
    thread_id: Uuid,
    text: &str,
    password: &str,
) -> Uuid {
    let response = send_json(
        app,
        Method::POST,
        &format!("/api/replies/{}", board),
        json!({
            "thread_id": thread_id.to_string(),
            "text": text,
            "delete_password": password,
        }),
    )
    .await;

    let status = response.status();
    let body = read_json(response).await;
    assert_eq!(status, StatusCode::CREATED, "failed to create reply: {}", body);

    Uuid::parse_str(body["id"].as_str().expect("reply id missing")).unwrap()
}
