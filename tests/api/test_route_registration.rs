// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration tests
//!
//! These tests verify that:
//! - GET /health always returns 200 with the fixed body
//! - The encode routes are registered for POST only
//! - Unknown routes return 404
//!
//! None of them require model files on disk.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use clip_embed_server::api::{create_app, AppState};
use tower::util::ServiceExt; // for `oneshot`

fn app() -> Router {
    create_app(AppState::new_for_test())
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_returns_200() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body, serde_json::json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_health_rejects_post() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_encode_image_rejects_get() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/encode_image")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_encode_text_rejects_get() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/encode_text")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/encode_audio")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
