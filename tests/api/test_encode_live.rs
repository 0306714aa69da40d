// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end tests against real model files
//!
//! These run the full request path through loaded encoders and are ignored
//! unless the ONNX exports are present under ./models.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use clip_embed_server::{
    api::{create_app, AppState},
    config::ServiceConfig,
    encoders::EncoderContext,
};
use std::sync::Arc;
use tower::util::ServiceExt;

// 1x1 red PNG image (base64)
const TINY_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

async fn app_with_models() -> Router {
    let config = ServiceConfig::default();
    let encoders = EncoderContext::load(&config)
        .await
        .expect("Failed to load encoder models");
    create_app(AppState::new(Arc::new(encoders)))
}

fn json_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_encode_text_dimensions() {
    let app = app_with_models().await;

    let response = app
        .oneshot(json_request(
            "/encode_text",
            r#"{"text": "a photo of a cat"}"#.to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);

    let embedding = body["embedding"].as_array().unwrap();
    assert_eq!(embedding.len(), 512);
    assert_eq!(body["dimensions"], 512);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_encode_text_deterministic() {
    let app = app_with_models().await;
    let body = r#"{"text": "repeatable input"}"#;

    let first = response_json(
        app.clone()
            .oneshot(json_request("/encode_text", body.to_string()))
            .await
            .unwrap(),
    )
    .await;
    let second = response_json(
        app.oneshot(json_request("/encode_text", body.to_string()))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first["embedding"], second["embedding"]);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_encode_image_from_base64() {
    let app = app_with_models().await;

    let response = app
        .oneshot(json_request(
            "/encode_image",
            format!(r#"{{"image_b64": "{}"}}"#, TINY_PNG_BASE64),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["dimensions"], 512);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_encode_image_same_result_across_sources() {
    // The same image delivered as base64 and as a data URL must produce
    // the same embedding
    let app = app_with_models().await;

    let from_b64 = response_json(
        app.clone()
            .oneshot(json_request(
                "/encode_image",
                format!(r#"{{"image_b64": "{}"}}"#, TINY_PNG_BASE64),
            ))
            .await
            .unwrap(),
    )
    .await;

    let from_data_url = response_json(
        app.oneshot(json_request(
            "/encode_image",
            format!(
                r#"{{"image_url": "data:image/png;base64,{}"}}"#,
                TINY_PNG_BASE64
            ),
        ))
        .await
        .unwrap(),
    )
    .await;

    assert_eq!(from_b64["embedding"], from_data_url["embedding"]);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_base64_priority_over_url() {
    // With a valid base64 and a broken URL, the base64 source wins and the
    // request succeeds
    let app = app_with_models().await;

    let response = app
        .oneshot(json_request(
            "/encode_image",
            format!(
                r#"{{"image_b64": "{}", "image_url": "/nonexistent/image.png"}}"#,
                TINY_PNG_BASE64
            ),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
