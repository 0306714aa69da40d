// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::{encode_image_handler, encode_text_handler, ApiError};
use crate::config::ServiceConfig;
use crate::encoders::EncoderContext;

/// Shared per-process state handed to every request handler.
///
/// The encoder context is immutable after startup; the reqwest client is
/// cloned cheaply per request for remote image fetches. The client carries
/// no timeout, so a slow remote stalls only the request that asked for it.
#[derive(Clone)]
pub struct AppState {
    encoders: Option<Arc<EncoderContext>>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(encoders: Arc<EncoderContext>) -> Self {
        Self {
            encoders: Some(encoders),
            http_client: reqwest::Client::new(),
        }
    }

    /// State with an empty encoder slot, for exercising the router and the
    /// 4xx paths without model files on disk.
    pub fn new_for_test() -> Self {
        Self {
            encoders: None,
            http_client: reqwest::Client::new(),
        }
    }

    /// Returns the encoder context, or an internal error if the process
    /// was started without one.
    pub fn encoders(&self) -> Result<&Arc<EncoderContext>, ApiError> {
        self.encoders
            .as_ref()
            .ok_or_else(|| ApiError::Internal("Encoders not initialized".to_string()))
    }
}

/// Builds the service router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Embedding endpoints
        .route("/encode_image", post(encode_image_handler))
        .route("/encode_text", post(encode_text_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Binds the listener and serves until ctrl-c
pub async fn start_server(
    config: &ServiceConfig,
    state: AppState,
) -> Result<(), anyhow::Error> {
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!("API server listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

/// Liveness response for GET /health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
