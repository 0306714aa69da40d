// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /encode_text HTTP handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{error, info};

use super::request::EncodeTextRequest;
use crate::api::http_server::AppState;
use crate::api::{ApiError, EmbeddingResponse};

/// POST /encode_text
///
/// # Request Body
/// ```json
/// { "text": "Ein Foto von einer Katze" }
/// ```
///
/// # Response Body
/// ```json
/// {
///   "success": true,
///   "embedding": [0.1, 0.2, ...],
///   "dimensions": 512
/// }
/// ```
pub async fn encode_text_handler(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<EmbeddingResponse>, ApiError> {
    info!("Received request to encode text");

    let Json(value) = body.map_err(|_| ApiError::NotJson)?;

    // A null body or a non-string text value has no text to encode
    let request: EncodeTextRequest =
        serde_json::from_value(value).map_err(|_| ApiError::MissingField("text"))?;
    let text = request.text()?;

    let preview: String = text.chars().take(50).collect();
    info!("Encoding text: '{}'", preview);

    let encoders = state.encoders()?;
    let embedding = encoders.text.encode(text).await.map_err(|e| {
        error!("Error encoding text: {}", e);
        ApiError::Internal(e.to_string())
    })?;

    info!("Successfully encoded text to {} dimensions", embedding.len());

    Ok(Json(EmbeddingResponse::new(embedding)))
}
