// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /encode_image HTTP handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{error, info, warn};

use super::request::EncodeImageRequest;
use crate::api::http_server::AppState;
use crate::api::{ApiError, EmbeddingResponse};

/// POST /encode_image
///
/// Resolves an image from the request (base64 first, then URL/path) and
/// returns its embedding.
///
/// # Request Body
/// ```json
/// {
///   "image_b64": "...",   // optional, wins over image_url
///   "image_url": "..."    // optional: http(s) URL, data URL, or file path
/// }
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
pub async fn encode_image_handler(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<EmbeddingResponse>, ApiError> {
    info!("Received request to encode image");

    let Json(value) = body.map_err(|_| ApiError::NotJson)?;

    if !value.is_object() {
        return Err(ApiError::MissingData);
    }

    // Non-string source values cannot be loaded; same outcome as a value
    // that fails to decode
    let request: EncodeImageRequest =
        serde_json::from_value(value).map_err(|_| ApiError::ImageLoadFailed)?;

    let sources = request.sources()?;

    let mut image = None;
    for source in &sources {
        match source.resolve(&state.http_client).await {
            Ok(img) => {
                image = Some(img);
                break;
            }
            Err(e) => warn!("Failed to load image from source: {}", e),
        }
    }

    let image = image.ok_or(ApiError::ImageLoadFailed)?;
    info!("Image loaded ({}x{})", image.width(), image.height());

    let encoders = state.encoders()?;
    let embedding = encoders.image.encode(&image).await.map_err(|e| {
        error!("Error encoding image: {}", e);
        ApiError::Internal(e.to_string())
    })?;

    info!("Successfully encoded image to {} dimensions", embedding.len());

    Ok(Json(EmbeddingResponse::new(embedding)))
}
