// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EncodeImageRequest type and source selection

use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::vision::ImageSource;

/// Request body for POST /encode_image
///
/// At most one image is resolved per request. When both fields are present
/// and non-empty, `image_b64` takes priority and `image_url` is the
/// fallback.
///
/// # Example
/// ```json
/// {
///   "image_b64": "iVBORw0KGgo...",
///   "image_url": "https://example.com/photo.jpg"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncodeImageRequest {
    /// Base64-encoded image bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_b64: Option<String>,

    /// HTTP(S) URL, data URL, or local file path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl EncodeImageRequest {
    /// Classifies the request into image sources to attempt, in priority
    /// order.
    ///
    /// Returns an error only when neither key was provided at all. Keys
    /// provided with empty values yield an empty list, which the handler
    /// reports as a load failure rather than a missing field.
    pub fn sources(&self) -> Result<Vec<ImageSource>, ApiError> {
        if self.image_b64.is_none() && self.image_url.is_none() {
            return Err(ApiError::MissingField("image_url"));
        }

        let mut sources = Vec::new();

        if let Some(b64) = self.image_b64.as_deref() {
            if !b64.is_empty() {
                sources.push(ImageSource::Base64(b64.to_string()));
            }
        }

        if let Some(location) = self.image_url.as_deref() {
            if !location.is_empty() {
                sources.push(ImageSource::classify(location));
            }
        }

        Ok(sources)
    }
}
