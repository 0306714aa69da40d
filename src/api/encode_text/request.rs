// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! EncodeTextRequest type

use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Request body for POST /encode_text
///
/// Only presence of the `text` key is validated; an empty string is
/// accepted and handed to the encoder as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncodeTextRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl EncodeTextRequest {
    /// Returns the text to encode, or the missing-field error
    pub fn text(&self) -> Result<&str, ApiError> {
        self.text.as_deref().ok_or(ApiError::MissingField("text"))
    }
}
