// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Success response shared by both encode endpoints

use serde::{Deserialize, Serialize};

/// Response body for POST /encode_image and POST /encode_text
///
/// # Example
/// ```json
/// {
///   "success": true,
///   "embedding": [0.1, 0.2, ...],
///   "dimensions": 512
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Always true on the success path
    pub success: bool,

    /// Embedding vector in model output order
    pub embedding: Vec<f32>,

    /// Length of the embedding vector
    pub dimensions: usize,
}

impl EmbeddingResponse {
    pub fn new(embedding: Vec<f32>) -> Self {
        let dimensions = embedding.len();
        Self {
            success: true,
            embedding,
            dimensions,
        }
    }
}
