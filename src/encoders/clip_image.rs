// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX wrapper for the CLIP ViT-B-32 visual branch
//!
//! Features:
//! - ONNX model loading from disk
//! - GPU acceleration via CUDA (with automatic CPU fallback)
//! - CLIP resize/crop/normalize preprocessing
//! - 512-dimensional output vectors

use crate::vision::preprocessing::{preprocess_for_clip, CLIP_INPUT_SIZE};
use anyhow::{Context, Result};
use image::DynamicImage;
use ndarray::{Array4, Axis};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

use super::{build_session, EMBEDDING_DIM};

/// ONNX-based CLIP image encoder
///
/// # Thread Safety
/// The session is wrapped in Arc<Mutex> for cheap cloning and thread-safe
/// shared access; concurrent encodes serialize on the session lock.
#[derive(Clone)]
pub struct ClipImageEncoder {
    session: Arc<Mutex<Session>>,
    dimension: usize,
}

impl std::fmt::Debug for ClipImageEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipImageEncoder")
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl ClipImageEncoder {
    /// Creates a new image encoder from an ONNX export on disk.
    ///
    /// Runs one validation inference on a zero tensor so a wrong or
    /// corrupt export fails at startup rather than on the first request.
    pub async fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }

        let mut session = build_session(model_path)?;

        // Validate the model outputs [1, EMBEDDING_DIM] before accepting it
        {
            let size = CLIP_INPUT_SIZE as usize;
            let test_input: Array4<f32> = Array4::zeros((1, 3, size, size));
            let outputs = session.run(ort::inputs![
                "pixel_values" => Value::from_array(test_input)?
            ])?;

            let output_tensor = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            let shape = output_tensor.shape();

            if shape.len() != 2 || shape[1] != EMBEDDING_DIM {
                anyhow::bail!(
                    "Image model outputs unexpected dimensions: {:?} (expected [batch, {}])",
                    shape,
                    EMBEDDING_DIM
                );
            }
        } // outputs dropped here

        info!("CLIP image encoder loaded from {}", model_path.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            dimension: EMBEDDING_DIM,
        })
    }

    /// Generates an embedding for a decoded image
    ///
    /// # Implementation
    /// 1. Resize/crop/normalize into a [1, 3, 224, 224] tensor
    /// 2. Run ONNX inference
    /// 3. Return the single 512-dimensional row
    pub async fn encode(&self, image: &DynamicImage) -> Result<Vec<f32>> {
        let tensor = preprocess_for_clip(image);

        // Lock session for thread-safe access
        let mut session_guard = self.session.lock().unwrap();
        let outputs = session_guard.run(ort::inputs![
            "pixel_values" => Value::from_array(tensor)?
        ])?;

        let output_array = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let shape = output_array.shape();
        if shape.len() != 2 || shape[1] != self.dimension {
            anyhow::bail!(
                "Unexpected embedding shape: {:?} (expected [1, {}])",
                shape,
                self.dimension
            );
        }

        let embedding: Vec<f32> = output_array.index_axis(Axis(0), 0).iter().copied().collect();

        Ok(embedding)
    }

    /// Returns the output dimension of this encoder
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}
