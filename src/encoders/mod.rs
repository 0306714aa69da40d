// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! CLIP encoder wrappers
//!
//! Two ONNX Runtime sessions are loaded once at startup: the clip-ViT-B-32
//! visual branch and the clip-ViT-B-32-multilingual-v1 text branch. The text
//! branch maps 50+ languages into the same vector space as the visual
//! branch, so downstream consumers can compare image and text embeddings
//! directly.

pub mod clip_image;
pub mod clip_text;

pub use clip_image::ClipImageEncoder;
pub use clip_text::ClipTextEncoder;

use crate::config::ServiceConfig;
use anyhow::{Context, Result};
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use std::path::Path;
use tracing::{info, warn};

/// Output dimension shared by both CLIP branches
pub const EMBEDDING_DIM: usize = 512;

/// Process-lifetime encoder state, constructed once at startup and shared
/// read-only with every request handler.
#[derive(Debug)]
pub struct EncoderContext {
    pub image: ClipImageEncoder,
    pub text: ClipTextEncoder,
}

impl EncoderContext {
    /// Loads both encoder models from the configured model directory.
    ///
    /// Fails fast if either model file is missing or emits embeddings of
    /// the wrong dimensionality.
    pub async fn load(config: &ServiceConfig) -> Result<Self> {
        let image = ClipImageEncoder::new(config.image_model_path()).await?;
        info!(
            "Image encoder ready ({} dimensions)",
            image.dimension()
        );

        let text =
            ClipTextEncoder::new(config.text_model_path(), config.text_tokenizer_path()).await?;
        info!("Text encoder ready ({} dimensions)", text.dimension());

        // Cross-modal comparison requires both branches in one space
        if image.dimension() != text.dimension() {
            anyhow::bail!(
                "Encoder dimension mismatch: image {} vs text {}",
                image.dimension(),
                text.dimension()
            );
        }

        Ok(Self { image, text })
    }
}

/// Builds an ONNX session, trying CUDA first with automatic CPU fallback
pub(crate) fn build_session(model_path: &Path) -> Result<Session> {
    let cuda_result = Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CUDAExecutionProvider::default().build()])
        .context("Failed to set CUDA execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(4)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path);

    match cuda_result {
        Ok(s) => Ok(s),
        Err(e) => {
            warn!("CUDA execution provider failed: {}", e);
            warn!("Falling back to CPU execution provider");
            Session::builder()
                .context("Failed to create session builder")?
                .with_execution_providers([CPUExecutionProvider::default().build()])
                .context("Failed to set CPU execution provider")?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .context("Failed to set optimization level")?
                .with_intra_threads(4)
                .context("Failed to set intra threads")?
                .commit_from_file(model_path)
                .context(format!(
                    "Failed to load ONNX model from {}",
                    model_path.display()
                ))
        }
    }
}
