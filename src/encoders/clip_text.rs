// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX wrapper for the multilingual CLIP text branch
//! (clip-ViT-B-32-multilingual-v1)
//!
//! The text model is a DistilmBERT-based sentence transformer whose export
//! takes `input_ids` and `attention_mask` (no `token_type_ids`). Exports
//! that bundle the pooling and projection modules emit sentence-level
//! `[batch, 512]` output directly; exports of the bare transformer emit
//! token-level `[batch, seq_len, hidden]`, in which case attention-weighted
//! mean pooling is applied here.

use anyhow::{Context, Result};
use ndarray::{Array2, ArrayView2, Axis};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::Tokenizer;
use tracing::info;

use super::{build_session, EMBEDDING_DIM};

/// ONNX-based multilingual CLIP text encoder
#[derive(Clone)]
pub struct ClipTextEncoder {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    dimension: usize,
}

impl std::fmt::Debug for ClipTextEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipTextEncoder")
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl ClipTextEncoder {
    /// Creates a new text encoder from an ONNX export and tokenizer on disk.
    ///
    /// Runs one validation inference so a model that does not land in the
    /// shared 512-dimensional space fails at startup.
    pub async fn new<P: AsRef<Path>>(model_path: P, tokenizer_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let mut session = build_session(model_path)?;

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        let embedding = run_inference(&mut session, &tokenizer, "validation test")?;
        if embedding.len() != EMBEDDING_DIM {
            anyhow::bail!(
                "Text model outputs {} dimensions (expected {})",
                embedding.len(),
                EMBEDDING_DIM
            );
        }

        info!("CLIP text encoder loaded from {}", model_path.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            dimension: EMBEDDING_DIM,
        })
    }

    /// Generates an embedding for a text string
    pub async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        // Lock session for thread-safe access
        let mut session_guard = self.session.lock().unwrap();
        let embedding = run_inference(&mut session_guard, &self.tokenizer, text)?;

        if embedding.len() != self.dimension {
            anyhow::bail!(
                "Unexpected embedding dimension: {} (expected {})",
                embedding.len(),
                self.dimension
            );
        }

        Ok(embedding)
    }

    /// Returns the output dimension of this encoder
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Tokenizes a text and runs one inference, handling both sentence-level
/// and token-level output shapes.
fn run_inference(session: &mut Session, tokenizer: &Tokenizer, text: &str) -> Result<Vec<f32>> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

    let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
    let attention_mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as i64)
        .collect();

    // Keep a copy of attention_mask for mean pooling
    let attention_mask_for_pooling = attention_mask.clone();

    let seq_len = input_ids.len();
    let input_ids_array =
        Array2::from_shape_vec((1, seq_len), input_ids).context("Failed to create input_ids array")?;
    let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask)
        .context("Failed to create attention_mask array")?;

    let outputs = session.run(ort::inputs![
        "input_ids" => Value::from_array(input_ids_array)?,
        "attention_mask" => Value::from_array(attention_mask_array)?
    ])?;

    // Use index [0] instead of name since different exports name outputs differently
    let output_array = outputs[0]
        .try_extract_array::<f32>()
        .context("Failed to extract output tensor")?;

    match output_array.ndim() {
        // Sentence-level output: [batch, dim]
        2 => Ok(output_array
            .index_axis(Axis(0), 0)
            .iter()
            .copied()
            .collect()),

        // Token-level output: [batch, seq_len, hidden_dim], pool here
        3 => {
            let batch_0 = output_array
                .index_axis(Axis(0), 0)
                .into_dimensionality::<ndarray::Ix2>()
                .context("Failed to view token embeddings")?;
            Ok(mean_pool(batch_0, &attention_mask_for_pooling))
        }

        n => anyhow::bail!("Text model output has unexpected rank {}", n),
    }
}

/// Mean pooling over the sequence dimension, weighted by the attention mask
/// so padding tokens do not contribute.
fn mean_pool(token_embeddings: ArrayView2<'_, f32>, attention_mask: &[i64]) -> Vec<f32> {
    let seq_len = token_embeddings.shape()[0];
    let hidden_dim = token_embeddings.shape()[1];

    let mut pooled = vec![0.0f32; hidden_dim];
    let mut sum_mask = 0.0f32;

    for i in 0..seq_len {
        let mask_value = attention_mask[i] as f32;
        sum_mask += mask_value;
        for j in 0..hidden_dim {
            pooled[j] += token_embeddings[[i, j]] * mask_value;
        }
    }

    // Avoid division by zero on an all-padding sequence
    for val in &mut pooled {
        *val /= sum_mask.max(1e-9);
    }

    pooled
}
