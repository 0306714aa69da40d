// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Model-backed tests for the multilingual CLIP text encoder
//!
//! Ignored unless the text branch export exists under ./models.

use clip_embed_server::encoders::ClipTextEncoder;

const MODEL_PATH: &str = "./models/clip-ViT-B-32-multilingual-v1-onnx/model.onnx";
const TOKENIZER_PATH: &str = "./models/clip-ViT-B-32-multilingual-v1-onnx/tokenizer.json";

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_dimension_is_512() {
    let encoder = ClipTextEncoder::new(MODEL_PATH, TOKENIZER_PATH).await.unwrap();
    assert_eq!(encoder.dimension(), 512);

    let embedding = encoder.encode("a photo of a cat").await.unwrap();
    assert_eq!(embedding.len(), 512);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_deterministic_embedding() {
    let encoder = ClipTextEncoder::new(MODEL_PATH, TOKENIZER_PATH).await.unwrap();

    let first = encoder.encode("repeatable input").await.unwrap();
    let second = encoder.encode("repeatable input").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_dimension_constant_across_lengths() {
    let encoder = ClipTextEncoder::new(MODEL_PATH, TOKENIZER_PATH).await.unwrap();

    let short = encoder.encode("cat").await.unwrap();
    let long = encoder
        .encode("a very long description of a cat sitting on a sunlit windowsill watching birds")
        .await
        .unwrap();

    assert_eq!(short.len(), long.len());
}

#[tokio::test]
#[ignore] // Only run if model files are downloaded
async fn test_multilingual_inputs_encode() {
    // The text branch maps 50+ languages into the shared space; every
    // input must come back at the model's fixed dimensionality
    let encoder = ClipTextEncoder::new(MODEL_PATH, TOKENIZER_PATH).await.unwrap();

    for text in ["a photo of a dog", "ein Foto von einem Hund", "una foto de un perro"] {
        let embedding = encoder.encode(text).await.unwrap();
        assert_eq!(embedding.len(), 512);
    }
}
