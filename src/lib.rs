// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod config;
pub mod encoders;
pub mod vision;

// Re-export main types
pub use api::{
    create_app, encode_image_handler, encode_text_handler, start_server, ApiError, AppState,
    EmbeddingResponse, EncodeImageRequest, EncodeTextRequest, HealthResponse,
};
pub use config::ServiceConfig;
pub use encoders::{ClipImageEncoder, ClipTextEncoder, EncoderContext, EMBEDDING_DIM};
pub use vision::{ImageSource, ImageSourceError};
