// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod encode_image;
pub mod encode_text;
pub mod errors;
pub mod http_server;
pub mod response;

pub use encode_image::{encode_image_handler, EncodeImageRequest};
pub use encode_text::{encode_text_handler, EncodeTextRequest};
pub use errors::ApiError;
pub use http_server::{create_app, start_server, AppState, HealthResponse};
pub use response::EmbeddingResponse;
