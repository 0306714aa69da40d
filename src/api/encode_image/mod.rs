// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /encode_image endpoint
//!
//! Resolves an image from inline base64 or a location string (HTTP URL,
//! data URL, or file path) and returns its CLIP embedding.

pub mod handler;
pub mod request;

pub use handler::encode_image_handler;
pub use request::EncodeImageRequest;
