// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image source resolution and preprocessing for the CLIP visual branch

pub mod image_source;
pub mod preprocessing;

pub use image_source::{ImageSource, ImageSourceError};
pub use preprocessing::{preprocess_for_clip, CLIP_INPUT_SIZE, CLIP_MEAN, CLIP_STD};
