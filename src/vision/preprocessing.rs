// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the CLIP visual encoder

use image::{DynamicImage, GenericImageView};
use ndarray::Array4;

/// Input size for the CLIP ViT-B-32 vision encoder
pub const CLIP_INPUT_SIZE: u32 = 224;

/// CLIP normalization mean values (not ImageNet)
pub const CLIP_MEAN: [f32; 3] = [0.481_454_66, 0.457_827_5, 0.408_210_73];

/// CLIP normalization std values
pub const CLIP_STD: [f32; 3] = [0.268_629_54, 0.261_302_58, 0.275_777_11];

/// Preprocess an image for the CLIP vision encoder
///
/// Steps:
/// 1. Resize keeping aspect ratio so the shorter side covers the target,
///    then center crop to CLIP_INPUT_SIZE x CLIP_INPUT_SIZE
/// 2. Convert to RGB
/// 3. Normalize with CLIP mean/std: (pixel/255 - mean) / std
/// 4. Convert to NCHW tensor format [1, 3, H, W]
pub fn preprocess_for_clip(image: &DynamicImage) -> Array4<f32> {
    let resized = center_crop_resize(image, CLIP_INPUT_SIZE);
    let rgb = resized.to_rgb8();

    let size = CLIP_INPUT_SIZE as usize;
    let mut tensor = Array4::zeros((1, 3, size, size));

    for y in 0..size {
        for x in 0..size {
            let pixel = rgb.get_pixel(x as u32, y as u32);

            for c in 0..3 {
                let normalized = (pixel[c] as f32 / 255.0 - CLIP_MEAN[c]) / CLIP_STD[c];
                tensor[[0, c, y, x]] = normalized;
            }
        }
    }

    tensor
}

/// Resize with center crop (no distortion, may lose edges)
fn center_crop_resize(image: &DynamicImage, target_size: u32) -> DynamicImage {
    let (orig_w, orig_h) = image.dimensions();

    if orig_w == 0 || orig_h == 0 {
        return DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            target_size,
            target_size,
            image::Rgb([128, 128, 128]),
        ));
    }

    // Scale so the shorter side reaches the target
    let scale_w = target_size as f32 / orig_w as f32;
    let scale_h = target_size as f32 / orig_h as f32;
    let scale = scale_w.max(scale_h);

    let new_w = (orig_w as f32 * scale).round() as u32;
    let new_h = (orig_h as f32 * scale).round() as u32;

    // CatmullRom approximates the bicubic filter CLIP was trained with
    let resized = image.resize_exact(new_w, new_h, image::imageops::FilterType::CatmullRom);

    let crop_x = (new_w.saturating_sub(target_size)) / 2;
    let crop_y = (new_h.saturating_sub(target_size)) / 2;

    resized.crop_imm(crop_x, crop_y, target_size, target_size)
}
