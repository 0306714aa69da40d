// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image source classification and loading
//!
//! A request may carry an image as inline base64, a data URL, an HTTP(S)
//! URL, a local file path, or raw bytes. Classification happens once, up
//! front, into a closed set of source kinds; each kind then resolves to a
//! decoded [`DynamicImage`].

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors raised while resolving an image source.
///
/// Callers at the HTTP boundary collapse all of these into a single
/// "Failed to load image" response; the variants exist for logging.
#[derive(Debug, Error)]
pub enum ImageSourceError {
    #[error("invalid base64 image data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("data URL has no comma-separated payload")]
    MalformedDataUrl,

    #[error("failed to fetch image over HTTP: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to read image file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unrecognized image format")]
    UnknownFormat,

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image data is empty")]
    EmptyData,
}

/// A single image source, classified from request input
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Inline base64-encoded image bytes
    Base64(String),
    /// `data:image/...;base64,...` URL
    DataUrl(String),
    /// HTTP or HTTPS URL to fetch
    Url(String),
    /// Local filesystem path
    Path(PathBuf),
    /// Raw image bytes, already in memory
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Classifies a location string into a source kind.
    ///
    /// `http://` and `https://` prefixes are remote URLs, `data:image` is a
    /// data URL, anything else is treated as a local file path.
    pub fn classify(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            ImageSource::Url(location.to_string())
        } else if location.starts_with("data:image") {
            ImageSource::DataUrl(location.to_string())
        } else {
            ImageSource::Path(PathBuf::from(location))
        }
    }

    /// Resolves this source into a decoded image.
    ///
    /// Remote fetches go through the shared `client` and carry no timeout,
    /// no retry, and no size cap; the caller owns how long it is willing to
    /// wait.
    pub async fn resolve(
        &self,
        client: &reqwest::Client,
    ) -> Result<DynamicImage, ImageSourceError> {
        match self {
            ImageSource::Base64(b64) => {
                debug!("resolving inline base64 image");
                decode_base64_image(b64)
            }
            ImageSource::DataUrl(url) => {
                debug!("resolving data URL image");
                let (_, payload) = url
                    .split_once(',')
                    .ok_or(ImageSourceError::MalformedDataUrl)?;
                decode_base64_image(payload)
            }
            ImageSource::Url(url) => {
                debug!(url = %url, "fetching remote image");
                let bytes = client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?;
                decode_image_bytes(&bytes)
            }
            ImageSource::Path(path) => {
                debug!(path = %path.display(), "reading image file");
                let bytes =
                    tokio::fs::read(path)
                        .await
                        .map_err(|source| ImageSourceError::FileRead {
                            path: path.clone(),
                            source,
                        })?;
                decode_image_bytes(&bytes)
            }
            ImageSource::Bytes(bytes) => decode_image_bytes(bytes),
        }
    }
}

/// Decodes a base64 string into an image
pub fn decode_base64_image(base64_str: &str) -> Result<DynamicImage, ImageSourceError> {
    if base64_str.is_empty() {
        return Err(ImageSourceError::EmptyData);
    }

    let bytes = STANDARD.decode(base64_str)?;
    decode_image_bytes(&bytes)
}

/// Decodes raw image bytes, sniffing the format from magic bytes first
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DynamicImage, ImageSourceError> {
    if bytes.is_empty() {
        return Err(ImageSourceError::EmptyData);
    }

    let format = detect_format(bytes)?;
    let img = image::load_from_memory_with_format(bytes, format)?;

    Ok(img)
}

/// Detects the image format from magic bytes
fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageSourceError> {
    if bytes.len() < 4 {
        return Err(ImageSourceError::UnknownFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Ok(ImageFormat::WebP),

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(ImageFormat::Gif),

        // BMP: BM
        [0x42, 0x4D, ..] => Ok(ImageFormat::Bmp),

        // TIFF: II (little-endian) or MM (big-endian)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => Ok(ImageFormat::Tiff),

        _ => Err(ImageSourceError::UnknownFormat),
    }
}
