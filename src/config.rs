// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration from environment variables

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default listen port for the embedding API
pub const DEFAULT_API_PORT: u16 = 5555;

/// Directory name holding the CLIP visual branch export
const IMAGE_MODEL_DIR: &str = "clip-ViT-B-32-onnx";

/// Directory name holding the multilingual text branch export
const TEXT_MODEL_DIR: &str = "clip-ViT-B-32-multilingual-v1-onnx";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// Directory containing the ONNX model exports
    pub model_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_API_PORT),
            model_dir: PathBuf::from("./models"),
        }
    }
}

impl ServiceConfig {
    /// Builds the configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    ///
    /// - `API_PORT`: listen port (default 5555, all interfaces)
    /// - `MODEL_DIR`: directory containing the model exports (default ./models)
    pub fn from_env() -> Self {
        let port = env::var("API_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_API_PORT);

        let model_dir = env::var("MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./models"));

        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
            model_dir,
        }
    }

    /// Path to the visual branch ONNX file
    pub fn image_model_path(&self) -> PathBuf {
        self.model_dir.join(IMAGE_MODEL_DIR).join("model.onnx")
    }

    /// Path to the text branch ONNX file
    pub fn text_model_path(&self) -> PathBuf {
        self.model_dir.join(TEXT_MODEL_DIR).join("model.onnx")
    }

    /// Path to the text branch tokenizer
    pub fn text_tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(TEXT_MODEL_DIR).join("tokenizer.json")
    }
}
