// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clip_embed_server::{
    api::{start_server, AppState},
    config::ServiceConfig,
    encoders::EncoderContext,
};
use std::{env, sync::Arc};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::from_env();

    info!("Loading models from {}...", config.model_dir.display());
    let encoders = EncoderContext::load(&config).await?;
    info!("Models loaded successfully");

    let state = AppState::new(Arc::new(encoders));
    start_server(&config, state).await
}
