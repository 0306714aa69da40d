// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP error translation
//!
//! Every failure is caught at the handler boundary and rendered as a JSON
//! `{"error": message}` body with the mapped status code; nothing crashes
//! the process.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request body is absent or not JSON
    NotJson,
    /// Request body is JSON but carries no usable data
    MissingData,
    /// A required field is absent from the request
    MissingField(&'static str),
    /// No provided image source could be resolved to a decodable image.
    /// Bad base64, unreachable URLs, missing files, and corrupt bytes all
    /// land here; the distinction is logged, not surfaced.
    ImageLoadFailed,
    /// Unexpected failure during inference or serialization
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotJson
            | ApiError::MissingData
            | ApiError::MissingField(_)
            | ApiError::ImageLoadFailed => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::NotJson => "Request must be JSON".to_string(),
            ApiError::MissingData => "Missing request data".to_string(),
            ApiError::MissingField(field) => format!("Missing {} in request", field),
            ApiError::ImageLoadFailed => "Failed to load image".to_string(),
            ApiError::Internal(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message() }));
        (self.status_code(), body).into_response()
    }
}
