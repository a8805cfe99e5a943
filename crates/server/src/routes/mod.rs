//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the textveil
//! server. Routes are organized by functionality:
//!
//! - `health`: Liveness check
//! - `improve`: Full pseudonymize → rewrite → restore workflow
//! - `hocr`: Pseudonymization workflow (no language-model step)

pub mod health;
pub mod hocr;
pub mod improve;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// Input validation shared by the text endpoints: the field must be present,
/// non-empty, and within the per-endpoint character cap. Runs before any
/// pipeline work.
pub(crate) fn validate_text(text: Option<String>, max_chars: usize) -> ServerResult<String> {
    let text = text.ok_or_else(|| ServerError::BadRequest("text is required".to_string()))?;
    if text.trim().is_empty() {
        return Err(ServerError::BadRequest("text must not be empty".to_string()));
    }
    if text.chars().count() > max_chars {
        return Err(ServerError::TextTooLong(max_chars));
    }
    Ok(text)
}

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /) and requires no authentication.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "textveil server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/improve",
            "/hocr",
            "/health"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
