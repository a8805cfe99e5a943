use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use remote::RemoteError;
use textveil::PipelineError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Text too long: max {0} characters allowed")]
    TextTooLong(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External service failure: {0}")]
    External(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::TextTooLong(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::External(_) => StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::TextTooLong(_) => "TEXT_TOO_LONG",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::External(_) => "EXTERNAL_SERVICE",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<PipelineError> for ServerError {
    fn from(err: PipelineError) -> Self {
        // Absent credentials are the server's misconfiguration, not the
        // collaborator's fault; everything else is an upstream failure.
        let remote = match &err {
            PipelineError::Extraction(remote) | PipelineError::Improve(remote) => remote,
        };
        match remote {
            RemoteError::MissingConfig(_) => ServerError::Config(err.to_string()),
            _ => ServerError::External(err.to_string()),
        }
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collaborator_config_maps_to_config_error() {
        let err: ServerError = PipelineError::Improve(RemoteError::MissingConfig(
            "improve api_key is not set".into(),
        ))
        .into();
        assert!(matches!(err, ServerError::Config(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn upstream_failures_map_to_external_service() {
        let err: ServerError = PipelineError::Improve(RemoteError::Status {
            status: 503,
            body: "overloaded".into(),
        })
        .into();
        assert!(matches!(err, ServerError::External(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }
}
