//! Client for the entity-extraction service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::HTTP_CLIENT;
use crate::error::RemoteError;
use crate::traits::EntityExtractor;

/// Configuration for [`HttpEntityExtractor`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Endpoint accepting the HOCR document upload. Absent means the
    /// deployment has no extraction service configured; calls fail with
    /// [`RemoteError::MissingConfig`].
    pub api_url: Option<String>,
    /// Verbatim `Authorization` header value, when the service wants one.
    pub auth_header: Option<String>,
}

/// Uploads the synthesized HOCR document as a file part and returns the raw
/// response body. The service answers with annotated markup, a JSON tree, or
/// a pre-computed mapping; shape detection is the caller's job.
#[derive(Debug, Clone)]
pub struct HttpEntityExtractor {
    config: ExtractConfig,
}

impl HttpEntityExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EntityExtractor for HttpEntityExtractor {
    async fn extract(&self, hocr_html: &str) -> Result<String, RemoteError> {
        let url = self
            .config
            .api_url
            .as_deref()
            .ok_or_else(|| RemoteError::MissingConfig("extraction api_url is not set".into()))?;

        let part = reqwest::multipart::Part::text(hocr_html.to_string())
            .file_name("document.hocr")
            .mime_str("text/html")
            .map_err(|e| RemoteError::Http(format!("invalid upload part: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = HTTP_CLIENT.post(url).multipart(form);
        if let Some(header) = self.config.auth_header.as_deref() {
            request = request.header("Authorization", header);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Http(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::MalformedResponse(format!("unreadable body: {e}")))?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(bytes = body.len(), "extraction response received");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_url_is_a_config_error_not_a_transport_error() {
        let extractor = HttpEntityExtractor::new(ExtractConfig::default());
        let err = extractor.extract("<html/>").await.unwrap_err();
        assert!(matches!(err, RemoteError::MissingConfig(_)));
    }
}
