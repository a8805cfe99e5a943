//! In-process stand-ins for the external collaborators.
//!
//! Used by tests and by keyless development setups that want the pipeline to
//! run end-to-end without network access.

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::traits::{EntityExtractor, TextImprover};

/// Extractor that returns a canned response body.
#[derive(Debug, Clone)]
pub struct StubExtractor {
    body: String,
}

impl StubExtractor {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl EntityExtractor for StubExtractor {
    async fn extract(&self, _hocr_html: &str) -> Result<String, RemoteError> {
        Ok(self.body.clone())
    }
}

/// Extractor that always fails, for exercising fallback paths.
#[derive(Debug, Clone, Default)]
pub struct FailingExtractor;

#[async_trait]
impl EntityExtractor for FailingExtractor {
    async fn extract(&self, _hocr_html: &str) -> Result<String, RemoteError> {
        Err(RemoteError::Http("stubbed failure".into()))
    }
}

/// Improver that returns the user text unchanged, i.e. the identity transform.
#[derive(Debug, Clone, Default)]
pub struct EchoImprover;

#[async_trait]
impl TextImprover for EchoImprover {
    async fn improve(&self, _system_prompt: &str, text: &str) -> Result<String, RemoteError> {
        Ok(text.to_string())
    }
}

/// Improver that always fails, for exercising error paths.
#[derive(Debug, Clone, Default)]
pub struct FailingImprover;

#[async_trait]
impl TextImprover for FailingImprover {
    async fn improve(&self, _system_prompt: &str, _text: &str) -> Result<String, RemoteError> {
        Err(RemoteError::Status {
            status: 502,
            body: "stubbed failure".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_extractor_echoes_its_canned_body() {
        let extractor = StubExtractor::new("{\"city\": \"Berlin\"}");
        let body = extractor.extract("<html/>").await.unwrap();
        assert_eq!(body, "{\"city\": \"Berlin\"}");
    }

    #[tokio::test]
    async fn echo_improver_is_the_identity_transform() {
        let improver = EchoImprover;
        let out = improver.improve("ignored", "Hallo [NAME].").await.unwrap();
        assert_eq!(out, "Hallo [NAME].");
    }
}
