use async_trait::async_trait;

use crate::error::RemoteError;

/// The entity-extraction collaborator: HOCR markup in, annotated payload out.
///
/// The return value is the raw response body; the caller sniffs whether it is
/// annotated markup, a JSON tree, or a direct mapping. No retries happen at
/// this layer; a failed call is that request's failure.
#[async_trait]
pub trait EntityExtractor: Send + Sync {
    async fn extract(&self, hocr_html: &str) -> Result<String, RemoteError>;
}

/// The language-model collaborator: an opaque text-to-text rewriter.
///
/// Nothing here guarantees placeholder tokens survive the rewrite; the
/// pseudonymization layer checks for that after the fact.
#[async_trait]
pub trait TextImprover: Send + Sync {
    async fn improve(&self, system_prompt: &str, text: &str) -> Result<String, RemoteError>;
}
