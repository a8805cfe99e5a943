use std::sync::Arc;

use remote::{EntityExtractor, HttpEntityExtractor, OpenAiImprover, TextImprover};
use textveil::PipelineConfig;

use crate::config::ServerConfig;

/// Shared application state
///
/// Holds configuration and the collaborator clients. There is no per-request
/// state in here: every request threads its own pipeline values, so handlers
/// only ever read from this.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Pipeline configuration derived from the server configuration
    pub pipeline: PipelineConfig,

    /// Entity-extraction collaborator (shared across requests)
    pub extractor: Arc<dyn EntityExtractor>,

    /// Language-model collaborator (shared across requests)
    pub improver: Arc<dyn TextImprover>,
}

impl ServerState {
    /// Create state with the real HTTP collaborators.
    pub fn new(config: ServerConfig) -> Self {
        let extractor = Arc::new(HttpEntityExtractor::new(config.extract.clone()));
        let improver = Arc::new(OpenAiImprover::new(config.improve.clone()));
        Self::with_collaborators(config, extractor, improver)
    }

    /// Create state with injected collaborators. Tests use this to run the
    /// full HTTP surface against in-process stubs.
    pub fn with_collaborators(
        config: ServerConfig,
        extractor: Arc<dyn EntityExtractor>,
        improver: Arc<dyn TextImprover>,
    ) -> Self {
        let mut pipeline = PipelineConfig::default();
        if let Some(prompt) = config.system_prompt.as_ref() {
            if !prompt.trim().is_empty() {
                pipeline.system_prompt = prompt.clone();
            }
        }

        Self {
            config: Arc::new(config),
            pipeline,
            extractor,
            improver,
        }
    }
}
