//! Workspace umbrella crate for textveil.
//!
//! Stitches the pipeline stages together so callers (the HTTP server, tests,
//! demos) drive the whole flow through two entry points:
//!
//! - [`pseudonymize_text`]: encode → extract → decode → pseudonymize
//! - [`improve_text`]: the above, plus the language-model rewrite and the
//!   reverse substitution back to original values
//!
//! All per-request state travels as values through the call chain: the
//! [`PseudonymContext`] produced by the forward substitution is exactly what
//! the restore step consumes. Nothing is cached or shared across requests.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{info, warn};

use annotate::AnnotationSource;
use pseudonym::{pseudonymize, restore, EntityMapping, PseudonymContext};

pub use annotate::{has_annotations, reconstruct};
pub use hocr::{encode, parse_html, render_html, EncodeConfig, HocrDocument};
pub use pseudonym::{placeholder_for, Restored};
pub use remote::{
    stub, EntityExtractor, ExtractConfig, HttpEntityExtractor, ImproveConfig, OpenAiImprover,
    RemoteError, TextImprover,
};

/// Errors that can end a pipeline run.
///
/// Extraction failures only surface when the fallback simulation is disabled;
/// improver failures always surface, since the improve flow has no silent
/// stand-in for the language model.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("entity extraction failed: {0}")]
    Extraction(#[source] RemoteError),
    #[error("text improvement failed: {0}")]
    Improve(#[source] RemoteError),
}

/// Knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Geometry for the synthetic HOCR encoding.
    pub encode: EncodeConfig,
    /// System prompt handed to the language-model collaborator.
    pub system_prompt: String,
    /// When the extraction call fails, simulate entity recognition locally
    /// instead of failing the request. On by default.
    pub fallback_on_extraction_failure: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            encode: EncodeConfig::default(),
            system_prompt: "You are a careful editor. Improve the clarity and tone of the \
                            user's text. Keep every bracketed placeholder token exactly as \
                            written."
                .to_string(),
            fallback_on_extraction_failure: true,
        }
    }
}

/// Result of the pseudonymization flow.
#[derive(Debug, Clone)]
pub struct PseudonymizeOutcome {
    pub original_text: String,
    pub pseudonymized_text: String,
    /// Label-granularity view of what the extractor found
    /// (`entity label -> concatenated text`). Empty on the fallback path.
    pub entity_mappings: BTreeMap<String, String>,
    /// Running text rebuilt from the annotated document with entity ids in
    /// place of annotated words. Only available for the title-attribute form.
    pub reconstructed_text: Option<String>,
    /// Everything needed to reverse the substitution.
    pub context: PseudonymContext,
}

impl PseudonymizeOutcome {
    /// True when the heuristic simulation ran instead of a real mapping.
    pub fn used_fallback(&self) -> bool {
        self.context.fallback
    }
}

/// Result of the full improve flow.
#[derive(Debug, Clone)]
pub struct ImproveOutcome {
    pub original_text: String,
    pub pseudonymized_text: String,
    /// Final text after the rewrite came back and placeholders were
    /// substituted back to original values.
    pub improved_text: String,
    /// Entity ids whose placeholder did not survive the rewrite. The
    /// restoration is partial when this is non-empty.
    pub missing_placeholders: Vec<String>,
    pub used_fallback: bool,
}

/// Run encode → extract → decode → pseudonymize for one request.
pub async fn pseudonymize_text(
    text: &str,
    cfg: &PipelineConfig,
    extractor: &dyn EntityExtractor,
) -> Result<PseudonymizeOutcome, PipelineError> {
    let start = Instant::now();
    let doc = encode(text, &cfg.encode);
    let html = render_html(&doc);
    info!(
        words = doc.word_count(),
        paragraphs = doc.page.paragraphs.len(),
        "encoded input as hocr"
    );

    let source = match extractor.extract(&html).await {
        Ok(body) => {
            let source = AnnotationSource::detect(&body);
            if source.is_none() {
                warn!("extraction response had no recognizable annotation shape");
            }
            source
        }
        Err(err) if cfg.fallback_on_extraction_failure => {
            warn!(error = %err, "extraction call failed, falling back to local simulation");
            None
        }
        Err(err) => return Err(PipelineError::Extraction(err)),
    };

    let outcome = match source {
        Some(source) => {
            let mapping = EntityMapping::from_span_map(&source.span_mapping());
            if mapping.is_empty() {
                // Shape was recognized but nothing was annotated; same
                // degraded path as a failed call.
                simulate(text)
            } else {
                let (pseudonymized_text, context) = pseudonymize(text, &mapping);
                PseudonymizeOutcome {
                    original_text: text.to_string(),
                    pseudonymized_text,
                    entity_mappings: source.label_mapping(),
                    reconstructed_text: source.document().map(reconstruct::pseudonymized_text),
                    context,
                }
            }
        }
        None => simulate(text),
    };

    info!(
        entities = outcome.context.substitutions.len(),
        fallback = outcome.context.fallback,
        elapsed_micros = start.elapsed().as_micros() as u64,
        "pseudonymization complete"
    );
    Ok(outcome)
}

/// The degraded path: heuristic simulation with no mapping to report.
fn simulate(text: &str) -> PseudonymizeOutcome {
    let (pseudonymized_text, context) = pseudonymize(text, &EntityMapping::default());
    PseudonymizeOutcome {
        original_text: text.to_string(),
        pseudonymized_text,
        entity_mappings: BTreeMap::new(),
        reconstructed_text: None,
        context,
    }
}

/// Run the full flow: pseudonymize, rewrite through the language model,
/// substitute the placeholders back.
pub async fn improve_text(
    text: &str,
    cfg: &PipelineConfig,
    extractor: &dyn EntityExtractor,
    improver: &dyn TextImprover,
) -> Result<ImproveOutcome, PipelineError> {
    let start = Instant::now();
    let pseudo = pseudonymize_text(text, cfg, extractor).await?;

    let improved = improver
        .improve(&cfg.system_prompt, &pseudo.pseudonymized_text)
        .await
        .map_err(PipelineError::Improve)?;

    let restored = restore(&improved, &pseudo.context);
    if !restored.missing_placeholders.is_empty() {
        warn!(
            missing = restored.missing_placeholders.len(),
            "rewrite dropped placeholders; restoration is partial"
        );
    }
    info!(
        elapsed_micros = start.elapsed().as_micros() as u64,
        "improve flow complete"
    );

    Ok(ImproveOutcome {
        original_text: pseudo.original_text,
        pseudonymized_text: pseudo.pseudonymized_text,
        improved_text: restored.text,
        missing_placeholders: restored.missing_placeholders,
        used_fallback: pseudo.context.fallback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use remote::stub::{EchoImprover, FailingExtractor, FailingImprover, StubExtractor};

    // What the extraction collaborator hands back for
    // "Meine Name ist Korben Dallas.": our own markup with x_entity
    // segments added to the name words.
    const ANNOTATED_MARKUP: &str = r#"
<div class='ocr_page' id='page_1' title='bbox 0 0 2480 3508'>
 <div class='ocr_par' id='par_1' title='bbox 40 40 900 72'>
  <span class='ocr_line' id='line_1' title='bbox 40 40 900 72'>
   <span class='ocrx_word' id='word_1' title='bbox 40 40 160 72'>Meine</span>
   <span class='ocrx_word' id='word_2' title='bbox 170 40 260 72'>Name</span>
   <span class='ocrx_word' id='word_3' title='bbox 270 40 330 72'>ist</span>
   <span class='ocrx_word' id='word_4' title='bbox 340 40 480 72; x_entity first_name 0'>Korben</span>
   <span class='ocrx_word' id='word_5' title='bbox 490 40 620 72; x_entity first_name 0'>Dallas</span>
  </span>
 </div>
</div>"#;

    #[tokio::test]
    async fn pseudonymize_flow_decodes_title_annotations() {
        let extractor = StubExtractor::new(ANNOTATED_MARKUP);
        let outcome = pseudonymize_text(
            "Meine Name ist Korben Dallas.",
            &PipelineConfig::default(),
            &extractor,
        )
        .await
        .expect("pipeline succeeds");

        assert!(!outcome.used_fallback());
        assert_eq!(outcome.pseudonymized_text, "Meine Name ist [NAME].");
        assert_eq!(
            outcome.entity_mappings.get("first_name").map(String::as_str),
            Some("Korben Dallas")
        );
        assert_eq!(
            outcome.reconstructed_text.as_deref(),
            Some("Meine Name ist first_name_0 first_name_0")
        );
    }

    #[tokio::test]
    async fn improve_flow_restores_originals_under_identity_rewrite() {
        let extractor = StubExtractor::new(ANNOTATED_MARKUP);
        let outcome = improve_text(
            "Meine Name ist Korben Dallas.",
            &PipelineConfig::default(),
            &extractor,
            &EchoImprover,
        )
        .await
        .expect("pipeline succeeds");

        assert_eq!(outcome.improved_text, "Meine Name ist Korben Dallas.");
        assert!(outcome.missing_placeholders.is_empty());
        assert!(!outcome.used_fallback);
    }

    #[tokio::test]
    async fn extraction_failure_falls_back_to_simulation() {
        let outcome = pseudonymize_text(
            "Korben Dallas hat Konto 900123.",
            &PipelineConfig::default(),
            &FailingExtractor,
        )
        .await
        .expect("fallback keeps the request alive");

        assert!(outcome.used_fallback());
        assert!(outcome.entity_mappings.is_empty());
        assert!(outcome.pseudonymized_text.contains("[NAME]"));
        assert!(outcome.pseudonymized_text.contains("[NUMBER]"));
    }

    #[tokio::test]
    async fn extraction_failure_surfaces_when_fallback_is_disabled() {
        let cfg = PipelineConfig {
            fallback_on_extraction_failure: false,
            ..PipelineConfig::default()
        };
        let result = pseudonymize_text("text", &cfg, &FailingExtractor).await;
        assert!(matches!(result, Err(PipelineError::Extraction(_))));
    }

    #[tokio::test]
    async fn improver_failure_is_never_silently_swallowed() {
        let extractor = StubExtractor::new(ANNOTATED_MARKUP);
        let result = improve_text(
            "Meine Name ist Korben Dallas.",
            &PipelineConfig::default(),
            &extractor,
            &FailingImprover,
        )
        .await;
        assert!(matches!(result, Err(PipelineError::Improve(_))));
    }

    #[tokio::test]
    async fn json_tree_response_drives_the_same_flow() {
        let body = serde_json::json!({
            "type": "document",
            "children": [
                {"type": "word", "attributes": {"x_entity": "first_name 0"}, "id": 4, "text": "Korben Dallas"}
            ]
        })
        .to_string();
        let outcome = pseudonymize_text(
            "Meine Name ist Korben Dallas.",
            &PipelineConfig::default(),
            &StubExtractor::new(body),
        )
        .await
        .expect("pipeline succeeds");

        assert_eq!(outcome.pseudonymized_text, "Meine Name ist [NAME].");
        assert!(outcome.reconstructed_text.is_none());
        assert_eq!(
            outcome.entity_mappings.get("first_name_0").map(String::as_str),
            Some("Korben Dallas")
        );
    }
}
