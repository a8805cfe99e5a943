//! Mapping and per-request context types for the substitution engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entity-bearing span as the decoders reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEntity {
    /// The exact original text of the span.
    pub text: String,
    /// Entity id the span was labeled with (`first_name_0`, `city`, ...).
    pub entity_id: String,
}

/// The fine-grained substitution input: original span text → entity id.
///
/// Built from whichever decoder handled the extraction response. Span order
/// is the decoders' document/iteration order; the engine re-sorts by
/// descending span length before substituting, so insertion order only breaks
/// ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMapping {
    pub spans: Vec<SpanEntity>,
}

impl EntityMapping {
    /// Build from a `text -> entity id` map (the decoders' span direction).
    pub fn from_span_map(map: &BTreeMap<String, String>) -> Self {
        Self {
            spans: map
                .iter()
                .map(|(text, entity_id)| SpanEntity {
                    text: text.clone(),
                    entity_id: entity_id.clone(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }
}

/// Record of one applied substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Placeholder token that went into the text (`[NAME]`, ...).
    pub placeholder: String,
    /// The original span the placeholder stands for.
    pub original: String,
    /// Entity id the span carried, kept for provenance.
    pub entity_id: String,
}

/// Everything [`restore`](crate::restore) needs to undo a
/// [`pseudonymize`](crate::pseudonymize) call.
///
/// This is a plain value threaded through the pseudonymize → transform →
/// restore call chain. Requests never share one; there is deliberately no
/// process-wide slot holding "the last mapping".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudonymContext {
    /// Applied substitutions in application order.
    pub substitutions: Vec<Substitution>,
    /// True when the heuristic fallback produced the text. Fallback output
    /// has no stored mapping and restores through a fixed table instead.
    pub fallback: bool,
}

impl PseudonymContext {
    pub(crate) fn fallback() -> Self {
        Self {
            substitutions: Vec::new(),
            fallback: true,
        }
    }
}
