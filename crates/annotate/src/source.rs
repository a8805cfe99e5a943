//! Polymorphic annotation source.
//!
//! The extraction collaborator answers in one of three shapes: our HOCR
//! markup with annotated word titles, a JSON document tree, or a pre-computed
//! label→text mapping. One enum covers all three so call sites dispatch on
//! the detected shape instead of duplicating decode logic.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use hocr::HocrDocument;

use crate::json_form;
use crate::title_form;

/// A decoded-or-decodable annotation payload.
#[derive(Debug, Clone)]
pub enum AnnotationSource {
    /// Annotated HOCR markup (title-attribute form).
    TitleForm(HocrDocument),
    /// Annotated JSON document tree.
    JsonTree(Value),
    /// Pre-computed `label -> text` mapping returned directly.
    Direct(BTreeMap<String, String>),
}

impl AnnotationSource {
    /// Sniff the shape of an extraction response body.
    ///
    /// Markup beats JSON: anything containing an `ocr_page` region is parsed
    /// as HOCR. A JSON object whose values are all strings is taken as the
    /// direct mapping; any other JSON value is treated as a document tree.
    /// Returns `None` when the body is neither parseable markup nor JSON.
    pub fn detect(body: &str) -> Option<Self> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return None;
        }

        if trimmed.contains("ocr_page") {
            match hocr::parse_html(trimmed) {
                Ok(doc) => return Some(Self::TitleForm(doc)),
                Err(err) => {
                    debug!(error = %err, "response looked like markup but did not parse");
                    return None;
                }
            }
        }

        let value: Value = serde_json::from_str(trimmed).ok()?;
        if let Value::Object(map) = &value {
            if !map.is_empty() && map.values().all(Value::is_string) {
                let direct = map
                    .iter()
                    .map(|(k, v)| {
                        (k.clone(), v.as_str().unwrap_or_default().to_string())
                    })
                    .collect();
                return Some(Self::Direct(direct));
            }
        }
        Some(Self::JsonTree(value))
    }

    /// Label-granularity view: `entity label -> concatenated text`.
    pub fn label_mapping(&self) -> BTreeMap<String, String> {
        match self {
            Self::TitleForm(doc) => title_form::decode_labels(doc),
            Self::JsonTree(tree) => json_form::invert(&json_form::decode_tree(tree)),
            Self::Direct(mapping) => mapping.clone(),
        }
    }

    /// Substitution-granularity view: `original span text -> entity id`.
    /// This is the direction the pseudonymization engine consumes. For the
    /// title form, words sharing one full id merge into a single span so the
    /// whole instance substitutes at once.
    pub fn span_mapping(&self) -> BTreeMap<String, String> {
        match self {
            Self::TitleForm(doc) => title_form::decode_full_id_mapping(doc)
                .into_iter()
                .map(|(id, text)| (text, id))
                .collect(),
            Self::JsonTree(tree) => json_form::decode_tree(tree),
            Self::Direct(mapping) => mapping
                .iter()
                .map(|(label, text)| (text.clone(), label.clone()))
                .collect(),
        }
    }

    /// The annotated document, when the source carries one.
    pub fn document(&self) -> Option<&HocrDocument> {
        match self {
            Self::TitleForm(doc) => Some(doc),
            _ => None,
        }
    }
}
