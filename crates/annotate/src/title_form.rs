//! Annotation decoding from word `title` attributes.
//!
//! The extraction collaborator returns our own HOCR markup with `x_entity`
//! segments appended to word titles. Decoding walks every word region and
//! reads those segments; words without one are simply not part of the
//! mapping, and malformed segments exclude the word rather than erroring.

use std::collections::BTreeMap;

use hocr::title::{x_entity_full_id, x_entity_label};
use hocr::HocrDocument;

/// Label-granularity mapping: entity label → space-joined text of every word
/// carrying that label, in document order.
///
/// `"x_entity first_name 0"` on the words `Korben` and `Dallas` yields
/// `{"first_name": "Korben Dallas"}` (assuming both carry index segments of
/// the same label).
pub fn decode_labels(doc: &HocrDocument) -> BTreeMap<String, String> {
    let mut mapping: BTreeMap<String, String> = BTreeMap::new();
    for word in doc.words() {
        let Some(label) = x_entity_label(&word.title) else {
            continue;
        };
        let entry = mapping.entry(label).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(&word.text);
    }
    mapping
}

/// Instance-granularity pairs: `(full entity id, word text)` in document
/// order. The id keeps the trailing instance index (`first_name_0`), which is
/// what makes per-occurrence substitution reversible.
pub fn decode_full_ids(doc: &HocrDocument) -> Vec<(String, String)> {
    doc.words()
        .filter_map(|word| {
            x_entity_full_id(&word.title).map(|id| (id, word.text.clone()))
        })
        .collect()
}

/// Instance-granularity mapping: full entity id → space-joined text of every
/// word carrying that id, in document order.
///
/// Words sharing label *and* index are one entity instance split across word
/// regions (`Korben` + `Dallas` under `first_name_0`), so their text merges
/// into the single span the substitution engine should replace.
pub fn decode_full_id_mapping(doc: &HocrDocument) -> BTreeMap<String, String> {
    let mut mapping: BTreeMap<String, String> = BTreeMap::new();
    for (id, text) in decode_full_ids(doc) {
        let entry = mapping.entry(id).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(&text);
    }
    mapping
}

/// Cheap pre-check: does the raw document content mention the annotation
/// marker anywhere? A substring scan, not a structural validation.
pub fn has_annotations(content: &str) -> bool {
    content.contains("x_entity")
}
