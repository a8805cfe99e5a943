//! Pseudonymized running text straight from an annotated document.
//!
//! Walks paragraph → line → word and substitutes each annotated word with its
//! full entity id, keeping the line and paragraph structure the mapping-only
//! decoders throw away. Output is text, not a mapping.

use hocr::title::x_entity_full_id;
use hocr::HocrDocument;

/// Rebuild the document's text with every annotated word replaced by its full
/// entity id. Words join with single spaces, lines with a newline, paragraphs
/// with a blank line.
pub fn pseudonymized_text(doc: &HocrDocument) -> String {
    doc.page
        .paragraphs
        .iter()
        .map(|paragraph| {
            paragraph
                .lines
                .iter()
                .map(|line| {
                    line.words
                        .iter()
                        .map(|word| {
                            x_entity_full_id(&word.title).unwrap_or_else(|| word.text.clone())
                        })
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
