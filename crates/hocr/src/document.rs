//! Document types for the synthetic HOCR layer.
//!
//! This module defines [`HocrDocument`] and the region types below it. A
//! document is a single synthetic page holding paragraphs, lines, and words;
//! every region carries a bounding box and the word regions additionally carry
//! the raw `title` metadata string that downstream annotation decoding reads.
//!
//! # Structure
//!
//! ```text
//! HocrDocument
//! └── page: HocrPage
//!     ├── number: u32
//!     ├── bbox: (u32, u32, u32, u32)       # x0 y0 x1 y1
//!     └── paragraphs: Vec<HocrParagraph>
//!         └── lines: Vec<HocrLine>
//!             └── words: Vec<HocrWord>     # id, bbox, text, title
//! ```
//!
//! # Invariants
//!
//! - Word order within a line follows source left-to-right token order.
//! - Line order within a paragraph follows source line order.
//! - Word identifiers increase monotonically across the whole document,
//!   starting at 1, independent of paragraph and line boundaries.
//! - Blank source lines and paragraphs are never represented as empty regions.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box as `(x0, y0, x1, y1)`.
///
/// The coordinates are synthetic. Only relative ordering (left-to-right,
/// top-to-bottom) is meaningful; downstream consumers never measure geometry.
pub type BBox = (u32, u32, u32, u32);

/// A complete synthetic HOCR document. Always exactly one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HocrDocument {
    pub page: HocrPage,
}

/// The single page of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HocrPage {
    pub number: u32,
    pub bbox: BBox,
    pub paragraphs: Vec<HocrParagraph>,
}

/// One paragraph region (`ocr_par`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HocrParagraph {
    pub id: u32,
    pub bbox: BBox,
    pub lines: Vec<HocrLine>,
}

/// One line region (`ocr_line`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HocrLine {
    pub id: u32,
    pub bbox: BBox,
    pub words: Vec<HocrWord>,
}

/// One word region (`ocrx_word`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HocrWord {
    /// Document-wide word number, starting at 1.
    pub id: u32,
    pub bbox: BBox,
    /// Word text after encoder punctuation stripping.
    pub text: String,
    /// Raw `title` metadata (`bbox x0 y0 x1 y1`, plus any semicolon-separated
    /// segments an annotator attached, e.g. `x_entity first_name 0`).
    pub title: String,
}

impl HocrDocument {
    /// All words of the document in reading order.
    pub fn words(&self) -> impl Iterator<Item = &HocrWord> {
        self.page
            .paragraphs
            .iter()
            .flat_map(|p| p.lines.iter())
            .flat_map(|l| l.words.iter())
    }

    /// Total word count.
    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// True when the document has no word regions at all.
    pub fn is_empty(&self) -> bool {
        self.page.paragraphs.iter().all(|p| p.lines.is_empty())
    }
}
