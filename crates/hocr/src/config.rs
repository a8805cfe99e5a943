//! Configuration for the synthetic geometry of encoded documents.
//!
//! The encoder does not measure text; it synthesizes bounding boxes from the
//! constants here. The only contract consumed downstream is relative ordering
//! (left-to-right within a line, top-to-bottom across lines), so the exact
//! values carry no meaning beyond that. They default to plausible 300-dpi A4
//! numbers so the emitted markup looks like real scanner output.

use serde::{Deserialize, Serialize};

/// Geometry constants for [`encode`](crate::encode).
///
/// All distances are in the synthetic pixel space of the emitted `bbox`
/// metadata. Cheap to clone, serializable for configuration management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Horizontal pixels per character when sizing a word box.
    pub char_width: u32,
    /// Gap between consecutive word boxes on a line.
    pub word_gap: u32,
    /// Vertical advance per line.
    pub line_height: u32,
    /// Extra vertical advance after each paragraph.
    pub paragraph_gap: u32,
    /// Left/top page margin where the first box starts.
    pub margin: u32,
    /// Page width in synthetic pixels.
    pub page_width: u32,
    /// Page height in synthetic pixels.
    pub page_height: u32,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            char_width: 24,
            word_gap: 10,
            line_height: 32,
            paragraph_gap: 16,
            margin: 40,
            page_width: 2480,
            page_height: 3508,
        }
    }
}
