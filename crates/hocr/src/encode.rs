use unicode_categories::UnicodeCategories;

use crate::config::EncodeConfig;
use crate::document::{HocrDocument, HocrLine, HocrPage, HocrParagraph, HocrWord};
use crate::title::format_bbox;

/// Encode plain text into a synthetic single-page HOCR document.
///
/// Splits on blank-line boundaries into paragraphs, each paragraph on line
/// breaks into lines, each line on whitespace into words. Punctuation is
/// stripped from every word before its box is sized; words that become empty
/// are dropped without a placeholder. Never fails: empty input yields a valid
/// document with no word regions.
pub fn encode(text: &str, cfg: &EncodeConfig) -> HocrDocument {
    let mut paragraphs: Vec<HocrParagraph> = Vec::new();
    let mut word_id = 0u32;
    let mut line_id = 0u32;
    let mut paragraph_id = 0u32;
    let mut cursor_y = cfg.margin;

    for paragraph_text in split_paragraphs(text) {
        let mut lines: Vec<HocrLine> = Vec::new();

        for line_text in paragraph_text.lines() {
            let words = encode_line_words(line_text, cfg, cursor_y, &mut word_id);
            if words.is_empty() {
                // Whitespace-only or punctuation-only line: no region.
                continue;
            }
            line_id += 1;
            lines.push(HocrLine {
                id: line_id,
                bbox: enclosing_bbox(words.iter().map(|w| w.bbox)),
                words,
            });
            cursor_y += cfg.line_height;
        }

        if lines.is_empty() {
            continue;
        }
        paragraph_id += 1;
        paragraphs.push(HocrParagraph {
            id: paragraph_id,
            bbox: enclosing_bbox(lines.iter().map(|l| l.bbox)),
            lines,
        });
        cursor_y += cfg.paragraph_gap;
    }

    HocrDocument {
        page: HocrPage {
            number: 1,
            bbox: (0, 0, cfg.page_width, cfg.page_height),
            paragraphs,
        },
    }
}

/// Paragraph chunks of the input: runs of lines separated by blank lines.
fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// Word regions for one source line, advancing the document-wide word counter.
fn encode_line_words(
    line_text: &str,
    cfg: &EncodeConfig,
    y: u32,
    word_id: &mut u32,
) -> Vec<HocrWord> {
    let mut words = Vec::new();
    let mut cursor_x = cfg.margin;

    for token in line_text.split_whitespace() {
        let stripped = strip_punctuation(token);
        if stripped.is_empty() {
            continue;
        }
        let width = stripped.chars().count() as u32 * cfg.char_width;
        let bbox = (cursor_x, y, cursor_x + width, y + cfg.line_height);
        cursor_x += width + cfg.word_gap;

        *word_id += 1;
        words.push(HocrWord {
            id: *word_id,
            bbox,
            text: stripped,
            title: format_bbox(bbox),
        });
    }
    words
}

/// Remove all Unicode punctuation characters from a token.
fn strip_punctuation(token: &str) -> String {
    token.chars().filter(|ch| !ch.is_punctuation()).collect()
}

/// Union of a non-empty sequence of boxes; zeros when the sequence is empty.
fn enclosing_bbox(boxes: impl Iterator<Item = (u32, u32, u32, u32)>) -> (u32, u32, u32, u32) {
    let mut out: Option<(u32, u32, u32, u32)> = None;
    for (x0, y0, x1, y1) in boxes {
        out = Some(match out {
            None => (x0, y0, x1, y1),
            Some((a0, b0, a1, b1)) => (a0.min(x0), b0.min(y0), a1.max(x1), b1.max(y1)),
        });
    }
    out.unwrap_or((0, 0, 0, 0))
}
