//! The `title` attribute grammar.
//!
//! Region metadata in HOCR rides in the `title` attribute as
//! semicolon-separated segments. The segments this layer cares about:
//!
//! ```text
//! bbox 414 176 526 200
//! x_entity first_name 0
//! ```
//!
//! An `x_entity` segment carries whitespace-separated label tokens followed by
//! a numeric instance index as the final token. The *label* form drops the
//! index; the *full id* form keeps it, with all tokens joined by `_`.

use crate::document::BBox;

const X_ENTITY_MARKER: &str = "x_entity";

/// Tokens following the `x_entity` marker in the first matching segment,
/// or `None` when the title has no such segment or the segment is bare.
fn x_entity_tokens(title: &str) -> Option<Vec<&str>> {
    for segment in title.split(';') {
        let segment = segment.trim();
        if !segment.starts_with(X_ENTITY_MARKER) {
            continue;
        }
        let mut tokens = segment.split_whitespace();
        if tokens.next() != Some(X_ENTITY_MARKER) {
            // e.g. `x_entity_custom ...`, a different key, not ours.
            continue;
        }
        let rest: Vec<&str> = tokens.collect();
        if rest.is_empty() {
            // Marker with no payload: treat the word as unannotated.
            return None;
        }
        return Some(rest);
    }
    None
}

/// Entity label from a word `title`: every token but the trailing instance
/// index, space-joined. A single-token payload is itself the label.
///
/// `"x_sensibility 1; bbox 414 176 526 200; x_entity first_name 0"` →
/// `Some("first_name")`.
pub fn x_entity_label(title: &str) -> Option<String> {
    let tokens = x_entity_tokens(title)?;
    if tokens.len() == 1 {
        return Some(tokens[0].to_string());
    }
    Some(tokens[..tokens.len() - 1].join(" "))
}

/// Full entity id from a word `title`: all payload tokens, index included,
/// joined with `_`.
///
/// `"... x_entity first_name 0"` → `Some("first_name_0")`.
pub fn x_entity_full_id(title: &str) -> Option<String> {
    Some(x_entity_tokens(title)?.join("_"))
}

/// Bounding box from a `title`, when a well-formed `bbox` segment is present.
pub fn bbox(title: &str) -> Option<BBox> {
    for segment in title.split(';') {
        let mut tokens = segment.trim().split_whitespace();
        if tokens.next() != Some("bbox") {
            continue;
        }
        let mut coords = [0u32; 4];
        for slot in coords.iter_mut() {
            *slot = tokens.next()?.parse().ok()?;
        }
        return Some((coords[0], coords[1], coords[2], coords[3]));
    }
    None
}

/// Format a `bbox` segment for a region title.
pub fn format_bbox(b: BBox) -> String {
    format!("bbox {} {} {} {}", b.0, b.1, b.2, b.3)
}
