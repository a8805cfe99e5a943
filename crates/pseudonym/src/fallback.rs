//! Heuristic simulation for when no entity mapping is available.
//!
//! When the extraction collaborator fails or returns nothing, the pipeline
//! still produces demonstrable output: a fixed set of regex heuristics stands
//! in for real entity recognition. This path is lossy and non-reversible by
//! design: there is no stored mapping to invert, and the reverse direction
//! substitutes from a fixed table instead of a derived inverse.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("static regex")
});
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").expect("static regex"));
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4,}\b").expect("static regex"));

/// Fixed reverse table for [`restore`]. Applied unconditionally, category by
/// category; the output is stand-in data, never the original spans.
const REVERSE_TABLE: &[(&str, &str)] = &[
    ("[NAME]", "Max Mustermann"),
    ("[NUMBER]", "123456"),
    ("[EMAIL]", "max.mustermann@example.com"),
    ("[ADDRESS]", "Musterstraße 1, 12345 Berlin"),
    ("[PHONE]", "+49 30 123456"),
];

/// Heuristic forward direction: email-shaped substrings, capitalized
/// two-word sequences, and 4+ digit runs become category placeholders.
/// Emails go first so their digit runs are already gone when the number
/// pattern runs.
pub fn pseudonymize(text: &str) -> String {
    let text = EMAIL_RE.replace_all(text, "[EMAIL]");
    let text = NAME_RE.replace_all(&text, "[NAME]");
    NUMBER_RE.replace_all(&text, "[NUMBER]").into_owned()
}

/// Fixed reverse direction: every known category placeholder becomes its
/// stand-in value.
pub fn restore(text: &str) -> String {
    let mut result = text.to_string();
    for (placeholder, replacement) in REVERSE_TABLE {
        result = result.replace(placeholder, replacement);
    }
    result
}
