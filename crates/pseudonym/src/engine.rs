use std::collections::BTreeMap;

use regex::RegexBuilder;
use tracing::{debug, warn};

use crate::fallback;
use crate::mapping::{EntityMapping, PseudonymContext, Substitution};
use crate::placeholder::placeholder_for;

/// Result of [`restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub text: String,
    /// Entity ids whose placeholder no longer appeared in the transformed
    /// text. The restoration is partial; callers should surface this instead
    /// of silently emitting corrupted output.
    pub missing_placeholders: Vec<String>,
}

/// Replace every mapped span in `text` with its category placeholder.
///
/// Substitution order is deterministic: spans sorted by descending character
/// length, ties broken by mapping order. Longer spans always win over spans
/// that are substrings of them. Matching is case-insensitive on the exact
/// span text. With an empty mapping the heuristic fallback runs instead and
/// the returned context is marked accordingly.
pub fn pseudonymize(text: &str, mapping: &EntityMapping) -> (String, PseudonymContext) {
    if mapping.is_empty() {
        debug!("no entity mapping available, using heuristic fallback");
        return (fallback::pseudonymize(text), PseudonymContext::fallback());
    }

    let mut spans = mapping.spans.clone();
    spans.sort_by(|a, b| b.text.chars().count().cmp(&a.text.chars().count()));

    let mut result = text.to_string();
    let mut context = PseudonymContext::default();

    for span in spans {
        if span.text.trim().is_empty() {
            continue;
        }
        let matcher = match RegexBuilder::new(&regex::escape(&span.text))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(err) => {
                warn!(span = %span.text, error = %err, "span not matchable, skipping");
                continue;
            }
        };
        if !matcher.is_match(&result) {
            continue;
        }
        let placeholder = placeholder_for(&span.entity_id);
        result = matcher
            .replace_all(&result, regex::NoExpand(&placeholder))
            .into_owned();
        context.substitutions.push(Substitution {
            placeholder,
            original: span.text,
            entity_id: span.entity_id,
        });
    }

    (result, context)
}

/// Undo a substitution after the text went through the external transform.
///
/// Builds the inverse (placeholder → original, last writer wins when one
/// category placeholder stood for several spans, a documented limitation of
/// category-level placeholders) and replaces case-insensitively. Placeholders
/// the transform dropped are reported in `missing_placeholders`. Any
/// placeholder-shaped token left over afterwards is stripped as best-effort
/// cleanup of transform artifacts.
pub fn restore(text: &str, context: &PseudonymContext) -> Restored {
    if context.fallback {
        return Restored {
            text: fallback::restore(text),
            missing_placeholders: Vec::new(),
        };
    }

    let mut missing: Vec<String> = Vec::new();
    let mut inverse: BTreeMap<&str, &Substitution> = BTreeMap::new();
    for substitution in &context.substitutions {
        if !contains_case_insensitive(text, &substitution.placeholder) {
            if !missing.contains(&substitution.entity_id) {
                missing.push(substitution.entity_id.clone());
            }
        }
        inverse.insert(substitution.placeholder.as_str(), substitution);
    }

    let mut result = text.to_string();
    for (placeholder, substitution) in inverse {
        let matcher = match RegexBuilder::new(&regex::escape(placeholder))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(err) => {
                warn!(placeholder, error = %err, "placeholder not matchable, skipping");
                continue;
            }
        };
        result = matcher
            .replace_all(&result, regex::NoExpand(&substitution.original))
            .into_owned();
    }

    Restored {
        text: strip_artifacts(&result),
        missing_placeholders: missing,
    }
}

fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Drop leftover placeholder-shaped tokens (`[LIKE_THIS]`) the transform may
/// have invented, closing the surrounding whitespace so the seam doesn't show.
fn strip_artifacts(text: &str) -> String {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static ARTIFACT_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\s*\[[A-Z][A-Z0-9_]*\]\s*").expect("static regex"));
    ARTIFACT_RE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn mapping(entries: &[(&str, &str)]) -> EntityMapping {
        let map: BTreeMap<String, String> = entries
            .iter()
            .map(|(text, id)| (text.to_string(), id.to_string()))
            .collect();
        EntityMapping::from_span_map(&map)
    }

    #[test]
    fn korben_dallas_becomes_a_name_placeholder() {
        let mapping = mapping(&[("Korben Dallas", "first_name_0")]);
        let (text, context) = pseudonymize("Meine Name ist Korben Dallas.", &mapping);
        assert_eq!(text, "Meine Name ist [NAME].");
        assert_eq!(context.substitutions.len(), 1);
        assert!(!context.fallback);
    }

    #[test]
    fn matching_is_case_insensitive_on_the_exact_span() {
        let mapping = mapping(&[("Korben Dallas", "first_name_0")]);
        let (text, _) = pseudonymize("KORBEN DALLAS ruft korben dallas an.", &mapping);
        assert_eq!(text, "[NAME] ruft [NAME] an.");
    }

    #[test]
    fn longer_spans_substitute_before_their_substrings() {
        let mapping = mapping(&[
            ("Korben", "first_name_0"),
            ("Korben Dallas", "full_name_0"),
        ]);
        let (text, _) = pseudonymize("Korben Dallas und Korben.", &mapping);
        // The two-word span wins where it matches; the short span only
        // claims the standalone occurrence.
        assert_eq!(text, "[NAME] und [NAME].");
    }

    #[test]
    fn restore_after_identity_transform_is_exact() {
        let mapping = mapping(&[
            ("Korben Dallas", "first_name_0"),
            ("Berlin", "city_1"),
            ("4242 1234", "card_number_0"),
        ]);
        let original = "Korben Dallas wohnt in Berlin, Karte 4242 1234.";
        let (pseudonymized, context) = pseudonymize(original, &mapping);
        assert!(!pseudonymized.contains("Korben"));
        assert!(pseudonymized.contains("[NAME]"));
        assert!(pseudonymized.contains("[NUMBER]"));

        let restored = restore(&pseudonymized, &context);
        assert_eq!(restored.text, original);
        assert!(restored.missing_placeholders.is_empty());
    }

    #[test]
    fn unmatched_spans_are_not_recorded() {
        let mapping = mapping(&[("Zorg", "last_name_0")]);
        let (text, context) = pseudonymize("Niemand hier.", &mapping);
        assert_eq!(text, "Niemand hier.");
        assert!(context.substitutions.is_empty());
        assert!(!context.fallback);
    }

    #[test]
    fn dropped_placeholder_is_reported_not_fatal() {
        let mapping = mapping(&[("Korben Dallas", "first_name_0"), ("Berlin", "city_1")]);
        let (_, context) = pseudonymize("Korben Dallas in Berlin.", &mapping);

        // The transform paraphrased the name placeholder away.
        let transformed = "Jemand wohnt in [CITY_1].";
        let restored = restore(transformed, &context);
        assert_eq!(restored.missing_placeholders, vec!["first_name_0".to_string()]);
        assert_eq!(restored.text, "Jemand wohnt in Berlin.");
    }

    #[test]
    fn leftover_marker_artifacts_are_stripped() {
        let mapping = mapping(&[("Berlin", "city_1")]);
        let (_, context) = pseudonymize("Berlin.", &mapping);
        let restored = restore("[IMPROVED] Berlin ist [CITY_1]. [NOTE]", &context);
        assert_eq!(restored.text, "Berlin ist Berlin.");
    }

    #[test]
    fn empty_mapping_takes_the_fallback_path_without_panicking() {
        let (text, context) = pseudonymize(
            "Korben Dallas, Konto 123456, korben@example.com",
            &EntityMapping::default(),
        );
        assert!(context.fallback);
        assert!(context.substitutions.is_empty());
        assert!(text.contains("[NAME]"));
        assert!(text.contains("[NUMBER]"));
        assert!(text.contains("[EMAIL]"));

        // Reverse direction uses the fixed table, not a derived inverse.
        let restored = restore(&text, &context);
        assert!(restored.missing_placeholders.is_empty());
        assert!(!restored.text.contains("[NAME]"));
        assert_ne!(restored.text, "Korben Dallas, Konto 123456, korben@example.com");
    }

    #[test]
    fn span_with_regex_metacharacters_is_handled_literally() {
        let mapping = mapping(&[("a.b (c)", "customer_id_0")]);
        let (text, context) = pseudonymize("Code a.b (c) Ende. Aber axb nicht.", &mapping);
        assert_eq!(text, "Code [NUMBER] Ende. Aber axb nicht.");
        let restored = restore(&text, &context);
        assert_eq!(restored.text, "Code a.b (c) Ende. Aber axb nicht.");
    }
}
