//! Placeholder selection by entity-label keyword.

/// Canonical placeholder for an entity label or id.
///
/// Keyword matching on the lowercased label, first hit wins: `name` →
/// `[NAME]`, `number`/`id` → `[NUMBER]`, `email` → `[EMAIL]`, `address` →
/// `[ADDRESS]`, `phone` → `[PHONE]`. Anything else becomes the label itself,
/// uppercased in brackets with whitespace collapsed to `_`.
pub fn placeholder_for(label: &str) -> String {
    let lower = label.to_lowercase();
    if lower.contains("name") {
        "[NAME]".to_string()
    } else if lower.contains("number") || lower.contains("id") {
        "[NUMBER]".to_string()
    } else if lower.contains("email") {
        "[EMAIL]".to_string()
    } else if lower.contains("address") {
        "[ADDRESS]".to_string()
    } else if lower.contains("phone") {
        "[PHONE]".to_string()
    } else {
        let tag: String = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_uppercase();
        format!("[{tag}]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_categories() {
        assert_eq!(placeholder_for("first_name_0"), "[NAME]");
        assert_eq!(placeholder_for("last_name"), "[NAME]");
        assert_eq!(placeholder_for("account_number_2"), "[NUMBER]");
        assert_eq!(placeholder_for("customer_id"), "[NUMBER]");
        assert_eq!(placeholder_for("email_1"), "[EMAIL]");
        assert_eq!(placeholder_for("street address"), "[ADDRESS]");
        assert_eq!(placeholder_for("phone_0"), "[PHONE]");
    }

    #[test]
    fn unknown_labels_become_generic_bracketed_tags() {
        assert_eq!(placeholder_for("city"), "[CITY]");
        assert_eq!(placeholder_for("city 3"), "[CITY_3]");
        assert_eq!(placeholder_for("iban_0"), "[IBAN_0]");
    }

    #[test]
    fn name_wins_over_later_keywords() {
        // "name_id" carries both keywords; the name check runs first.
        assert_eq!(placeholder_for("name_id"), "[NAME]");
    }
}
