//! Annotation decoding from the JSON document-tree form.
//!
//! Some extraction deployments return a nested JSON document instead of
//! annotated markup: typed nodes with an `attributes` object, where word
//! nodes carry `attributes.x_entity`. Nodes hide both under `children`
//! arrays and under arbitrary other object-valued properties, so the walk
//! visits everything.
//!
//! Direction note: this decoder maps **original text → entity key** because
//! the substitution engine consumes that direction; [`invert`] gives the
//! label→text view the HTTP response reports.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

/// Recursion guard. Well-formed trees are a handful of levels deep; anything
/// pathological is cut off instead of blowing the stack.
const MAX_DEPTH: usize = 64;

/// Decode an annotated tree: `original text -> entity key`.
///
/// The entity key is the node's `x_entity` value with whitespace runs joined
/// by `_` (`"street address"` → `"street_address"`). When the same text
/// appears under two different keys, the last visited node wins. A known
/// collision policy, not a defect.
pub fn decode_tree(tree: &Value) -> BTreeMap<String, String> {
    let mut mapping = BTreeMap::new();
    visit(tree, 0, &mut mapping);
    mapping
}

/// Decode a JSON-encoded tree string. A string that fails to parse is logged
/// and yields an empty mapping; it never aborts the surrounding request.
pub fn decode_str(text: &str) -> BTreeMap<String, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(tree) => decode_tree(&tree),
        Err(err) => {
            warn!(error = %err, "annotated tree is not valid JSON, skipping");
            BTreeMap::new()
        }
    }
}

/// Swap a decoded mapping into the `entity key -> text` direction. Multiple
/// texts under one key concatenate space-joined in mapping iteration order.
pub fn invert(mapping: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut inverted: BTreeMap<String, String> = BTreeMap::new();
    for (text, key) in mapping {
        let entry = inverted.entry(key.clone()).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(text);
    }
    inverted
}

fn visit(node: &Value, depth: usize, mapping: &mut BTreeMap<String, String>) {
    if depth > MAX_DEPTH {
        warn!(depth, "annotated tree exceeds depth bound, pruning");
        return;
    }
    match node {
        Value::Object(map) => {
            if let Some((text, key)) = qualify(map) {
                mapping.insert(text, key);
            }
            // `children` is the conventional spot, but annotators have been
            // seen nesting word nodes under other keys too. Visit all values.
            for value in map.values() {
                visit(value, depth + 1, mapping);
            }
        }
        Value::Array(items) => {
            for item in items {
                visit(item, depth + 1, mapping);
            }
        }
        _ => {}
    }
}

/// A node qualifies when it is word-typed, has a non-empty `x_entity`
/// attribute, an identifier, and non-empty text.
fn qualify(map: &serde_json::Map<String, Value>) -> Option<(String, String)> {
    if map.get("type").and_then(Value::as_str) != Some("word") {
        return None;
    }
    let attributes = map.get("attributes")?.as_object()?;
    if attributes.is_empty() {
        return None;
    }
    let x_entity = attributes.get("x_entity")?.as_str()?;
    if x_entity.trim().is_empty() {
        return None;
    }
    map.get("id")?;
    let text = map.get("text")?.as_str()?;
    if text.is_empty() {
        return None;
    }
    let key = x_entity.split_whitespace().collect::<Vec<_>>().join("_");
    Some((text.to_string(), key))
}
