//! Property-style checks over the public API: encoding counts, decoder
//! agreement, round trips, and the boundary cases that tend to regress.

use textveil::{encode, has_annotations, parse_html, render_html, EncodeConfig, HocrDocument};

fn reassemble_lines(doc: &HocrDocument) -> Vec<String> {
    doc.page
        .paragraphs
        .iter()
        .flat_map(|p| p.lines.iter())
        .map(|l| {
            l.words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[test]
fn word_count_equals_token_count_minus_punctuation_only_tokens() {
    let cases = [
        ("Meine Name ist Korben Dallas.", 5),
        ("ein zwei drei", 3),
        ("-- ... !!", 0),
        ("a -- b", 2),
        ("  viele   Leerzeichen  hier ", 3),
    ];
    for (text, expected) in cases {
        let doc = encode(text, &EncodeConfig::default());
        assert_eq!(doc.word_count(), expected, "input: {text:?}");
    }
}

#[test]
fn encode_round_trip_preserves_line_structure_modulo_punctuation() {
    let text = "Erste Zeile hier.\nZweite, Zeile!\n\nDritter Absatz";
    let doc = encode(text, &EncodeConfig::default());
    assert_eq!(
        reassemble_lines(&doc),
        vec!["Erste Zeile hier", "Zweite Zeile", "Dritter Absatz"]
    );

    // And the rendered markup parses back to the identical tree.
    let parsed = parse_html(&render_html(&doc)).expect("own markup parses");
    assert_eq!(parsed, doc);
}

#[test]
fn empty_input_yields_no_words_and_no_annotations() {
    let doc = encode("", &EncodeConfig::default());
    assert_eq!(doc.word_count(), 0);
    assert!(!has_annotations(&render_html(&doc)));
}

#[test]
fn extract_x_entity_scenario_from_the_title_grammar() {
    let title = "x_sensibility 1; bbox 414 176 526 200; x_entity first_name 0";
    assert_eq!(
        hocr::title::x_entity_label(title).as_deref(),
        Some("first_name")
    );
    assert_eq!(
        hocr::title::x_entity_full_id(title).as_deref(),
        Some("first_name_0")
    );
}

#[test]
fn label_and_full_id_decoders_agree_on_the_annotated_set() {
    let html = r#"
<div class='ocr_page' id='page_1' title='bbox 0 0 100 100'>
 <span class='ocr_line' id='line_1' title='bbox 0 0 90 10'>
  <span class='ocrx_word' id='word_1' title='bbox 0 0 30 10; x_entity first_name 0'>Korben</span>
  <span class='ocrx_word' id='word_2' title='bbox 31 0 60 10'>und</span>
  <span class='ocrx_word' id='word_3' title='bbox 61 0 90 10; x_entity city 2'>Berlin</span>
 </span>
</div>"#;
    let doc = parse_html(html).expect("fixture parses");
    let labels = annotate::title_form::decode_labels(&doc);
    let full_ids = annotate::title_form::decode_full_ids(&doc);

    // Same words qualify in both, only the granularity differs.
    assert_eq!(full_ids.len(), 2);
    assert_eq!(labels.len(), 2);
    assert!(labels.contains_key("first_name"));
    assert!(labels.contains_key("city"));
    assert_eq!(full_ids[0].0, "first_name_0");
    assert_eq!(full_ids[1].0, "city_2");
}

#[test]
fn json_decoder_is_invariant_to_input_representation() {
    let tree = serde_json::json!({
        "type": "document",
        "children": [
            {"type": "word", "attributes": {"x_entity": "city"}, "id": 1, "text": "Berlin"},
            {"meta": {"type": "word", "attributes": {"x_entity": "first_name 0"}, "id": 2, "text": "Korben"}}
        ]
    });
    let from_tree = annotate::json_form::decode_tree(&tree);
    let from_string = annotate::json_form::decode_str(&tree.to_string());
    assert_eq!(from_tree, from_string);
    assert_eq!(from_tree.len(), 2);
}

#[test]
fn restore_after_pseudonymize_is_identity_under_identity_transform() {
    let mut span_map = std::collections::BTreeMap::new();
    span_map.insert("Korben Dallas".to_string(), "first_name_0".to_string());
    span_map.insert("Berlin".to_string(), "city_1".to_string());
    let mapping = pseudonym::EntityMapping::from_span_map(&span_map);

    let original = "Korben Dallas war nie in Berlin.";
    let (pseudonymized, context) = pseudonym::pseudonymize(original, &mapping);
    assert_ne!(pseudonymized, original);

    let restored = pseudonym::restore(&pseudonymized, &context);
    assert_eq!(restored.text, original);
    assert!(restored.missing_placeholders.is_empty());
}

#[test]
fn fallback_path_never_panics_on_awkward_input() {
    let awkward = [
        "",
        "\n\n\n",
        "[NAME] schon pseudonymisiert",
        "1234567890123456789012345678901234567890",
        "ünïcödé Ëverywhere ÄÖÜ ß 😀",
    ];
    for text in awkward {
        let (out, context) = pseudonym::pseudonymize(text, &pseudonym::EntityMapping::default());
        assert!(context.fallback);
        let _ = pseudonym::restore(&out, &context);
    }
}
