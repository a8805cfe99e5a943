//! HOCR markup parsing.
//!
//! Recovers an [`HocrDocument`] from annotated markup returned by the
//! entity-extraction collaborator. The annotator is not under our control, so
//! this parser is deliberately tolerant: it matches region-opening tags by
//! class with either quote style and in any attribute order, assigns regions
//! by position rather than by balanced-tag nesting, and synthesizes wrapper
//! regions when the markup uses direct page→line nesting without `ocr_par`.
//!
//! Malformed region attributes degrade to defaults; only a document with no
//! page region at all is rejected.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::{BBox, HocrDocument, HocrLine, HocrPage, HocrParagraph, HocrWord};
use crate::error::HocrError;
use crate::title;

static PAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<[a-zA-Z]+[^>]*class=["']ocr_page["'][^>]*>"#).expect("static regex")
});
static PAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<[a-zA-Z]+[^>]*class=["']ocr_par["'][^>]*>"#).expect("static regex")
});
static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<[a-zA-Z]+[^>]*class=["']ocr_line["'][^>]*>"#).expect("static regex")
});
static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<span[^>]*class=["']ocrx_word["'][^>]*>([^<]*)</span>"#).expect("static regex")
});
static ID_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"id=["']([^"']*)["']"#).expect("static regex"));
static TITLE_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"title=["']([^"']*)["']"#).expect("static regex"));

/// Parse HOCR markup into a document tree.
pub fn parse_html(html: &str) -> Result<HocrDocument, HocrError> {
    let page_tag = PAGE_RE.find(html).ok_or(HocrError::MissingPage)?;
    let page_number = id_number(page_tag.as_str()).unwrap_or(1);
    let page_bbox = title_bbox(page_tag.as_str());

    // Region openers and word spans by byte offset. Document order in the
    // markup is the only structure we rely on; closing tags are ignored.
    enum Event {
        Par { id: Option<u32>, bbox: BBox },
        Line { id: Option<u32>, bbox: BBox },
        Word(HocrWord),
    }
    let mut events: Vec<(usize, Event)> = Vec::new();

    for tag in PAR_RE.find_iter(html) {
        events.push((
            tag.start(),
            Event::Par {
                id: id_number(tag.as_str()),
                bbox: title_bbox(tag.as_str()),
            },
        ));
    }
    for tag in LINE_RE.find_iter(html) {
        events.push((
            tag.start(),
            Event::Line {
                id: id_number(tag.as_str()),
                bbox: title_bbox(tag.as_str()),
            },
        ));
    }
    for (word_seq, caps) in WORD_RE.captures_iter(html).enumerate() {
        let tag = caps.get(0).expect("match has a full capture");
        let word_title = TITLE_ATTR_RE
            .captures(tag.as_str())
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let word = HocrWord {
            id: id_number(tag.as_str()).unwrap_or(word_seq as u32 + 1),
            bbox: title::bbox(&word_title).unwrap_or((0, 0, 0, 0)),
            text: unescape_text(&caps[1]),
            title: word_title,
        };
        events.push((tag.start(), Event::Word(word)));
    }
    events.sort_by_key(|(offset, _)| *offset);

    let mut paragraphs: Vec<HocrParagraph> = Vec::new();
    let mut current_par: Option<HocrParagraph> = None;
    let mut current_line: Option<HocrLine> = None;
    let mut next_par_id = 0u32;
    let mut next_line_id = 0u32;

    let flush_line = |par: &mut Option<HocrParagraph>,
                      line: &mut Option<HocrLine>,
                      next_par_id: &mut u32| {
        if let Some(line) = line.take() {
            let par = par.get_or_insert_with(|| {
                // Direct page→line nesting: synthesize the wrapper.
                *next_par_id += 1;
                HocrParagraph {
                    id: *next_par_id,
                    bbox: (0, 0, 0, 0),
                    lines: Vec::new(),
                }
            });
            par.lines.push(line);
        }
    };

    for (_, event) in events {
        match event {
            Event::Par { id, bbox } => {
                flush_line(&mut current_par, &mut current_line, &mut next_par_id);
                if let Some(par) = current_par.take() {
                    if !par.lines.is_empty() {
                        paragraphs.push(par);
                    }
                }
                next_par_id += 1;
                current_par = Some(HocrParagraph {
                    id: id.unwrap_or(next_par_id),
                    bbox,
                    lines: Vec::new(),
                });
            }
            Event::Line { id, bbox } => {
                flush_line(&mut current_par, &mut current_line, &mut next_par_id);
                next_line_id += 1;
                current_line = Some(HocrLine {
                    id: id.unwrap_or(next_line_id),
                    bbox,
                    words: Vec::new(),
                });
            }
            Event::Word(word) => {
                // A word before any line opener still lands somewhere.
                current_line
                    .get_or_insert_with(|| {
                        next_line_id += 1;
                        HocrLine {
                            id: next_line_id,
                            bbox: (0, 0, 0, 0),
                            words: Vec::new(),
                        }
                    })
                    .words
                    .push(word);
            }
        }
    }
    flush_line(&mut current_par, &mut current_line, &mut next_par_id);
    if let Some(par) = current_par.take() {
        if !par.lines.is_empty() {
            paragraphs.push(par);
        }
    }

    Ok(HocrDocument {
        page: HocrPage {
            number: page_number,
            bbox: page_bbox,
            paragraphs,
        },
    })
}

/// Trailing digits of a tag's `id` attribute (`id='word_17'` → `Some(17)`).
fn id_number(tag: &str) -> Option<u32> {
    let id = ID_ATTR_RE.captures(tag)?.get(1)?.as_str();
    let digits: String = id
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

/// Bounding box from a tag's `title` attribute; zeros when absent.
fn title_bbox(tag: &str) -> BBox {
    TITLE_ATTR_RE
        .captures(tag)
        .and_then(|c| c.get(1))
        .and_then(|m| title::bbox(m.as_str()))
        .unwrap_or((0, 0, 0, 0))
}

fn unescape_text(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodeConfig;
    use crate::encode::encode;
    use crate::render::render_html;

    #[test]
    fn render_then_parse_preserves_structure_and_text() {
        let doc = encode(
            "Meine Name ist Korben Dallas\nzweite Zeile\n\nneuer Absatz",
            &EncodeConfig::default(),
        );
        let parsed = parse_html(&render_html(&doc)).expect("markup parses");
        assert_eq!(parsed, doc);
    }

    #[test]
    fn parses_annotated_markup_with_double_quotes() {
        let html = r#"
<div class="ocr_page" id="page_1" title="bbox 0 0 1000 1000">
 <div class="ocr_par" id="par_1" title="bbox 40 40 500 72">
  <span class="ocr_line" id="line_1" title="bbox 40 40 500 72">
   <span class="ocrx_word" id="word_1" title="bbox 40 40 160 72; x_entity first_name 0">Korben</span>
   <span class="ocrx_word" id="word_2" title="bbox 170 40 290 72">sagt</span>
  </span>
 </div>
</div>"#;
        let doc = parse_html(html).expect("markup parses");
        assert_eq!(doc.word_count(), 2);
        let first = doc.words().next().unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.text, "Korben");
        assert!(first.title.contains("x_entity first_name 0"));
        assert_eq!(first.bbox, (40, 40, 160, 72));
    }

    #[test]
    fn direct_page_line_nesting_gets_a_synthetic_paragraph() {
        let html = r#"
<div class='ocr_page' id='page_1' title='bbox 0 0 100 100'>
 <span class='ocr_line' id='line_1' title='bbox 0 0 50 10'>
  <span class='ocrx_word' id='word_1' title='bbox 0 0 20 10'>hello</span>
 </span>
</div>"#;
        let doc = parse_html(html).expect("markup parses");
        assert_eq!(doc.page.paragraphs.len(), 1);
        assert_eq!(doc.page.paragraphs[0].lines.len(), 1);
        assert_eq!(doc.words().next().unwrap().text, "hello");
    }

    #[test]
    fn missing_page_is_rejected() {
        assert_eq!(
            parse_html("<div class='ocr_par'>x</div>"),
            Err(HocrError::MissingPage)
        );
    }

    #[test]
    fn word_without_title_defaults_to_empty_metadata() {
        let html = r#"<div class='ocr_page' id='page_1' title='bbox 0 0 9 9'>
<span class='ocrx_word' id='word_1'>bare</span></div>"#;
        let doc = parse_html(html).expect("markup parses");
        let word = doc.words().next().unwrap();
        assert_eq!(word.title, "");
        assert_eq!(word.bbox, (0, 0, 0, 0));
    }
}
