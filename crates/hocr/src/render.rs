//! HOCR markup emission.
//!
//! Emits the XHTML convention the entity-extraction collaborator consumes:
//! `ocr_page` → `ocr_par` → `ocr_line` → `ocrx_word`, region metadata in the
//! `title` attribute. This implementation always writes the explicit
//! `ocr_par` wrapper variant; the parser in [`crate::parse`] accepts markup
//! with or without it.

use crate::document::{HocrDocument, HocrLine, HocrParagraph, HocrWord};

/// Render a document as a complete HOCR XHTML string.
pub fn render_html(doc: &HocrDocument) -> String {
    let mut html = String::with_capacity(1024 + doc.word_count() * 96);

    html.push_str(
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml" xml:lang="en" lang="en">
<head>
<meta http-equiv="Content-Type" content="text/html;charset=utf-8" />
<meta name="ocr-system" content="textveil 0.1" />
<meta name="ocr-capabilities" content="ocr_page ocr_par ocr_line ocrx_word" />
<title>OCR Output</title>
</head>
<body>
"#,
    );

    let page = &doc.page;
    let (x0, y0, x1, y1) = page.bbox;
    html.push_str(&format!(
        "<div class='ocr_page' id='page_{}' title='bbox {} {} {} {}'>\n",
        page.number, x0, y0, x1, y1
    ));
    for paragraph in &page.paragraphs {
        render_paragraph(&mut html, paragraph);
    }
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

fn render_paragraph(html: &mut String, paragraph: &HocrParagraph) {
    let (x0, y0, x1, y1) = paragraph.bbox;
    html.push_str(&format!(
        "  <div class='ocr_par' id='par_{}' title='bbox {} {} {} {}'>\n",
        paragraph.id, x0, y0, x1, y1
    ));
    for line in &paragraph.lines {
        render_line(html, line);
    }
    html.push_str("  </div>\n");
}

fn render_line(html: &mut String, line: &HocrLine) {
    let (x0, y0, x1, y1) = line.bbox;
    html.push_str(&format!(
        "    <span class='ocr_line' id='line_{}' title='bbox {} {} {} {}'>",
        line.id, x0, y0, x1, y1
    ));
    for word in &line.words {
        render_word(html, word);
    }
    html.push_str("</span>\n");
}

fn render_word(html: &mut String, word: &HocrWord) {
    html.push_str(&format!(
        "<span class='ocrx_word' id='word_{}' title='{}'>{}</span>",
        word.id,
        word.title,
        escape_text(&word.text)
    ));
}

/// Minimal entity escaping for element text content.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodeConfig;
    use crate::encode::encode;

    #[test]
    fn rendered_markup_carries_the_full_hierarchy() {
        let doc = encode("Hello world\nsecond line\n\nnext paragraph", &EncodeConfig::default());
        let html = render_html(&doc);

        assert!(html.contains("class='ocr_page'"));
        assert_eq!(html.matches("class='ocr_par'").count(), 2);
        assert_eq!(html.matches("class='ocr_line'").count(), 3);
        assert_eq!(html.matches("class='ocrx_word'").count(), 6);
        assert!(html.contains(">Hello</span>"));
    }

    #[test]
    fn empty_document_renders_a_bare_page() {
        let doc = encode("", &EncodeConfig::default());
        let html = render_html(&doc);
        assert!(html.contains("class='ocr_page'"));
        assert!(!html.contains("ocrx_word"));
    }

    #[test]
    fn markup_sensitive_characters_are_escaped() {
        // `<` and `>` survive punctuation stripping (they are math symbols,
        // not punctuation) and must be escaped in element content.
        let doc = encode("a<b x>y", &EncodeConfig::default());
        let html = render_html(&doc);
        assert!(html.contains(">a&lt;b</span>"));
        assert!(html.contains(">x&gt;y</span>"));
        assert_eq!(escape_text("a&b"), "a&amp;b");
    }
}
