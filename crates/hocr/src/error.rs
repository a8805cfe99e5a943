use thiserror::Error;

/// Errors that can occur while parsing HOCR markup.
///
/// Encoding is infallible; only the parse direction can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HocrError {
    #[error("document contains no ocr_page region")]
    MissingPage,
    #[error("malformed markup: {0}")]
    Malformed(String),
}
