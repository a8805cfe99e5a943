//! textveil HOCR layer.
//!
//! This crate turns plain text into a synthetic HOCR document and back. The
//! geometry it emits is fabricated; the pipeline only needs a markup shape
//! the entity-extraction collaborator understands, with word order intact.
//!
//! ## What we do
//!
//! - Encode text into a page → paragraph → line → word tree with synthetic
//!   bounding boxes ([`encode`])
//! - Render that tree as HOCR XHTML ([`render_html`])
//! - Parse annotated HOCR markup coming back from the extraction service
//!   ([`parse_html`])
//! - Read and write the `title` attribute grammar, including `x_entity`
//!   annotation segments ([`title`])
//!
//! ## Invariants worth knowing
//!
//! - Encoding never fails; empty input is a valid empty document
//! - Word ids are document-wide, monotonic, starting at 1
//! - Blank input lines and paragraphs produce no regions
//! - Box coordinates only promise relative ordering, never real geometry

mod config;
mod document;
mod encode;
mod error;
mod parse;
mod render;
pub mod title;

pub use crate::config::EncodeConfig;
pub use crate::document::{BBox, HocrDocument, HocrLine, HocrPage, HocrParagraph, HocrWord};
pub use crate::encode::encode;
pub use crate::error::HocrError;
pub use crate::parse::parse_html;
pub use crate::render::render_html;
