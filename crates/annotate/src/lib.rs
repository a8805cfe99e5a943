//! textveil annotation-decoding layer.
//!
//! Two independent formats carry the same conceptual payload: which spans of
//! the document the extraction collaborator considers entities, and under
//! which label:
//!
//! - **Title-attribute form**: our HOCR markup echoed back with `x_entity`
//!   segments appended to word titles ([`title_form`])
//! - **JSON-tree form**: a nested document tree with typed word nodes
//!   carrying `attributes.x_entity` ([`json_form`])
//!
//! [`AnnotationSource`] detects which shape a response body is and exposes
//! both mapping directions over it; [`reconstruct`] rebuilds pseudonymized
//! running text from an annotated document, preserving line and paragraph
//! structure.
//!
//! Decode ambiguity is never an error here: malformed segments, missing
//! titles, and unparseable trees degrade to exclusion or an empty mapping,
//! with a `tracing` warning where a caller might otherwise be surprised.

pub mod json_form;
pub mod reconstruct;
pub mod source;
pub mod title_form;

pub use crate::source::AnnotationSource;
pub use crate::title_form::has_annotations;
