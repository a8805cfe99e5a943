//! textveil remote-collaborator layer.
//!
//! Thin async clients for the two external services the pipeline consumes:
//! the entity-extraction endpoint (HOCR document in, annotated payload out)
//! and an OpenAI-compatible chat-completion endpoint (the "improve" rewrite).
//! Both are modeled as traits so the pipeline and the server can swap in the
//! in-process stubs from [`stub`].
//!
//! Calls are never retried here. The pipeline treats a failed collaborator as
//! that one request's failure and decides locally whether a fallback applies.

mod client;
mod error;
mod extract;
mod improve;
pub mod stub;
mod traits;

pub use crate::error::RemoteError;
pub use crate::extract::{ExtractConfig, HttpEntityExtractor};
pub use crate::improve::{ImproveConfig, OpenAiImprover};
pub use crate::traits::{EntityExtractor, TextImprover};
