//! textveil server - HTTP surface for the pseudonymization pipeline
//!
//! This crate exposes the textveil pipeline over two endpoints:
//!
//! - `POST /improve`: pseudonymize the input, rewrite it through the
//!   language-model collaborator, and substitute the original entity values
//!   back into the result
//! - `POST /hocr`: pseudonymize only, returning the entity mappings and the
//!   placeholder text without calling the language model
//!
//! Plus `GET /` (API info) and `GET /health` (liveness).
//!
//! # Features
//!
//! - **Input validation**: per-endpoint character caps enforced before any
//!   pipeline work
//! - **Middleware**: compression, CORS, request ID tracking, structured
//!   request logging
//! - **Configuration**: environment variables (`TEXTVEIL_SERVER__*`) and
//!   optional `textveil.*` config file
//! - **Error handling**: stable error codes distinguishing bad input,
//!   missing collaborator configuration, and upstream failures
//! - **Graceful shutdown**: SIGTERM / Ctrl+C handling
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
