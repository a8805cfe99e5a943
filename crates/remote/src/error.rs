use thiserror::Error;

/// Errors from the external collaborators.
///
/// `MissingConfig` is a server-side configuration problem and maps to a
/// different HTTP error class than the transport and response failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("missing configuration: {0}")]
    MissingConfig(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
