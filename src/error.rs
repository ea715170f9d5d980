//! Error types for Swivel API operations.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the Swivel service.
///
/// There is no local recovery: every error surfaces to the caller, and a
/// failed multi-page fetch discards any pages already received.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum Error {
    /// A response body could not be parsed as the expected format.
    ///
    /// Carries the request path and the raw body so the caller can diagnose
    /// what the service actually returned.
    #[error("Failed to decode response from {path}: {detail}")]
    Decode {
        /// Request path that produced the body.
        path: String,
        /// The raw, unparseable response body.
        body: String,
        /// Parser error message.
        detail: String,
    },
    /// Non-success HTTP status on a request.
    #[error("HTTP {status} from {path}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Request path.
        path: String,
        /// Response body, if any.
        body: String,
    },
    /// A cell references a position that cannot be reconciled into a
    /// rectangular grid (e.g. a negative index from a misbehaving service).
    #[error("Inconsistent grid: {0}")]
    InconsistentGrid(String),
    /// Network-level failure before a response was received.
    #[error("Network error: {0}")]
    Network(String),
    /// Request timed out.
    #[error("Request timed out")]
    Timeout,
    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Local IO or encoding failure.
    #[error("IO error: {0}")]
    Io(String),
}
