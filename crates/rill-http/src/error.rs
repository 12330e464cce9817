//! Error types for request dispatch.

use thiserror::Error;

/// An application handler failure, opaque to the core.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by a dispatch call.
///
/// Only the not-found case is recovered inside the core (as a 404
/// response); everything here propagates to the transport layer, which owns
/// generic error emission or connection teardown. Nothing is retried.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The handler's return value is not representable as JSON.
    ///
    /// Fatal for the request: no partial response is sent.
    #[error("response content is not JSON serializable: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The application handler failed.
    #[error("handler failed: {0}")]
    Handler(#[source] HandlerError),

    /// The transport rejected a send.
    #[error("transport send failed: {0}")]
    Transport(#[from] std::io::Error),
}

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
