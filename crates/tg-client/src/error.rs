//! Error types for the guide client.

/// Failure to obtain any HTTP response at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (DNS, connection refused, timeout, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Request(#[from] ureq::Error),

    /// The blocking request task did not complete.
    #[error("request task failed: {0}")]
    Task(String),

    /// Failure reported by a non-network transport.
    #[error("{0}")]
    Other(String),
}

/// Error from a guide request.
///
/// The `Display` output of every variant is a complete, user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    /// Table name was empty or whitespace only.
    #[error("Please enter a table name")]
    EmptyTableName,

    /// Backend answered with a non-success status.
    ///
    /// `message` is the backend's `detail` field when present, otherwise
    /// `HTTP <status>: <reason>`.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message to show.
        message: String,
    },

    /// Backend answered 200 without a usable `guide` string.
    #[error("Invalid response: missing or invalid guide content")]
    InvalidResponse,

    /// Backend could not be reached.
    #[error("Failed to connect to the API server. Please ensure the backend is running.")]
    Unreachable(#[source] TransportError),

    /// The task running the request panicked or was cancelled.
    #[error("Guide request did not complete: {0}")]
    Interrupted(String),
}

/// Reason the example index could not be used.
#[derive(Debug, thiserror::Error)]
pub(crate) enum IndexError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("malformed index response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("index response contained no usable tables")]
    Empty,
}
