//! Error types for the assistant pipeline
//!
//! All failure modes are explicit enum variants so callers pattern-match on
//! them instead of catching opaque errors. Nothing here is fatal: every
//! variant has a defined fallback path in the dispatcher.

use thiserror::Error;

/// Errors from the remote assistant pipeline (session construction and sends)
///
/// A missing or invalid credential is *not* represented here. The session
/// manager reports it as an absent session, which is a normal condition, not
/// an error.
#[derive(Error, Debug)]
pub enum ChatError {
    /// HTTP transport failed (connection refused, DNS, timeout, etc.)
    #[error("failed to reach the assistant API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("assistant API returned status {status}: {body}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Raw error body, for logs only (never shown to the end user)
        body: String,
    },

    /// The API answered 429
    #[error("assistant API rate limit exceeded: {0}")]
    RateLimited(String),

    /// The response body did not match the expected wire format
    #[error("malformed assistant API response: {0}")]
    MalformedResponse(String),

    /// The API refused the prompt (safety block)
    #[error("prompt was blocked by the assistant API: {0}")]
    Blocked(String),

    /// A request was attempted with an empty credential
    ///
    /// Guarded against upstream by the resolver; kept as an explicit variant
    /// so the client never fires a request it knows will be rejected.
    #[error("no usable credential is configured")]
    MissingCredential,
}

/// Errors from the durable credential store
#[derive(Error, Debug)]
pub enum StoreError {
    /// File I/O error while reading or writing the store file
    #[error("credential store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file exists but is not valid JSON
    #[error("credential store format error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store file uses a format version this build does not understand
    #[error("unsupported credential store version: {0}")]
    UnsupportedVersion(u32),
}

/// Errors from the work-submission relay
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The draft failed local validation; one message per offending field
    #[error("submission is invalid: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// HTTP transport to the relay failed
    #[error("failed to reach the submission relay: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay rejected the payload; carries the relay's own error messages
    #[error("submission relay rejected the payload (status {status})")]
    Rejected {
        /// HTTP status code returned by the relay
        status: u16,
        /// Error messages parsed from the relay's response body
        errors: Vec<String>,
    },
}
