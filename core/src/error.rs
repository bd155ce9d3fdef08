//! Error types for the upstream contract.
//!
//! # Design
//! `UpstreamError` keeps every failure class distinct so the adapter can log
//! the precise cause, even though it reports all of them to its own callers
//! as a single absence.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single upstream round-trip.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The upstream answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded into the expected wire shape.
    #[error("malformed upstream payload: {0}")]
    Malformed(String),

    /// The body decoded but carried `success: false`.
    #[error("upstream reported failure: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}

impl UpstreamError {
    /// Short stable label, recorded as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Malformed(_) => "malformed",
            UpstreamError::Rejected(_) => "rejected",
        }
    }
}

/// The configured upstream base URL cannot be used to build requests.
#[derive(Debug, Error)]
pub enum BaseUrlError {
    #[error("invalid upstream base URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("upstream base URL must be http or https, got {0:?}")]
    UnsupportedScheme(String),
}
