//! Error types for the day-off client.
//!
//! # Design
//! The service reports failures as a short code in the body of a non-200
//! response. Known codes become `Error::Api` so callers can branch on the
//! code; anything else lands in `Error::UnexpectedStatus` with the raw status
//! and body for logging. Failures before any response arrives are
//! `Error::Transport` and are never mixed up with either of those.

use crate::types::ErrorCode;

/// Failure raised by the transport before a response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// DNS, connect, TLS or timeout failure.
    #[error("request failed: {0}")]
    Request(String),

    /// The response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// A failure code reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("API error {code} (HTTP {status}): {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: &'static str,
    pub status: u16,
}

impl ApiError {
    pub fn new(code: ErrorCode, status: u16) -> Self {
        Self {
            code,
            message: code.message(),
            status,
        }
    }
}

/// Errors returned by `DayOffClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Non-200 response whose body is not a known error code.
    #[error("unexpected status code {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// A 200 response whose body does not have the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),

    /// Strict mode only: the service sent a day code outside the known set.
    #[error("unknown day code {code:?} at position {index}")]
    UnknownDayCode { code: char, index: usize },

    #[error("year is required for this query")]
    MissingYear,

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// The service error code, if this is a typed API error.
    pub fn api_code(&self) -> Option<ErrorCode> {
        match self {
            Error::Api(e) => Some(e.code),
            _ => None,
        }
    }
}
