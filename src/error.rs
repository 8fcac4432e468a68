//! Error types for the HTTP/1.1 codec
//!
//! Mirrors the teacher crate's split between request-parsing errors and
//! response-sending errors, but adapted to the limit-carrying taxonomy this
//! codec needs for its own diagnostics.

use thiserror::Error;

/// Top-level error type returned by every public operation in this crate.
///
/// `Clone` so decoders can report the same terminal error on every subsequent
/// call once they have latched into a failed state (§4.5 "sticky failure").
#[derive(Error, Debug, Clone)]
pub enum HttpError {
    /// Generic syntactic violation with a human-readable locator.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Appending bytes to the decode buffer would exceed `max_buffer_size`.
    #[error("buffer overflow: size {size} exceeds limit {limit}")]
    BufferOverflow { size: usize, limit: usize },

    /// The message carries more header fields than `max_headers_count`.
    #[error("too many headers: count {count} exceeds limit {limit}")]
    TooManyHeaders { count: usize, limit: usize },

    /// A header (or start) line grew past `max_header_line_size` before a terminator appeared.
    #[error("header line too long: size {size} exceeds limit {limit}")]
    HeaderLineTooLong { size: usize, limit: usize },

    /// The accumulated body exceeded `max_body_size`.
    #[error("body too large: size {size} exceeds limit {limit}")]
    BodyTooLarge { size: usize, limit: usize },

    /// `feed_eof()` was called in a decoder state that still expects more bytes.
    #[error("unexpected eof")]
    UnexpectedEof,

    /// A header field-value violated the field-value grammar, including obs-fold.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(String),

    /// A header field-name is not a valid token.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// A response status line did not carry three digits in 100..=599.
    #[error("invalid status code: {0:?}")]
    InvalidStatusCode(Option<u16>),

    /// A chunk-size line or chunk terminator violated the chunked transfer grammar.
    #[error("invalid chunk size: {0}")]
    InvalidChunkSize(String),
}

impl HttpError {
    pub(crate) fn invalid_data<S: ToString>(s: S) -> Self {
        Self::InvalidData(s.to_string())
    }

    pub(crate) fn invalid_header_value<S: ToString>(s: S) -> Self {
        Self::InvalidHeaderValue(s.to_string())
    }

    pub(crate) fn invalid_chunk_size<S: ToString>(s: S) -> Self {
        Self::InvalidChunkSize(s.to_string())
    }
}

/// Early-return with an error if a predicate doesn't hold, RFC-compliance-check style.
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
