//! Error types for OxiXpress operations.
//!
//! The decoder follows a best-effort policy: running out of compressed
//! input mid-stream is reported through a status value, not an error.
//! Only conditions that prevent decoding from starting at all surface
//! as [`XpressError`] values from the public API.

use thiserror::Error;

/// The main error type for OxiXpress operations.
#[derive(Debug, Error)]
pub enum XpressError {
    /// The compressed input buffer is empty.
    #[error("Empty input: no compressed data to decode")]
    EmptyInput,

    /// The bit stream ran out of input bytes.
    ///
    /// Raised by [`BitReader::fill`](crate::BitReader::fill) when the
    /// underlying slice is exhausted before the requested number of bits
    /// is buffered. The decode loop treats this as the end-of-stream
    /// signal rather than a fatal failure.
    #[error("Unexpected end of stream: needed {expected} more bits")]
    UnexpectedEof {
        /// Number of bits that were requested but not available.
        expected: u32,
    },
}

/// Result type alias for OxiXpress operations.
pub type Result<T> = std::result::Result<T, XpressError>;

impl XpressError {
    /// Create an unexpected end-of-stream error.
    pub fn unexpected_eof(expected: u32) -> Self {
        Self::UnexpectedEof { expected }
    }
}
