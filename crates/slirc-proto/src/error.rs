//! Error types for the IRC protocol library.
//!
//! Parsing is lenient: the only line the parser refuses is an empty one.
//! Framing errors (oversized inbound lines, I/O) are reported by the codec.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The server sent a line with no content between terminators.
    #[error("received an empty line")]
    EmptyLine,

    /// An inbound line grew past the codec limit before a terminator arrived.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Bytes buffered so far.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },
}
