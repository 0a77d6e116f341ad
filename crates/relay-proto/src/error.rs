//! Error types for the relay protocol library.
//!
//! [`ProtocolError`] is fatal to a stream (the socket failed, or an outgoing
//! payload cannot be framed), while [`MessageParseError`] describes a single
//! bad message that the reader reports and then skips.

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

    /// Outgoing payload does not fit in a frame.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Actual payload length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// The connection task has stopped.
    #[error("connection closed")]
    ConnectionClosed,
}

/// Errors encountered when turning one received frame into a command.
///
/// None of these terminate the connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Frame carried no text.
    #[error("empty message")]
    Empty,

    /// Leading token is not a code of the expected direction.
    #[error("unknown command code: {0:?}")]
    UnknownCode(String),

    /// Code is known but its parameters have the wrong shape.
    #[error("wrong parameters for {code}")]
    WrongArity {
        /// The command code.
        code: &'static str,
    },

    /// A name-bearing field failed the name charset check.
    #[error("invalid name in {code}: {name:?}")]
    InvalidTarget {
        /// The command code.
        code: &'static str,
        /// The rejected name.
        name: String,
    },

    /// Frame payload was not UTF-8.
    #[error("invalid UTF-8 at byte {byte_pos}")]
    InvalidUtf8 {
        /// Byte position where UTF-8 validation failed.
        byte_pos: usize,
    },

    /// Frame declared a length above the configured maximum and was skipped.
    #[error("frame too long: {actual} bytes (limit: {limit})")]
    FrameTooLong {
        /// Declared payload length.
        actual: usize,
        /// Maximum accepted length.
        limit: usize,
    },
}

impl MessageParseError {
    /// Static label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::UnknownCode(_) => "unknown_code",
            Self::WrongArity { .. } => "wrong_arity",
            Self::InvalidTarget { .. } => "invalid_target",
            Self::InvalidUtf8 { .. } => "invalid_utf8",
            Self::FrameTooLong { .. } => "frame_too_long",
        }
    }
}
