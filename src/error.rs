//! Unified error handling for relayd.
//!
//! Business rejections become `NOK` replies to the offending client;
//! everything else is logged by the connection task and never reaches
//! other sessions.

use relay_proto::ServerCommand;
use thiserror::Error;

use crate::state::SessionId;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not registered")]
    NotRegistered,

    #[error("already registered")]
    AlreadyRegistered,

    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("name in use: {0}")]
    NameInUse(String),

    /// The notice this command would produce does not fit in one frame.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong { actual: usize, limit: usize },

    #[error("send error: {0}")]
    Send(#[from] SessionError),

    /// The client asked to leave; the connection task tears down.
    #[error("client quit")]
    Quit,
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotRegistered => "not_registered",
            Self::AlreadyRegistered => "already_registered",
            Self::InvalidName(_) => "invalid_name",
            Self::NameInUse(_) => "name_in_use",
            Self::MessageTooLong { .. } => "message_too_long",
            Self::Send(_) => "send_error",
            Self::Quit => "quit",
        }
    }

    /// Convert to a `NOK` reply.
    ///
    /// Returns `None` for errors that don't warrant a client-visible reply.
    pub fn to_reply(&self) -> Option<ServerCommand> {
        let reason = match self {
            Self::NotRegistered => "not connected",
            Self::AlreadyRegistered => "already connected",
            Self::InvalidName(_) => "invalid name",
            Self::NameInUse(_) => "name in use",
            Self::MessageTooLong { .. } => "message too long",

            Self::Send(_) | Self::Quit => return None,
        };
        Some(ServerCommand::Nok(reason.to_string()))
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Session Errors (outbound delivery)
// ============================================================================

/// Failure to hand a notice to a session's outbound queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session's writer has stopped; its connection is going away.
    #[error("session {0} is closed")]
    Closed(SessionId),
}
