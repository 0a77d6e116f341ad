//! Events emitted by the client driver for the presentation layer.

use crate::command::ServerCommand;
use crate::error::MessageParseError;

/// Events that the client driver emits to its consumer (GUI, TUI, bot...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Transport is up; the name is not registered yet.
    Connected,

    /// The server accepted our name.
    Registered {
        /// Server greeting text.
        message: String,
    },

    /// The server refused a request.
    Rejected {
        /// Human-readable reason.
        reason: String,
    },

    /// A general chat line, our own included.
    Chat {
        /// Sender name.
        from: String,
        /// Message text.
        text: String,
    },

    /// A private message, either received or the echo of one we sent.
    Private {
        /// Sender name.
        from: String,
        /// Message text.
        text: String,
    },

    /// Reply to a roster request, in registration order.
    Roster {
        /// Registered names.
        names: Vec<String>,
    },

    /// Someone registered.
    Joined {
        /// The new name.
        name: String,
    },

    /// Someone left.
    Left {
        /// The departed name.
        name: String,
    },

    /// The server sent something we could not parse.
    Unrecognized {
        /// Why it was rejected.
        error: MessageParseError,
    },

    /// The connection is gone. No further events follow.
    Closed {
        /// Transport error, if the close was not clean.
        error: Option<String>,
    },
}

impl From<ServerCommand> for Event {
    fn from(cmd: ServerCommand) -> Self {
        match cmd {
            ServerCommand::Ok(message) => Self::Registered { message },
            ServerCommand::Nok(reason) => Self::Rejected { reason },
            ServerCommand::Cht { from, text } => Self::Chat { from, text },
            ServerCommand::Prv { from, text } => Self::Private { from, text },
            ServerCommand::Lst(names) => Self::Roster { names },
            ServerCommand::Con(name) => Self::Joined { name },
            ServerCommand::Exi(name) => Self::Left { name },
        }
    }
}
