//! Syntactic checks over raw command text.
//!
//! [`ClientCommand`]'s `FromStr` already applies all of these; the free
//! functions exist for callers that want a yes/no answer about raw text
//! without building a command.

use crate::command::{split_code, ClientCode, ClientCommand, ServerCode};

/// Which side of the connection produced a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Sent by a client to the server.
    ClientToServer,
    /// Sent by the server to a client.
    ServerToClient,
}

/// True iff `code` belongs to the closed code set of `direction`.
pub fn is_known_code(code: &str, direction: Direction) -> bool {
    match direction {
        Direction::ClientToServer => code.parse::<ClientCode>().is_ok(),
        Direction::ServerToClient => code.parse::<ServerCode>().is_ok(),
    }
}

/// True iff `params` has the shape that client `code` requires.
///
/// `params` is `None` when the message had no space after the code.
pub fn arity_ok(code: ClientCode, params: Option<&str>) -> bool {
    ClientCommand::from_parts(code, params).is_ok()
}

/// True iff raw client text would be accepted for dispatch.
pub fn is_well_formed(raw: &str) -> bool {
    let (code, params) = split_code(raw);
    code.parse::<ClientCode>()
        .is_ok_and(|code| arity_ok(code, params))
}
