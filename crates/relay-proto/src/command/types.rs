//! Relay command types.
//!
//! Each direction has a closed set of codes. Client codes are all three
//! characters wide; server codes are two or three.

/// Codes a client may send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientCode {
    /// `CON <name>` - register a display name.
    Con,
    /// `MSG <text>` - chat to everyone.
    Msg,
    /// `PRV <name> <text>` - private message.
    Prv,
    /// `LUS` - list users.
    Lus,
    /// `EXI` - leave.
    Exi,
}

impl ClientCode {
    /// All client codes, in protocol order.
    pub const ALL: [ClientCode; 5] = [Self::Con, Self::Msg, Self::Prv, Self::Lus, Self::Exi];

    /// Wire spelling of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Con => "CON",
            Self::Msg => "MSG",
            Self::Prv => "PRV",
            Self::Lus => "LUS",
            Self::Exi => "EXI",
        }
    }
}

/// Codes a server may send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServerCode {
    /// `OK <text>` - registration accepted.
    Ok,
    /// `NOK <text>` - request rejected.
    Nok,
    /// `CHT <name> <text>` - general chat line.
    Cht,
    /// `PRV <name> <text>` - private message.
    Prv,
    /// `LST <names>` - comma separated roster.
    Lst,
    /// `EXI <name>` - leave notice.
    Exi,
    /// `CON <name>` - join notice.
    Con,
}

impl ServerCode {
    /// All server codes, in protocol order.
    pub const ALL: [ServerCode; 7] = [
        Self::Ok,
        Self::Nok,
        Self::Cht,
        Self::Prv,
        Self::Lst,
        Self::Exi,
        Self::Con,
    ];

    /// Wire spelling of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Nok => "NOK",
            Self::Cht => "CHT",
            Self::Prv => "PRV",
            Self::Lst => "LST",
            Self::Exi => "EXI",
            Self::Con => "CON",
        }
    }
}

/// A well-formed client request.
///
/// Obtaining one through [`str::parse`] means the code is known and the
/// parameters have the right arity; `Prv::target` is additionally a valid
/// name. The name in `Con` is *not* charset-checked here, because an invalid
/// name is answered with a rejection rather than dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientCommand {
    /// `CON <name>`
    Con(String),
    /// `MSG <text>`
    Msg(String),
    /// `PRV <target> <text>`
    Prv {
        /// Recipient name.
        target: String,
        /// Free text, may contain spaces.
        text: String,
    },
    /// `LUS`
    Lus,
    /// `EXI`
    Exi,
}

impl ClientCommand {
    /// The code of this command.
    pub fn code(&self) -> ClientCode {
        match self {
            Self::Con(_) => ClientCode::Con,
            Self::Msg(_) => ClientCode::Msg,
            Self::Prv { .. } => ClientCode::Prv,
            Self::Lus => ClientCode::Lus,
            Self::Exi => ClientCode::Exi,
        }
    }
}

/// A server notice or reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerCommand {
    /// `OK <text>`
    Ok(String),
    /// `NOK <reason>`
    Nok(String),
    /// `CHT <from> <text>`
    Cht {
        /// Sender name.
        from: String,
        /// Chat text.
        text: String,
    },
    /// `PRV <from> <text>`
    Prv {
        /// Sender name.
        from: String,
        /// Message text.
        text: String,
    },
    /// `LST <name,name,...>`
    Lst(Vec<String>),
    /// `EXI <name>`
    Exi(String),
    /// `CON <name>`
    Con(String),
}

impl ServerCommand {
    /// The code of this command.
    pub fn code(&self) -> ServerCode {
        match self {
            Self::Ok(_) => ServerCode::Ok,
            Self::Nok(_) => ServerCode::Nok,
            Self::Cht { .. } => ServerCode::Cht,
            Self::Prv { .. } => ServerCode::Prv,
            Self::Lst(_) => ServerCode::Lst,
            Self::Exi(_) => ServerCode::Exi,
            Self::Con(_) => ServerCode::Con,
        }
    }
}
