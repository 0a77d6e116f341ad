//! Wire rendering of relay commands.

use std::fmt::{self, Display, Formatter};

use super::types::{ClientCode, ClientCommand, ServerCode, ServerCommand};

impl Display for ClientCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for ServerCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write `CODE` or `CODE params`.
fn write_with_params(f: &mut Formatter<'_>, code: &str, params: &str) -> fmt::Result {
    if params.is_empty() {
        f.write_str(code)
    } else {
        write!(f, "{code} {params}")
    }
}

impl Display for ClientCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let code = self.code().as_str();
        match self {
            Self::Con(name) => write_with_params(f, code, name),
            Self::Msg(text) => write_with_params(f, code, text),
            Self::Prv { target, text } => write!(f, "{code} {target} {text}"),
            Self::Lus | Self::Exi => f.write_str(code),
        }
    }
}

impl Display for ServerCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let code = self.code().as_str();
        match self {
            Self::Ok(text) | Self::Nok(text) => write_with_params(f, code, text),
            Self::Cht { from, text } | Self::Prv { from, text } => {
                write!(f, "{code} {from} {text}")
            }
            Self::Lst(names) => write_with_params(f, code, &names.join(",")),
            Self::Exi(name) | Self::Con(name) => write_with_params(f, code, name),
        }
    }
}
