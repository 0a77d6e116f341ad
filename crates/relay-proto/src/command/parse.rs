//! Parsing of relay commands from message text.

use std::str::FromStr;

use crate::error::MessageParseError;
use crate::name::NameExt;

use super::types::{ClientCode, ClientCommand, ServerCode, ServerCommand};

/// Split message text into its code and the untouched parameter remainder.
///
/// ```
/// use relay_proto::command::split_code;
///
/// assert_eq!(split_code("PRV Ana hola que tal"), ("PRV", Some("Ana hola que tal")));
/// assert_eq!(split_code("LUS"), ("LUS", None));
/// assert_eq!(split_code("MSG "), ("MSG", Some("")));
/// ```
pub fn split_code(raw: &str) -> (&str, Option<&str>) {
    match raw.split_once(' ') {
        Some((code, params)) => (code, Some(params)),
        None => (raw, None),
    }
}

impl FromStr for ClientCode {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| MessageParseError::UnknownCode(s.to_owned()))
    }
}

impl FromStr for ServerCode {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServerCode::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| MessageParseError::UnknownCode(s.to_owned()))
    }
}

impl ClientCommand {
    /// Build a command from an already recognised code and its raw parameters,
    /// enforcing the per-code arity.
    pub fn from_parts(code: ClientCode, params: Option<&str>) -> Result<Self, MessageParseError> {
        let wrong_arity = || MessageParseError::WrongArity {
            code: code.as_str(),
        };

        match (code, params) {
            (ClientCode::Con, Some(name)) if !name.is_empty() => Ok(Self::Con(name.to_owned())),
            (ClientCode::Msg, Some(text)) if !text.is_empty() => Ok(Self::Msg(text.to_owned())),
            (ClientCode::Prv, Some(params)) => {
                let (target, text) = params
                    .split_once(' ')
                    .filter(|(_, text)| !text.is_empty())
                    .ok_or_else(wrong_arity)?;
                if !target.is_valid_name() {
                    return Err(MessageParseError::InvalidTarget {
                        code: code.as_str(),
                        name: target.to_owned(),
                    });
                }
                Ok(Self::Prv {
                    target: target.to_owned(),
                    text: text.to_owned(),
                })
            }
            (ClientCode::Lus, None) => Ok(Self::Lus),
            (ClientCode::Exi, None) => Ok(Self::Exi),
            _ => Err(wrong_arity()),
        }
    }
}

impl FromStr for ClientCommand {
    type Err = MessageParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(MessageParseError::Empty);
        }
        let (code, params) = split_code(raw);
        Self::from_parts(code.parse()?, params)
    }
}

impl FromStr for ServerCommand {
    type Err = MessageParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(MessageParseError::Empty);
        }
        let (code, params) = split_code(raw);
        let code: ServerCode = code.parse()?;
        let wrong_arity = || MessageParseError::WrongArity {
            code: code.as_str(),
        };

        // Sender-prefixed notices: "<from> <text>".
        let from_and_text = |params: Option<&str>| {
            params
                .and_then(|p| p.split_once(' '))
                .filter(|(from, _)| !from.is_empty())
                .map(|(from, text)| (from.to_owned(), text.to_owned()))
                .ok_or_else(wrong_arity)
        };
        let single_name = |params: Option<&str>| {
            params
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .ok_or_else(wrong_arity)
        };

        Ok(match code {
            ServerCode::Ok => Self::Ok(params.unwrap_or_default().to_owned()),
            ServerCode::Nok => Self::Nok(params.unwrap_or_default().to_owned()),
            ServerCode::Cht => {
                let (from, text) = from_and_text(params)?;
                Self::Cht { from, text }
            }
            ServerCode::Prv => {
                let (from, text) = from_and_text(params)?;
                Self::Prv { from, text }
            }
            ServerCode::Lst => Self::Lst(
                params
                    .unwrap_or_default()
                    .split(',')
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
            ServerCode::Exi => Self::Exi(single_name(params)?),
            ServerCode::Con => Self::Con(single_name(params)?),
        })
    }
}
