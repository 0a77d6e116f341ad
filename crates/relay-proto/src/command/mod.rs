//! Relay command types and parsing.
//!
//! A message is `CODE` or `CODE PARAMS`: the code is the token before the
//! first space and the parameters are the untouched remainder.

mod parse;
mod serialize;
mod types;

pub use parse::split_code;
pub use types::{ClientCode, ClientCommand, ServerCode, ServerCommand};
