//! # relay-proto
//!
//! Wire protocol for the relay chat system: length-prefixed frames carrying
//! a three-letter command code and its parameters.
//!
//! ## Features
//!
//! - Typed client and server commands with parsing and serialization
//! - Display name validation
//! - Optional Tokio codecs and an async client driver
//!
//! ## Quick Start
//!
//! ```rust
//! use relay_proto::{ClientCommand, ServerCommand};
//!
//! let cmd: ClientCommand = "PRV Luis hola que tal".parse().unwrap();
//! assert_eq!(
//!     cmd,
//!     ClientCommand::Prv { target: "Luis".into(), text: "hola que tal".into() }
//! );
//!
//! let reply = ServerCommand::Lst(vec!["Ana".into(), "Luis".into()]);
//! assert_eq!(reply.to_string(), "LST Ana,Luis");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod name;
pub mod validate;

#[cfg(feature = "tokio")]
pub mod client;
#[cfg(feature = "tokio")]
pub mod codec;
#[cfg(feature = "tokio")]
pub mod event;
#[cfg(feature = "tokio")]
pub mod frame;

pub use self::command::{ClientCode, ClientCommand, ServerCode, ServerCommand};
pub use self::error::{MessageParseError, ProtocolError};
pub use self::name::{is_valid_name, NameExt};
pub use self::validate::Direction;

#[cfg(feature = "tokio")]
pub use self::client::{connect, connect_with_stream, ClientHandle};
#[cfg(feature = "tokio")]
pub use self::codec::{ClientSideCodec, RelayCodec, ServerSideCodec};
#[cfg(feature = "tokio")]
pub use self::event::Event;
#[cfg(feature = "tokio")]
pub use self::frame::{FrameCodec, MAX_FRAME_LEN};
