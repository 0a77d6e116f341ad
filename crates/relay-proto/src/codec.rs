//! Typed relay codec for tokio.
//!
//! Wraps [`FrameCodec`] and parses each frame into a command of the
//! incoming direction; anything implementing `Display` can be sent.

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::command::{ClientCommand, ServerCommand};
use crate::error::{self, MessageParseError, ProtocolError};
use crate::frame::FrameCodec;

/// Tokio codec decoding commands of type `In`.
///
/// Each decoded item is itself a `Result`: a malformed message is an
/// `Err(MessageParseError)` item, not a stream error.
pub struct RelayCodec<In> {
    inner: FrameCodec,
    _incoming: PhantomData<fn() -> In>,
}

/// Codec used by a server: reads client commands.
pub type ServerSideCodec = RelayCodec<ClientCommand>;

/// Codec used by a client: reads server commands.
pub type ClientSideCodec = RelayCodec<ServerCommand>;

impl<In> RelayCodec<In> {
    /// Create a codec with the default frame limit.
    pub fn new() -> Self {
        Self::from_frame_codec(FrameCodec::new())
    }

    /// Create a codec with a custom maximum payload length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self::from_frame_codec(FrameCodec::with_max_len(max_len))
    }

    fn from_frame_codec(inner: FrameCodec) -> Self {
        Self {
            inner,
            _incoming: PhantomData,
        }
    }
}

impl<In> Default for RelayCodec<In> {
    fn default() -> Self {
        Self::new()
    }
}

impl<In> Decoder for RelayCodec<In>
where
    In: FromStr<Err = MessageParseError>,
{
    type Item = Result<In, MessageParseError>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        Ok(self
            .inner
            .decode(src)?
            .map(|frame| frame.and_then(|text| text.parse())))
    }
}

impl<In, Out> Encoder<Out> for RelayCodec<In>
where
    Out: Display,
{
    type Error = ProtocolError;

    fn encode(&mut self, msg: Out, dst: &mut BytesMut) -> error::Result<()> {
        Encoder::<String>::encode(&mut self.inner, msg.to_string(), dst)
    }
}
