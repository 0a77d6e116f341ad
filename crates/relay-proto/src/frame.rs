//! Length-prefixed frame codec for tokio.
//!
//! Every message travels as a 2-byte big-endian length followed by that many
//! bytes of UTF-8 text, so one read yields exactly one logical message
//! regardless of how TCP segments the stream.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{self, MessageParseError, ProtocolError};

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_LEN: usize = 2;

/// Largest payload a frame can carry.
pub const MAX_FRAME_LEN: usize = u16::MAX as usize;

/// Frame codec that yields one text payload per frame.
///
/// Bad frames do not poison the stream: a payload that is not UTF-8, or one
/// whose declared length exceeds the configured maximum, is reported as an
/// `Err` item and reading continues with the next frame. Only I/O failures
/// surface as decoder errors.
#[derive(Debug, Clone)]
pub struct FrameCodec {
    /// Maximum accepted payload length.
    max_len: usize,
    /// Bytes still to discard from an oversized frame.
    skip: usize,
}

impl FrameCodec {
    /// Create a codec accepting payloads up to [`MAX_FRAME_LEN`].
    pub fn new() -> Self {
        Self::with_max_len(MAX_FRAME_LEN)
    }

    /// Create a codec with a custom maximum payload length.
    ///
    /// Values above [`MAX_FRAME_LEN`] are clamped to it.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len: max_len.min(MAX_FRAME_LEN),
            skip: 0,
        }
    }

    /// Maximum accepted payload length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Discard as much of a pending oversized frame as is buffered.
    fn discard(&mut self, src: &mut BytesMut) {
        let n = self.skip.min(src.len());
        src.advance(n);
        self.skip -= n;
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = Result<String, MessageParseError>;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Self::Item>> {
        if self.skip > 0 {
            self.discard(src);
            if self.skip > 0 {
                return Ok(None);
            }
        }

        if src.len() < LENGTH_PREFIX_LEN {
            return Ok(None);
        }

        let len = usize::from(u16::from_be_bytes([src[0], src[1]]));
        if len > self.max_len {
            src.advance(LENGTH_PREFIX_LEN);
            self.skip = len;
            self.discard(src);
            return Ok(Some(Err(MessageParseError::FrameTooLong {
                actual: len,
                limit: self.max_len,
            })));
        }

        let frame_len = LENGTH_PREFIX_LEN + len;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        src.advance(LENGTH_PREFIX_LEN);
        let payload = src.split_to(len);
        Ok(Some(match std::str::from_utf8(&payload) {
            Ok(text) => Ok(text.to_owned()),
            Err(e) => Err(MessageParseError::InvalidUtf8 {
                byte_pos: e.valid_up_to(),
            }),
        }))
    }
}

impl Encoder<String> for FrameCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        Encoder::<&str>::encode(self, msg.as_str(), dst)
    }
}

impl Encoder<&str> for FrameCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: &str, dst: &mut BytesMut) -> error::Result<()> {
        let len = msg.len();
        let prefix = u16::try_from(len).map_err(|_| ProtocolError::MessageTooLong {
            actual: len,
            limit: MAX_FRAME_LEN,
        })?;

        dst.reserve(LENGTH_PREFIX_LEN + len);
        dst.put_u16(prefix);
        dst.extend_from_slice(msg.as_bytes());
        Ok(())
    }
}
