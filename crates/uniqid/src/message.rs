//! Fixed-size wire format shared with the agents.
//!
//! Every datagram, request or response, is one 24-byte record with all
//! integers in network (big-endian) order:
//!
//! ```text
//!  Byte:     0      2      4          8                16               24
//!            +------+------+----------+----------------+----------------+
//!  Field:    | len  | kind |   echo   |     value1     |     value2     |
//!            | (16) | (16) |   (32)   |      (64)      |      (64)      |
//!            +------+------+----------+----------------+----------------+
//! ```
//!
//! `len` is always [`MESSAGE_SIZE`]. There are no variable-length fields, so
//! both directions encode and decode without allocating.

use crate::DecodeError;
use bytes::{Buf, BufMut};

/// Encoded size of every message in bytes.
pub const MESSAGE_SIZE: usize = 24;

/// Buffer holding exactly one encoded message.
pub type MessageBuf = [u8; MESSAGE_SIZE];

/// Message type codes understood by the agents.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum MessageKind {
    RequestLabel = 1,
    ResponseLabel = 2,
    RequestUniqSeq = 3,
    ResponseUniqSeq = 4,
    RequestUniqId = 5,
    ResponseUniqId = 6,
    RequestLabelAndSeq = 7,
    ResponseLabelAndSeq = 8,
    /// The agent refused or failed the request; `value1` carries its code.
    ResponseError = 9,
}

impl MessageKind {
    pub const fn code(self) -> u16 {
        self as u16
    }

    pub const fn is_request(self) -> bool {
        matches!(
            self,
            Self::RequestLabel
                | Self::RequestUniqSeq
                | Self::RequestUniqId
                | Self::RequestLabelAndSeq
        )
    }

    pub const fn is_error(self) -> bool {
        matches!(self, Self::ResponseError)
    }

    /// The response kind an agent answers this request with. Response kinds
    /// map to themselves.
    pub const fn response_for(self) -> Self {
        match self {
            Self::RequestLabel => Self::ResponseLabel,
            Self::RequestUniqSeq => Self::ResponseUniqSeq,
            Self::RequestUniqId => Self::ResponseUniqId,
            Self::RequestLabelAndSeq => Self::ResponseLabelAndSeq,
            response => response,
        }
    }
}

impl TryFrom<u16> for MessageKind {
    type Error = DecodeError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => Self::RequestLabel,
            2 => Self::ResponseLabel,
            3 => Self::RequestUniqSeq,
            4 => Self::ResponseUniqSeq,
            5 => Self::RequestUniqId,
            6 => Self::ResponseUniqId,
            7 => Self::RequestLabelAndSeq,
            8 => Self::ResponseLabelAndSeq,
            9 => Self::ResponseError,
            other => return Err(DecodeError::UnknownKind(other)),
        })
    }
}

/// A decoded wire message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub echo: u32,
    pub value1: u64,
    pub value2: u64,
}

impl Message {
    pub const fn new(kind: MessageKind, echo: u32, value1: u64, value2: u64) -> Self {
        Self {
            kind,
            echo,
            value1,
            value2,
        }
    }

    /// Encodes this message into its fixed wire representation.
    pub fn encode(&self) -> MessageBuf {
        encode(self.kind, self.echo, self.value1, self.value2)
    }
}

/// Encodes a message into a fresh fixed-size buffer.
pub fn encode(kind: MessageKind, echo: u32, value1: u64, value2: u64) -> MessageBuf {
    let mut buf = [0u8; MESSAGE_SIZE];
    let mut out = &mut buf[..];
    out.put_u16(MESSAGE_SIZE as u16);
    out.put_u16(kind.code());
    out.put_u32(echo);
    out.put_u64(value1);
    out.put_u64(value2);
    debug_assert!(out.is_empty());
    buf
}

/// Decodes one message, rejecting anything that is not exactly
/// [`MESSAGE_SIZE`] bytes long.
///
/// # Errors
///
/// - [`DecodeError::InvalidSize`] if `bytes.len() != MESSAGE_SIZE`
/// - [`DecodeError::InvalidLength`] if the embedded length disagrees
/// - [`DecodeError::UnknownKind`] for an unrecognized type code
pub fn decode(bytes: &[u8]) -> Result<Message, DecodeError> {
    if bytes.len() != MESSAGE_SIZE {
        return Err(DecodeError::InvalidSize {
            expected: MESSAGE_SIZE,
            actual: bytes.len(),
        });
    }

    let mut buf = bytes;
    let len = buf.get_u16();
    if len as usize != MESSAGE_SIZE {
        return Err(DecodeError::InvalidLength {
            len,
            expected: MESSAGE_SIZE as u16,
        });
    }
    let kind = MessageKind::try_from(buf.get_u16())?;
    let echo = buf.get_u32();
    let value1 = buf.get_u64();
    let value2 = buf.get_u64();

    Ok(Message {
        kind,
        echo,
        value1,
        value2,
    })
}
