use crate::message::MessageKind;
use std::io;

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `uniqid` can emit to callers.
///
/// Configuration errors are raised at construction. Transport failures are
/// absorbed by the retry loop and only surface once the attempt budget is
/// spent. Agent errors are authoritative and surface immediately.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The client configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Every attempt was spent and the last failure was at the transport
    /// level (timeout, socket error, short send, garbled datagram).
    #[error("transport failure after {attempts} attempt(s): {source}")]
    Transport {
        attempts: u8,
        #[source]
        source: TransportError,
    },

    /// The local UDP socket could not be bound.
    #[error("failed to bind UDP socket: {0}")]
    Bind(#[source] io::Error),

    /// The agent answered with an explicit error response.
    ///
    /// This is never retried.
    #[error("agent returned error code {code}")]
    Agent { code: u64 },

    /// Every attempt was spent without a transport failure and without a
    /// reply carrying our echo token.
    #[error("no matching response after {attempts} attempt(s)")]
    NoResponse { attempts: u8 },

    /// The epoch seconds cannot be represented as a local calendar time.
    #[error("timestamp {seconds} is out of range")]
    InvalidTimestamp { seconds: u64 },

    /// The operation failed because the transport lock was **poisoned**.
    ///
    /// When the `parking-lot` feature is enabled, mutexes do **not** poison,
    /// so this variant is not available.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("transport lock poisoned")]
    LockPoisoned,
}

/// Reasons a client configuration is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("agent list is empty")]
    NoAgents,

    #[error("empty agent entry at position {index}")]
    EmptyEntry { index: usize },

    #[error("agent entry `{entry}` is not of the form ip:port")]
    MissingPort { entry: String },

    #[error("invalid IP in agent entry `{entry}`")]
    InvalidIp { entry: String },

    #[error("invalid port in agent entry `{entry}`")]
    InvalidPort { entry: String },

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
}

/// Failure of a single request attempt at the transport level.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error("short send: {sent} of {expected} bytes")]
    ShortSend { sent: usize, expected: usize },

    #[error("timed out waiting for a response")]
    Timeout,

    /// A reply carried our echo but answers a different request type.
    #[error("expected a {expected:?} reply, got {actual:?}")]
    UnexpectedKind {
        expected: MessageKind,
        actual: MessageKind,
    },

    #[error("undecodable datagram: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for TransportError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            // Platforms disagree on which kind a read timeout reports.
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => Self::Timeout,
            _ => Self::Io(err),
        }
    }
}

/// Errors produced while decoding a wire message.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("expected {expected} bytes, got {actual}")]
    InvalidSize { expected: usize, actual: usize },

    #[error("header length field is {len}, expected {expected}")]
    InvalidLength { len: u16, expected: u16 },

    #[error("unknown message type {0}")]
    UnknownKind(u16),
}

#[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
#[cfg(not(feature = "parking-lot"))]
use crate::mutex::{MutexGuard, PoisonError};
#[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
