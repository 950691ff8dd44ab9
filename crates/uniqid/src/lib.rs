//! # `uniqid`: Client for UDP Unique-ID Agents
//!
//! `uniqid` talks to a pool of agents that hand out shard labels and
//! per-period sequence numbers over UDP, and turns their answers into
//! 64-bit [`UniqueId`]s stamped with a caller tag and the local calendar
//! hour.
//!
//! ## Highlights
//!
//! - **Fixed wire format**: one 24-byte big-endian record per datagram, see
//!   [`message`].
//! - **Echo correlation**: every request carries a fresh token; replies that
//!   do not echo it are discarded, so late duplicates of a retried request
//!   are never mistaken for the answer to the next one.
//! - **Bounded retries**: timeouts and socket errors are retried against a
//!   freshly picked agent; explicit agent errors are not.
//! - **Bit-exact IDs**: explicit shift/mask packing with compile-time checked
//!   widths.
//!
//! ## Example
//!
//! ```no_run
//! use std::time::Duration;
//! use uniqid::{ClientConfig, UniqIdClient};
//!
//! let config = ClientConfig::new("10.0.0.1:6200,10.0.0.2:6200", Duration::from_millis(100), 3)?;
//! let client = UniqIdClient::connect(&config)?;
//!
//! let (label, seq) = client.get_label_and_sequence()?;
//! let id = client.get_unique_id(7, 0)?;
//! println!("{label} {seq} {id:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `tracing`: spans on every request and events for retries and stale
//!   replies.
//! - `parking-lot`: use `parking_lot::Mutex` (no lock poisoning).
//! - `serde`: `Serialize`/`Deserialize` for [`UniqueId`] as its raw `u64`.

mod client;
mod composer;
mod config;
mod endpoint;
mod error;
mod id;
pub mod message;
mod mutex;
mod rand;
mod requester;
mod selector;
mod time;
pub mod transport;

pub use crate::client::*;
pub use crate::composer::*;
pub use crate::config::*;
pub use crate::endpoint::*;
pub use crate::error::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::requester::*;
pub use crate::selector::*;
pub use crate::time::*;
pub use crate::transport::Transport;
