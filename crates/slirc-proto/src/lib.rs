//! # slirc-proto
//!
//! Line framing, message parsing and the client-side transport used by
//! `slirc-bot`.
//!
//! ## Features
//!
//! - Structural IRC message parsing (`[:prefix ]command[ param]*[ :trailing]`)
//! - A `\r\n` line codec for `tokio_util` framed I/O with outbound sanitizing
//! - Plain TCP and client TLS connections split into reader/writer tasks
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_proto::Message;
//!
//! let msg: Message = ":nick!user@host PRIVMSG #chan :hello world".parse().unwrap();
//! assert_eq!(msg.nick, "nick");
//! assert_eq!(msg.hostmask, "user@host");
//! assert_eq!(msg.command, "PRIVMSG");
//! assert_eq!(msg.args, vec!["#chan", "hello world"]);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod prefix;
#[cfg(feature = "tokio")]
pub mod transport;
pub mod util;

pub use self::error::ProtocolError;
#[cfg(feature = "tokio")]
pub use self::line::{LineCodec, MAX_IRC_LINE_LEN, MAX_OUTBOUND_PAYLOAD};
pub use self::message::Message;
pub use self::prefix::Prefix;
#[cfg(feature = "tokio")]
pub use self::transport::{
    Connection, ConnectionError, Link, LinkTasks, Security, Transport, DEFAULT_IDLE_TIMEOUT,
};
pub use self::util::{join_params, needs_colon_prefix, truncate_utf8_safe};
