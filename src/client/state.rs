//! Shared client state.
//!
//! The event loop is the only writer. Plugins read through
//! [`ClientHandle`](super::ClientHandle) and must tolerate staleness: the
//! nickname may change between a read and the command built from it.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ClientConfig;

/// Connection phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Opening the socket.
    Connecting,
    /// USER/NICK sent, waiting for 001.
    Registering,
    /// Welcomed by the server; channels joined.
    Ready,
    /// The connection is gone.
    Terminated,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Connecting => "connecting",
            Self::Registering => "registering",
            Self::Ready => "ready",
            Self::Terminated => "terminated",
        };
        f.write_str(s)
    }
}

/// Identity and phase of the running client.
#[derive(Debug)]
pub struct ClientState {
    nick: RwLock<String>,
    alt_nick: Option<String>,
    realname: String,
    channels: Vec<String>,
    phase: RwLock<ConnectionState>,
    last_activity: RwLock<Option<DateTime<Utc>>>,
    quitting: AtomicBool,
}

impl ClientState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            nick: RwLock::new(config.nick.clone()),
            alt_nick: config.alt_nick.clone(),
            realname: config.realname.clone(),
            channels: config.channels.clone(),
            phase: RwLock::new(ConnectionState::Connecting),
            last_activity: RwLock::new(None),
            quitting: AtomicBool::new(false),
        }
    }

    /// Current nickname.
    pub fn nick(&self) -> String {
        self.nick.read().clone()
    }

    /// Whether `nick` is exactly the current nickname.
    pub fn is_current_nick(&self, nick: &str) -> bool {
        *self.nick.read() == nick
    }

    pub fn alt_nick(&self) -> Option<&str> {
        self.alt_nick.as_deref()
    }

    pub fn realname(&self) -> &str {
        &self.realname
    }

    /// Channels to join after registration, in order.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn phase(&self) -> ConnectionState {
        *self.phase.read()
    }

    /// Dequeue time of the last inbound line.
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        *self.last_activity.read()
    }

    /// Whether a QUIT has been sent.
    pub fn is_quitting(&self) -> bool {
        self.quitting.load(Ordering::Acquire)
    }

    pub(crate) fn set_nick(&self, nick: String) {
        *self.nick.write() = nick;
    }

    pub(crate) fn set_phase(&self, phase: ConnectionState) {
        *self.phase.write() = phase;
    }

    pub(crate) fn touch(&self, at: DateTime<Utc>) {
        *self.last_activity.write() = Some(at);
    }

    pub(crate) fn mark_quitting(&self) {
        self.quitting.store(true, Ordering::Release);
    }
}
