//! Events dispatched to plugins.

use chrono::{DateTime, Utc};
use slirc_proto::Message;
use std::ops::Deref;

/// One parsed server line, stamped with the time it was dequeued.
///
/// Shared with every plugin as `Arc<Event>`; never mutated after creation.
/// Derefs to the inner [`Message`], so `event.command` and `event.args` read
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub message: Message,
    pub timestamp: DateTime<Utc>,
    tick: bool,
}

impl Event {
    pub fn new(message: Message, timestamp: DateTime<Utc>) -> Self {
        Self {
            message,
            timestamp,
            tick: false,
        }
    }

    /// The empty event broadcast when the heartbeat fires with no line.
    pub fn tick(timestamp: DateTime<Utc>) -> Self {
        Self {
            message: Message::default(),
            timestamp,
            tick: true,
        }
    }

    /// Whether this is a heartbeat tick rather than a server line.
    pub fn is_tick(&self) -> bool {
        self.tick
    }
}

impl Deref for Event {
    type Target = Message;

    fn deref(&self) -> &Message {
        &self.message
    }
}
