//! Event tracer.

use async_trait::async_trait;
use tracing::{debug, trace};

use super::Plugin;
use crate::client::ClientHandle;
use crate::error::PluginError;
use crate::event::Event;

/// Logs every event it receives. Ticks are logged at `trace`.
#[derive(Debug, Default)]
pub struct TracePlugin {
    seen: u64,
}

impl TracePlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events processed so far, ticks included.
    pub fn seen(&self) -> u64 {
        self.seen
    }
}

#[async_trait]
impl Plugin for TracePlugin {
    fn name(&self) -> &str {
        "trace"
    }

    async fn process(&mut self, event: &Event, _client: &ClientHandle) -> Result<(), PluginError> {
        self.seen += 1;
        if event.is_tick() {
            trace!(at = %event.timestamp, "tick");
        } else {
            debug!(
                seq = self.seen,
                at = %event.timestamp,
                nick = %event.nick,
                hostmask = %event.hostmask,
                command = %event.command,
                args = ?event.args,
                "event"
            );
        }
        Ok(())
    }
}
