//! Client core: connection lifecycle, registration and the event loop.
//!
//! ```text
//!  Connecting ──connect──► Registering ──001──► Ready
//!       │                       │                 │
//!       └──────── fatal transport error ──────────┴──► Terminated
//! ```
//!
//! [`Client::run`] opens the transport, sends `USER` and `NICK`, starts the
//! plugin actors and then drives the event loop until the transport fails.
//! Nothing reconnects.

mod event_loop;
mod handle;
mod state;

use slirc_proto::Link;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ClientError;
use crate::plugin::PluginRegistry;

pub use handle::ClientHandle;
pub use state::{ClientState, ConnectionState};

use event_loop::EventLoop;

/// A configured, not yet connected bot.
#[derive(Debug)]
pub struct Client {
    config: Config,
    registry: PluginRegistry,
    state: Arc<ClientState>,
}

impl Client {
    pub fn new(config: Config, registry: PluginRegistry) -> Self {
        let state = Arc::new(ClientState::new(&config.client));
        Self {
            config,
            registry,
            state,
        }
    }

    /// Shared state, readable while the client runs.
    pub fn state(&self) -> Arc<ClientState> {
        Arc::clone(&self.state)
    }

    /// Connect and run until the connection ends.
    ///
    /// Returns `Ok(())` only when the server closes the link after a QUIT
    /// sent through a [`ClientHandle`]. Dropping the future stops the
    /// transport tasks and every plugin actor.
    pub async fn run(self) -> Result<(), ClientError> {
        let connection = self.config.server.connection();
        self.state.set_phase(ConnectionState::Connecting);

        let transport = match connection.connect().await {
            Ok(transport) => transport,
            Err(e) => {
                self.state.set_phase(ConnectionState::Terminated);
                return Err(e.into());
            }
        };

        let link = transport.spawn(connection.idle_timeout());
        self.run_link(link).await
    }

    /// Register and run the event loop over an already established link.
    pub async fn run_link(self, link: Link) -> Result<(), ClientError> {
        let Self {
            config,
            registry,
            state,
        } = self;

        let handle = ClientHandle::new(link.outbound.clone(), Arc::clone(&state));

        state.set_phase(ConnectionState::Registering);
        if let Err(e) = register(&handle) {
            // The event loop reports why the writer is gone
            warn!(error = %e, "Failed to queue registration");
        }

        if registry.is_empty() {
            info!("No plugins registered");
        }
        let dispatcher = registry.start(&handle);
        EventLoop::new(handle, state, dispatcher, config.client.heartbeat())
            .run(link)
            .await
    }
}

/// `USER <nick> <nick> <nick> :<realname>` then `NICK <nick>`.
fn register(handle: &ClientHandle) -> Result<(), ClientError> {
    let nick = handle.nick();
    let realname = format!(":{}", handle.state().realname());
    info!(nick = %nick, "Registering");

    handle.cmd(
        "USER",
        &[nick.as_str(), nick.as_str(), nick.as_str(), realname.as_str()],
    )?;
    handle.set_nick(&nick)
}
