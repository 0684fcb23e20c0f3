//! Plugin actors.
//!
//! Every plugin runs on its own task and owns its own queue. The event loop
//! delivers each event to every mailbox in registration order, so each
//! plugin sees the global arrival order; nothing orders side effects across
//! plugins.
//!
//! # Fault isolation
//!
//! An `Err` from [`Plugin::process`] or a panic inside it is logged with the
//! plugin name and the event's command, and the actor moves on to the next
//! event. Neither reaches the event loop or any other plugin.

mod greet;
pub mod mailbox;
mod trace;

use async_trait::async_trait;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::client::ClientHandle;
use crate::config::Config;
use crate::error::PluginError;
use crate::event::Event;

pub use greet::GreetPlugin;
pub use mailbox::{Inbox, Mailbox};
pub use trace::TracePlugin;

/// A unit of bot behaviour driven by server events.
#[async_trait]
pub trait Plugin: Send {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Handle one event. Called once per event, in delivery order.
    ///
    /// Must not block indefinitely: doing so stalls this plugin's queue.
    async fn process(&mut self, event: &Event, client: &ClientHandle) -> Result<(), PluginError>;
}

/// The static set of plugins, built once at startup.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
    queue_capacity: Option<usize>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the built-in plugins enabled in `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new().with_queue_capacity(config.client.plugin_queue);
        if config.plugins.greet.enabled {
            registry.register(GreetPlugin::new());
        }
        if config.plugins.trace.enabled {
            registry.register(TracePlugin::new());
        }
        registry
    }

    /// Bound every mailbox to `capacity` events. `None` keeps them unbounded.
    pub fn with_queue_capacity(mut self, capacity: Option<usize>) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn register(&mut self, plugin: impl Plugin + 'static) -> &mut Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn register_boxed(&mut self, plugin: Box<dyn Plugin>) -> &mut Self {
        self.plugins.push(plugin);
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Spawn one actor per plugin and return their mailboxes.
    pub fn start(self, client: &ClientHandle) -> Dispatcher {
        let mut tasks = JoinSet::new();
        let mut mailboxes = Vec::with_capacity(self.plugins.len());

        for plugin in self.plugins {
            let (mailbox, inbox) = mailbox::channel(plugin.name(), self.queue_capacity);
            info!(plugin = %plugin.name(), "Starting plugin");
            tasks.spawn(run_actor(plugin, inbox, client.clone()));
            mailboxes.push(mailbox);
        }

        Dispatcher { mailboxes, tasks }
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .field("queue_capacity", &self.queue_capacity)
            .finish()
    }
}

/// Running plugin actors. Dropping it aborts them all.
#[derive(Debug)]
pub struct Dispatcher {
    mailboxes: Vec<Mailbox>,
    tasks: JoinSet<()>,
}

impl Dispatcher {
    /// Deliver `event` to every mailbox in registration order.
    pub fn broadcast(&mut self, event: Arc<Event>) {
        for mailbox in &mut self.mailboxes {
            if !mailbox.deliver(Arc::clone(&event)) {
                debug!(plugin = %mailbox.plugin(), "Plugin actor gone, event not delivered");
            }
        }
    }

    pub fn mailboxes(&self) -> &[Mailbox] {
        &self.mailboxes
    }

    /// Abort every actor, reporting any events lost to full queues.
    pub fn shutdown(&mut self) {
        for mailbox in &self.mailboxes {
            if mailbox.dropped() > 0 {
                warn!(
                    plugin = %mailbox.plugin(),
                    dropped = mailbox.dropped(),
                    "Plugin queue overflowed during this connection"
                );
            }
        }
        self.tasks.abort_all();
    }
}

/// Actor loop: process events until the mailbox closes.
async fn run_actor(mut plugin: Box<dyn Plugin>, mut inbox: Inbox, client: ClientHandle) {
    let name = plugin.name().to_string();

    while let Some(event) = inbox.recv().await {
        let outcome = AssertUnwindSafe(plugin.process(&event, &client))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(plugin = %name, command = %event.command, error = %e, "Plugin failed");
            }
            Err(panic) => {
                error!(
                    plugin = %name,
                    command = %event.command,
                    panic = %panic_message(panic.as_ref()),
                    "Plugin panicked"
                );
            }
        }
    }

    debug!(plugin = %name, "Mailbox closed, plugin exiting");
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
