//! Bot under test.
//!
//! Runs a real [`Client`] against a [`TestServer`](super::TestServer) port,
//! with a recording plugin registered last so tests can see what the
//! plugins were given.

use async_trait::async_trait;
use slirc_bot::{
    Client, ClientError, ClientHandle, ClientState, Config, Event, Plugin, PluginError,
    PluginRegistry,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Forwards every event it receives to the test.
pub struct Recorder {
    events: mpsc::UnboundedSender<Event>,
}

#[async_trait]
impl Plugin for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    async fn process(&mut self, event: &Event, _client: &ClientHandle) -> Result<(), PluginError> {
        let _ = self.events.send(event.clone());
        Ok(())
    }
}

/// A running bot.
pub struct TestBot {
    pub state: Arc<ClientState>,
    events: mpsc::UnboundedReceiver<Event>,
    task: JoinHandle<Result<(), ClientError>>,
}

impl TestBot {
    /// Config pointing at `port`, plain TCP, with extra `[client]` keys.
    pub fn config(port: u16, client_toml: &str) -> Config {
        let toml = format!(
            r#"
[server]
host = "127.0.0.1"
port = {port}
tls = false

[client]
{client_toml}
"#
        );
        Config::from_toml(&toml).expect("test config")
    }

    /// Start a bot with only the recorder plugin.
    pub fn spawn(config: Config) -> Self {
        Self::spawn_with(config, PluginRegistry::new())
    }

    /// Start a bot with `registry`, plus the recorder appended.
    pub fn spawn_with(config: Config, mut registry: PluginRegistry) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        registry.register(Recorder { events: tx });

        let client = Client::new(config, registry);
        let state = client.state();
        let task = tokio::spawn(client.run());
        Self {
            state,
            events,
            task,
        }
    }

    /// Next event delivered to the recorder.
    pub async fn next_event(&mut self) -> anyhow::Result<Event> {
        timeout(Duration::from_secs(5), self.events.recv())
            .await?
            .ok_or_else(|| anyhow::anyhow!("recorder stopped"))
    }

    /// Skip events until one with `command` arrives.
    pub async fn event_with_command(&mut self, command: &str) -> anyhow::Result<Event> {
        loop {
            let event = self.next_event().await?;
            if event.command == command {
                return Ok(event);
            }
        }
    }

    /// Wait for `Client::run` to return.
    pub async fn finished(self) -> anyhow::Result<Result<(), ClientError>> {
        Ok(timeout(Duration::from_secs(5), self.task).await??)
    }
}
