//! Core configuration types and loading.

use serde::Deserialize;
use slirc_proto::{Connection, Security};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::{default_idle_timeout_secs, default_port, default_realname, default_true};
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server to connect to.
    pub server: ServerConfig,
    /// Identity and channels.
    pub client: ClientConfig,
    /// Built-in plugin toggles.
    #[serde(default)]
    pub plugins: PluginsConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the semantic rules serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self).map_err(ConfigError::Invalid)
    }
}

/// Server endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host name or address (e.g., "irc.rizon.net"). Also the TLS server name.
    pub host: String,
    /// Port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Wrap the connection in TLS.
    #[serde(default)]
    pub tls: bool,
    /// Seconds without inbound data before the link is declared dead (default: 300).
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

impl ServerConfig {
    /// Idle timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Connection parameters for the transport.
    pub fn connection(&self) -> Connection {
        Connection::new(self.host.clone(), self.port, Security::from_flag(self.tls))
            .with_idle_timeout(self.idle_timeout())
    }
}

/// Client identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Preferred nickname.
    pub nick: String,
    /// Nickname to try first when the preferred one is taken.
    #[serde(default)]
    pub alt_nick: Option<String>,
    /// Real name sent with USER.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Channels joined after registration, in order.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Broadcast a tick to plugins after this many idle seconds. Off when unset.
    #[serde(default)]
    pub heartbeat_secs: Option<u64>,
    /// Per-plugin mailbox capacity. Unbounded when unset.
    #[serde(default)]
    pub plugin_queue: Option<usize>,
}

impl ClientConfig {
    /// Heartbeat period, if enabled.
    pub fn heartbeat(&self) -> Option<Duration> {
        self.heartbeat_secs.map(Duration::from_secs)
    }
}

/// Built-in plugin toggles.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginsConfig {
    #[serde(default)]
    pub greet: GreetConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

/// Greeting responder (enabled by default).
#[derive(Debug, Clone, Deserialize)]
pub struct GreetConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for GreetConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Event tracer (disabled by default).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceConfig {
    #[serde(default)]
    pub enabled: bool,
}
