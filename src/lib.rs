//! slirc-bot - Straylight IRC bot.
//!
//! A minimal IRC client: one connection, a handshake state machine, and a
//! set of plugin actors that each receive every server event on their own
//! queue.
//!
//! ```no_run
//! use slirc_bot::{Client, Config, PluginRegistry};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::load("config.toml")?;
//! let registry = PluginRegistry::from_config(&config);
//! Client::new(config, registry).run().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod plugin;

pub use client::{Client, ClientHandle, ClientState, ConnectionState};
pub use config::{Config, ConfigError};
pub use error::{ClientError, PluginError};
pub use event::Event;
pub use plugin::{Plugin, PluginRegistry};
