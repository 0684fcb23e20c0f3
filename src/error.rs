//! Error types for the client core and plugins.
//!
//! Transport failures come from `slirc_proto` as [`ConnectionError`] and are
//! always fatal to the client. Plugin failures never leave the plugin's actor.

use slirc_proto::ConnectionError;
use thiserror::Error;

/// Errors surfaced by the client core.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport failed; the client has stopped.
    #[error("connection failed: {0}")]
    Connection(#[from] ConnectionError),

    /// A command was submitted after the writer task ended.
    #[error("client disconnected")]
    Disconnected,
}

/// Errors a plugin may return from `process`.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("send failed: {0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Failed(String),
}

impl PluginError {
    /// Convenience constructor for ad-hoc failures.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}
