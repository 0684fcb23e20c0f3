//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.host is required")]
    EmptyHost,
    #[error("server.port must not be 0")]
    ZeroPort,
    #[error("{field} is not a usable nickname: '{nick}'")]
    InvalidNick { field: &'static str, nick: String },
    #[error("client.channels contains an invalid channel name: '{0}'")]
    InvalidChannel(String),
    #[error("client.heartbeat_secs must be at least 1")]
    ZeroHeartbeat,
    #[error("client.plugin_queue must be at least 1")]
    ZeroPluginQueue,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.server.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    let client = &config.client;
    if !is_valid_nick(&client.nick) {
        errors.push(ValidationError::InvalidNick {
            field: "client.nick",
            nick: client.nick.clone(),
        });
    }
    if let Some(ref alt) = client.alt_nick
        && !is_valid_nick(alt)
    {
        errors.push(ValidationError::InvalidNick {
            field: "client.alt_nick",
            nick: alt.clone(),
        });
    }

    for channel in &client.channels {
        if !is_valid_channel(channel) {
            errors.push(ValidationError::InvalidChannel(channel.clone()));
        }
    }

    if client.heartbeat_secs == Some(0) {
        errors.push(ValidationError::ZeroHeartbeat);
    }
    if client.plugin_queue == Some(0) {
        errors.push(ValidationError::ZeroPluginQueue);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A nickname must survive being sent as a single middle parameter.
fn is_valid_nick(nick: &str) -> bool {
    !nick.is_empty()
        && !nick.contains(char::is_whitespace)
        && !nick.starts_with(':')
        && !nick.starts_with('#')
}

/// JOIN takes a comma-separated list, so one entry may not contain a comma.
fn is_valid_channel(channel: &str) -> bool {
    !channel.is_empty() && !channel.contains(char::is_whitespace) && !channel.contains(',')
}
