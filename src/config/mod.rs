//! Configuration loading and management.
//!
//! - [`types`]: the config structs and [`Config::load`]
//! - [`validation`]: semantic checks run after parsing
//! - [`defaults`]: serde default functions

mod defaults;
mod types;
mod validation;

pub use types::{
    ClientConfig, Config, ConfigError, GreetConfig, PluginsConfig, ServerConfig, TraceConfig,
};
pub use validation::ValidationError;
