//! Message origin (prefix) decomposition.

mod types;

pub use self::types::Prefix;
