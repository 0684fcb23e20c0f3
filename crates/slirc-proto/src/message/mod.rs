//! IRC message types and parsing.

mod parse;
mod types;

pub use self::types::Message;
