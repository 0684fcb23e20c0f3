//! Integration test common infrastructure.
//!
//! Provides an in-process fake IRC server and a wrapper that runs the bot
//! against it.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestBot;
#[allow(unused_imports)]
pub use server::{ServerConn, TestServer};
