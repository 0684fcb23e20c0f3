//! Greeting responder.

use async_trait::async_trait;

use super::Plugin;
use crate::client::ClientHandle;
use crate::error::PluginError;
use crate::event::Event;

/// Answers `hello <nick>` with `Hello <sender>.`
///
/// Replies go to the channel the greeting was sent to, or back to the
/// sender for a private message.
#[derive(Debug, Default)]
pub struct GreetPlugin;

impl GreetPlugin {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Plugin for GreetPlugin {
    fn name(&self) -> &str {
        "greet"
    }

    async fn process(&mut self, event: &Event, client: &ClientHandle) -> Result<(), PluginError> {
        if event.command != "PRIVMSG" || event.nick.is_empty() || event.args.len() < 2 {
            return Ok(());
        }
        let (Some(target), Some(text)) = (event.arg(0), event.trailing()) else {
            return Ok(());
        };

        let nick = client.nick();
        if !is_greeting(text, &nick) {
            return Ok(());
        }

        let reply_to = if target.eq_ignore_ascii_case(&nick) {
            event.nick.as_str()
        } else {
            target
        };
        client.msg(reply_to, &format!("Hello {}.", event.nick))?;
        Ok(())
    }
}

fn is_greeting(text: &str, nick: &str) -> bool {
    text.trim()
        .to_lowercase()
        .strip_prefix("hello ")
        .is_some_and(|rest| rest.trim_start() == nick.to_lowercase())
}
