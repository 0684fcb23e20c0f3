//! Send API shared by the event loop and every plugin.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use super::ClientState;
use crate::error::ClientError;

/// Cloneable handle for submitting commands and reading client state.
///
/// Commands are queued on the writer's channel and go out in submission
/// order. The transport strips anything after an embedded line break and
/// truncates to 500 bytes; no other escaping is done.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    outbound: mpsc::UnboundedSender<String>,
    state: Arc<ClientState>,
}

impl ClientHandle {
    pub fn new(outbound: mpsc::UnboundedSender<String>, state: Arc<ClientState>) -> Self {
        Self { outbound, state }
    }

    /// Current nickname. May be stale by the time it is used.
    pub fn nick(&self) -> String {
        self.state.nick()
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Queue a preformatted line.
    pub fn send_raw(&self, line: impl Into<String>) -> Result<(), ClientError> {
        let line = line.into();
        debug!(line = %line, "->");
        self.outbound
            .send(line)
            .map_err(|_| ClientError::Disconnected)
    }

    /// Send `command` followed by `args` joined with single spaces.
    pub fn cmd<S: AsRef<str>>(&self, command: &str, args: &[S]) -> Result<(), ClientError> {
        self.send_raw(format_command(command, args))
    }

    /// Like [`cmd`](Self::cmd) with `prefix` prepended verbatim (include the
    /// leading `:` and the separating space).
    pub fn cmd_with_prefix<S: AsRef<str>>(
        &self,
        prefix: &str,
        command: &str,
        args: &[S],
    ) -> Result<(), ClientError> {
        self.send_raw(format!("{prefix}{}", format_command(command, args)))
    }

    /// `PRIVMSG <target> :<text>`
    pub fn msg(&self, target: &str, text: &str) -> Result<(), ClientError> {
        self.send_raw(format!("PRIVMSG {target} :{text}"))
    }

    /// Message the nick part of a `nick!user@host` origin.
    pub fn reply(&self, prefix: &str, text: &str) -> Result<(), ClientError> {
        let nick = prefix.split_once('!').map_or(prefix, |(nick, _)| nick);
        self.msg(nick, text)
    }

    pub fn join(&self, channel: &str) -> Result<(), ClientError> {
        self.cmd("JOIN", &[channel])
    }

    /// Request a nickname. Client state follows only what the server accepts.
    pub fn set_nick(&self, nick: &str) -> Result<(), ClientError> {
        self.cmd("NICK", &[nick])
    }

    /// Send QUIT. The server closing the link afterwards ends the client cleanly.
    pub fn quit(&self, reason: Option<&str>) -> Result<(), ClientError> {
        self.state.mark_quitting();
        match reason {
            Some(reason) => self.send_raw(format!("QUIT :{reason}")),
            None => self.send_raw("QUIT"),
        }
    }
}

fn format_command<S: AsRef<str>>(command: &str, args: &[S]) -> String {
    let mut line = String::from(command);
    for arg in args {
        line.push(' ');
        line.push_str(arg.as_ref());
    }
    line
}
