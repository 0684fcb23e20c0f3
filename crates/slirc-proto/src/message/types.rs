//! Owned message type.

use crate::prefix::Prefix;

/// A parsed IRC line.
///
/// `args` keeps the trailing parameter as its last element with the `:`
/// marker removed. Nothing is validated: unknown commands and odd argument
/// counts pass through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    /// Origin nick, or the server name for server-originated lines.
    /// Empty when the line carried no prefix.
    pub nick: String,
    /// Origin hostmask (`user@host`); equals `nick` for prefixes without `!`.
    pub hostmask: String,
    /// Command token as received, e.g. `PRIVMSG`, `001`, `PING`.
    pub command: String,
    /// Parameters in order, trailing parameter last.
    pub args: Vec<String>,
}

impl Message {
    /// Build a prefix-less message.
    pub fn new<C, I, S>(command: C, args: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            nick: String::new(),
            hostmask: String::new(),
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach an origin.
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.nick = prefix.nick;
        self.hostmask = prefix.hostmask;
        self
    }

    /// The origin as a [`Prefix`].
    pub fn prefix(&self) -> Prefix {
        Prefix {
            nick: self.nick.clone(),
            hostmask: self.hostmask.clone(),
        }
    }

    /// Argument at `index`, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Last argument (the trailing parameter when one was sent).
    #[inline]
    pub fn trailing(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }

    /// Origin nick, `None` for prefix-less lines.
    pub fn source_nickname(&self) -> Option<&str> {
        (!self.nick.is_empty()).then_some(self.nick.as_str())
    }

    /// True for three-digit numeric replies.
    pub fn is_numeric(&self) -> bool {
        self.command.len() == 3 && self.command.bytes().all(|b| b.is_ascii_digit())
    }

    /// True when the line had no command token (only a prefix or blanks).
    pub fn is_malformed(&self) -> bool {
        self.command.is_empty()
    }
}
