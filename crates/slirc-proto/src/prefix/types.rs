//! IRC message prefix types.
//!
//! A prefix identifies the origin of a message: either a user's
//! `nick!user@host` mask or a bare server name.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format

use std::fmt;

/// The origin of a message, split into nick and hostmask.
///
/// Splitting is lenient and never fails. A prefix without `!` (a server
/// name, or a bare nick) yields the same text for both parts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Prefix {
    /// Everything before the first `!`, or the whole prefix.
    pub nick: String,
    /// Everything after the first `!`, or the whole prefix.
    pub hostmask: String,
}

impl Prefix {
    /// Split a raw prefix (without the leading `:`).
    ///
    /// # Example
    ///
    /// ```
    /// use slirc_proto::Prefix;
    ///
    /// let user = Prefix::parse("nick!user@host");
    /// assert_eq!(user.nick, "nick");
    /// assert_eq!(user.hostmask, "user@host");
    ///
    /// let server = Prefix::parse("irc.example.net");
    /// assert_eq!(server.nick, "irc.example.net");
    /// assert_eq!(server.hostmask, "irc.example.net");
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('!') {
            Some((nick, hostmask)) => Self {
                nick: nick.to_owned(),
                hostmask: hostmask.to_owned(),
            },
            None => Self {
                nick: raw.to_owned(),
                hostmask: raw.to_owned(),
            },
        }
    }

    /// True for the absent prefix.
    pub fn is_empty(&self) -> bool {
        self.nick.is_empty() && self.hostmask.is_empty()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nick == self.hostmask {
            f.write_str(&self.nick)
        } else {
            write!(f, "{}!{}", self.nick, self.hostmask)
        }
    }
}
