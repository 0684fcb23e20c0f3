//! Message parsing implementation.
//!
//! Grammar: `[:prefix ]command[ param]*[ :trailing]`. The trailing marker is
//! the first ` :` after the prefix; everything behind it is kept verbatim.

use std::str::FromStr;

use crate::error::ProtocolError;
use crate::prefix::Prefix;

use super::types::Message;

impl Message {
    /// Parse one protocol line (terminator already removed).
    ///
    /// The only rejected input is the empty line. A line without a command
    /// token parses with an empty `command`; see [`Message::is_malformed`].
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        if line.is_empty() {
            return Err(ProtocolError::EmptyLine);
        }

        let (prefix, rest) = match line.strip_prefix(':') {
            Some(stripped) => stripped.split_once(' ').unwrap_or((stripped, "")),
            None => ("", line),
        };

        let mut args: Vec<String> = match rest.split_once(" :") {
            Some((middle, trailing)) => middle
                .split_whitespace()
                .map(str::to_owned)
                .chain(std::iter::once(trailing.to_owned()))
                .collect(),
            None => rest.split_whitespace().map(str::to_owned).collect(),
        };

        let command = if args.is_empty() {
            String::new()
        } else {
            args.remove(0)
        };

        let Prefix { nick, hostmask } = Prefix::parse(prefix);

        Ok(Message {
            nick,
            hostmask,
            command,
            args,
        })
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        Message::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_privmsg_with_prefix() {
        let msg: Message = ":nick!user@host PRIVMSG #chan :hello world".parse().unwrap();
        assert_eq!(msg.nick, "nick");
        assert_eq!(msg.hostmask, "user@host");
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.args, vec!["#chan", "hello world"]);
    }

    #[test]
    fn test_parse_ping_without_prefix() {
        let msg = Message::parse("PING :server.example").unwrap();
        assert_eq!(msg.nick, "");
        assert_eq!(msg.hostmask, "");
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.args, vec!["server.example"]);
    }

    #[test]
    fn test_parse_server_prefix() {
        let msg = Message::parse(":irc.example.net 001 bot :Welcome to the network").unwrap();
        assert_eq!(msg.nick, "irc.example.net");
        assert_eq!(msg.hostmask, "irc.example.net");
        assert_eq!(msg.command, "001");
        assert_eq!(msg.args, vec!["bot", "Welcome to the network"]);
    }

    #[test]
    fn test_parse_bare_numeric() {
        let msg = Message::parse("433").unwrap();
        assert_eq!(msg.command, "433");
        assert!(msg.args.is_empty());
    }

    #[test]
    fn test_parse_no_trailing() {
        let msg = Message::parse(":a!b@c MODE #chan +o  someone").unwrap();
        assert_eq!(msg.command, "MODE");
        assert_eq!(msg.args, vec!["#chan", "+o", "someone"]);
    }

    #[test]
    fn test_trailing_kept_verbatim() {
        let msg = Message::parse("PRIVMSG #c :  spaced :colon  ").unwrap();
        assert_eq!(msg.args, vec!["#c", "  spaced :colon  "]);
    }

    #[test]
    fn test_empty_trailing() {
        let msg = Message::parse("TOPIC #c :").unwrap();
        assert_eq!(msg.args, vec!["#c", ""]);
    }

    #[test]
    fn test_empty_line_rejected() {
        assert!(matches!(Message::parse(""), Err(ProtocolError::EmptyLine)));
    }

    #[test]
    fn test_prefix_only_is_best_effort() {
        let msg = Message::parse(":irc.example.net").unwrap();
        assert!(msg.is_malformed());
        assert_eq!(msg.nick, "irc.example.net");
        assert!(msg.args.is_empty());

        let blank = Message::parse("   ").unwrap();
        assert!(blank.is_malformed());
    }

    #[test]
    fn test_unknown_command_passes_through() {
        let msg = Message::parse("FROBNICATE x y :z w").unwrap();
        assert_eq!(msg.command, "FROBNICATE");
        assert_eq!(msg.args, vec!["x", "y", "z w"]);
    }

    #[test]
    fn test_parse_idempotent() {
        let line = ":nick!user@host PRIVMSG #chan :hello world";
        assert_eq!(Message::parse(line).unwrap(), Message::parse(line).unwrap());
    }
}
