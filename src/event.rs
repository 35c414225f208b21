//! Events routed through the dispatcher.
//!
//! An [`Event`] is built once, either from a raw network line, a directive
//! file line, a chat command, or synthesized internally, and is read-only
//! while handlers run. It names its owning bot instance; events never cross
//! instances.

use std::fmt;

use rookery_proto::{LineRef, ParseError, mentions_channel};

use crate::state::ClientId;

/// Where a dispatched event came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A line received from the network.
    Network,
    /// A directive read from a configuration file.
    ConfigFile,
    /// Synthesized inside the process.
    Internal,
    /// A user command relayed from chat text.
    Command,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::ConfigFile => "config",
            Self::Internal => "internal",
            Self::Command => "command",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a reply or error report for an event is delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyTarget {
    /// Sent as a `NOTICE` to a channel or nick.
    Notice(String),
    /// Written to the log and kept as a diagnostic, labelled with a location
    /// such as `bot.conf:12`.
    Log(String),
    /// Dropped.
    Discard,
}

impl ReplyTarget {
    /// Reply routing for a network line: the channel when the destination
    /// mentions one, otherwise the sender.
    pub fn for_destination(destination: &str, nick: &str) -> Self {
        if mentions_channel(destination) {
            Self::Notice(destination.to_owned())
        } else if !nick.is_empty() {
            Self::Notice(nick.to_owned())
        } else {
            Self::Discard
        }
    }
}

/// Identity information about an event's sender.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Source {
    /// Raw prefix string, empty when the line had none.
    pub raw: String,
    /// Nick (or server name) from the prefix.
    pub nick: String,
    /// Username, when the prefix carried one.
    pub user: Option<String>,
    /// Hostname, when the prefix carried one.
    pub host: Option<String>,
    /// The known client this event is about, if any.
    pub client: Option<ClientId>,
    /// The line's destination (first argument).
    pub destination: String,
}

/// One occurrence to route through the dispatcher.
#[derive(Clone, Debug)]
pub struct Event {
    pub command: String,
    pub source: Source,
    /// Positional arguments, destination included as `args[0]`.
    pub args: Vec<String>,
    pub origin: Origin,
    pub reply: ReplyTarget,
    pub error: ReplyTarget,
    /// Name of the owning bot instance.
    pub bot: String,
    /// Raw line (or directive text) the event was built from.
    pub raw: String,
    /// Raw IRCv3 tag section, if any.
    pub tags: Option<String>,
}

impl Event {
    /// Parse a raw network line into an event.
    ///
    /// Pure: no client resolution happens here, `source.client` is left
    /// empty for the bot to fill in.
    pub fn parse(bot: &str, raw: &str) -> Result<Self, ParseError> {
        let line = LineRef::parse(raw)?;
        Ok(Self::from_line(bot, &line))
    }

    /// Build a network event from an already parsed line.
    pub fn from_line(bot: &str, line: &LineRef<'_>) -> Self {
        let source = match line.prefix {
            Some(p) => Source {
                raw: p.raw.to_owned(),
                nick: p.nick.to_owned(),
                user: p.user.map(str::to_owned),
                host: p.host.map(str::to_owned),
                client: None,
                destination: line.destination().to_owned(),
            },
            None => Source {
                destination: line.destination().to_owned(),
                ..Source::default()
            },
        };
        let reply = ReplyTarget::for_destination(&source.destination, &source.nick);

        Self {
            command: line.command.to_owned(),
            error: reply.clone(),
            reply,
            source,
            args: line.args.iter().map(|a| (*a).to_owned()).collect(),
            origin: Origin::Network,
            bot: bot.to_owned(),
            raw: line.raw.to_owned(),
            tags: line.tags.map(str::to_owned),
        }
    }

    /// Build an internal notification event.
    pub fn internal<I, S>(bot: &str, command: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        Self {
            command: command.to_owned(),
            source: Source {
                destination: args.first().cloned().unwrap_or_default(),
                ..Source::default()
            },
            raw: command.to_owned(),
            args,
            origin: Origin::Internal,
            reply: ReplyTarget::Log(command.to_owned()),
            error: ReplyTarget::Log(command.to_owned()),
            bot: bot.to_owned(),
            tags: None,
        }
    }

    /// Build an internal event about one client.
    pub fn about_client(bot: &str, command: &str, client: ClientId, nick: &str) -> Self {
        let mut event = Self::internal(bot, command, [nick]);
        event.source.nick = nick.to_owned();
        event.source.client = Some(client);
        event
    }

    /// Build a directive event from one tokenized config file line.
    pub fn directive(bot: &str, words: Vec<String>, location: String, raw: &str) -> Self {
        let mut args = words;
        let command = if args.is_empty() {
            String::new()
        } else {
            args.remove(0)
        };
        Self {
            command,
            source: Source {
                destination: args.first().cloned().unwrap_or_default(),
                ..Source::default()
            },
            args,
            origin: Origin::ConfigFile,
            reply: ReplyTarget::Log(location.clone()),
            error: ReplyTarget::Log(location),
            bot: bot.to_owned(),
            raw: raw.to_owned(),
            tags: None,
        }
    }

    /// Build a chat command event from a message that triggered it.
    ///
    /// The sender and reply routing are inherited; `args` are the words
    /// after the command name.
    pub fn command(parent: &Event, name: &str, args: Vec<String>) -> Self {
        Self {
            command: name.to_owned(),
            source: Source {
                destination: args.first().cloned().unwrap_or_default(),
                ..parent.source.clone()
            },
            args,
            origin: Origin::Command,
            reply: parent.reply.clone(),
            error: parent.error.clone(),
            bot: parent.bot.clone(),
            raw: parent.raw.clone(),
            tags: parent.tags.clone(),
        }
    }

    /// The first argument, or `""`.
    #[inline]
    pub fn destination(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    /// Positional parameters after the destination.
    #[inline]
    pub fn params(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    /// Get a specific argument by index.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Sender nick, empty for server lines without prefix.
    #[inline]
    pub fn nick(&self) -> &str {
        &self.source.nick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join() {
        let event = Event::parse("b", ":nick!user@host JOIN #chan").unwrap();
        assert_eq!(event.source.nick, "nick");
        assert_eq!(event.source.user.as_deref(), Some("user"));
        assert_eq!(event.source.host.as_deref(), Some("host"));
        assert_eq!(event.command, "JOIN");
        assert_eq!(event.destination(), "#chan");
        assert_eq!(event.source.destination, "#chan");
        assert_eq!(event.origin, Origin::Network);
        assert!(event.source.client.is_none());
        assert_eq!(event.bot, "b");
    }

    #[test]
    fn test_params_skip_destination() {
        let event = Event::parse("b", "CMD a b :trailing with spaces").unwrap();
        assert_eq!(event.args, vec!["a", "b", "trailing with spaces"]);
        assert_eq!(event.params(), ["b", "trailing with spaces"]);

        let bare = Event::parse("b", "CMD").unwrap();
        assert_eq!(bare.destination(), "");
        assert!(bare.params().is_empty());
    }

    #[test]
    fn test_reply_routing() {
        let chan = Event::parse("b", ":n!u@h PRIVMSG #c :hi").unwrap();
        assert_eq!(chan.reply, ReplyTarget::Notice("#c".into()));
        assert_eq!(chan.error, ReplyTarget::Notice("#c".into()));

        let private = Event::parse("b", ":n!u@h PRIVMSG bot :hi").unwrap();
        assert_eq!(private.reply, ReplyTarget::Notice("n".into()));

        let server = Event::parse("b", "PING :irc.example.net").unwrap();
        assert_eq!(server.reply, ReplyTarget::Discard);
    }

    #[test]
    fn test_bare_nick_prefix() {
        let event = Event::parse("b", ":nick QUIT").unwrap();
        assert_eq!(event.nick(), "nick");
        assert!(event.source.user.is_none());
        assert!(event.source.host.is_none());
    }

    #[test]
    fn test_directive_event() {
        let words = vec!["throttle".to_owned(), "4".to_owned(), "2".to_owned()];
        let event = Event::directive("b", words, "b.conf:3".into(), "throttle 4 2");
        assert_eq!(event.command, "throttle");
        assert_eq!(event.args, vec!["4", "2"]);
        assert_eq!(event.origin, Origin::ConfigFile);
        assert_eq!(event.error, ReplyTarget::Log("b.conf:3".into()));
    }

    #[test]
    fn test_command_event_inherits_routing() {
        let parent = Event::parse("b", ":n!u@h PRIVMSG #c :!set k v").unwrap();
        let cmd = Event::command(&parent, "set", vec!["k".into(), "v".into()]);
        assert_eq!(cmd.origin, Origin::Command);
        assert_eq!(cmd.reply, ReplyTarget::Notice("#c".into()));
        assert_eq!(cmd.nick(), "n");
        assert_eq!(cmd.args, vec!["k", "v"]);
    }
}
