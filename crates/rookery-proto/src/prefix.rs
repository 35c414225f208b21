//! Message source prefixes.
//!
//! A prefix identifies where a line came from: either a server name or a
//! user's `nick!user@host` mask. Decomposition is lenient: the text before the
//! first `!` is the nick, and the remainder splits on its first `@` into user
//! and host. A prefix without `!` is a bare nick (or server name) whose user
//! and host are unknown.
//!
//! # Reference
//! - RFC 2812 Section 2.3.1: Message format

use std::fmt;

/// A borrowed, decomposed prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrefixRef<'a> {
    /// Original raw prefix string (without the leading `:`).
    pub raw: &'a str,
    /// Nickname, or the whole token when there is no `!`.
    pub nick: &'a str,
    /// Username, when the prefix carried `!`.
    pub user: Option<&'a str>,
    /// Hostname, when the prefix carried `!` and then `@`.
    pub host: Option<&'a str>,
}

impl<'a> PrefixRef<'a> {
    /// Decompose a prefix string without allocating.
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('!') {
            Some((nick, rest)) => {
                let (user, host) = match rest.split_once('@') {
                    Some((user, host)) => (user, Some(host)),
                    None => (rest, None),
                };
                Self {
                    raw,
                    nick,
                    user: Some(user),
                    host,
                }
            }
            None => Self {
                raw,
                nick: raw,
                user: None,
                host: None,
            },
        }
    }

    /// Heuristic: a bare token with a dot is a server name.
    pub fn is_server(&self) -> bool {
        self.user.is_none() && self.nick.contains('.')
    }

    /// Convert to an owned [`Prefix`].
    pub fn to_owned(&self) -> Prefix {
        Prefix {
            raw: self.raw.to_owned(),
            nick: self.nick.to_owned(),
            user: self.user.map(str::to_owned),
            host: self.host.map(str::to_owned),
        }
    }
}

/// An owned, decomposed prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prefix {
    /// Original raw prefix string (without the leading `:`).
    pub raw: String,
    /// Nickname, or the whole token when there is no `!`.
    pub nick: String,
    /// Username, when known.
    pub user: Option<String>,
    /// Hostname, when known.
    pub host: Option<String>,
}

impl Prefix {
    /// Decompose a prefix string.
    ///
    /// ```
    /// use rookery_proto::Prefix;
    ///
    /// let p = Prefix::parse("nick!user@host.example");
    /// assert_eq!(p.nick, "nick");
    /// assert_eq!(p.user.as_deref(), Some("user"));
    /// assert_eq!(p.host.as_deref(), Some("host.example"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        PrefixRef::parse(raw).to_owned()
    }

    /// Build a full user prefix from its components.
    pub fn new(nick: impl Into<String>, user: impl Into<String>, host: impl Into<String>) -> Self {
        let (nick, user, host) = (nick.into(), user.into(), host.into());
        Self {
            raw: format!("{nick}!{user}@{host}"),
            nick,
            user: Some(user),
            host: Some(host),
        }
    }

    /// Heuristic: a bare token with a dot is a server name.
    pub fn is_server(&self) -> bool {
        self.user.is_none() && self.nick.contains('.')
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix::parse(s)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
