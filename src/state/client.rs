//! Known remote participants.

use std::collections::BTreeSet;
use std::fmt;

use super::channel::ChannelId;

/// Arena key for a [`Client`]. Never reused within one graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(pub(crate) u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Account value set from a legacy WHO reply: the account is not known.
pub const ACCOUNT_UNKNOWN: &str = "*";

/// A nick the bot can currently see in at least one shared channel (or the
/// bot itself).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Client {
    pub(crate) id: ClientId,
    pub(crate) nick: String,
    pub user: String,
    pub host: String,
    /// Account name. Empty when unknown or logged out, `*` after a legacy
    /// WHO reply that cannot carry one.
    pub account: String,
    pub(crate) channels: BTreeSet<ChannelId>,
}

impl Client {
    pub(crate) fn new(id: ClientId, nick: &str, user: &str, host: &str) -> Self {
        Self {
            id,
            nick: nick.to_owned(),
            user: user.to_owned(),
            host: host.to_owned(),
            account: String::new(),
            channels: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ClientId {
        self.id
    }

    #[inline]
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Channels this client shares with the bot.
    pub fn channels(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.channels.iter().copied()
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn is_on(&self, channel: ChannelId) -> bool {
        self.channels.contains(&channel)
    }

    /// Whether a real account name is known.
    pub fn is_identified(&self) -> bool {
        !self.account.is_empty() && self.account != ACCOUNT_UNKNOWN
    }

    /// `nick!user@host`, with `*` for unknown parts.
    pub fn mask(&self) -> String {
        let part = |s: &str| if s.is_empty() { "*".to_owned() } else { s.to_owned() };
        format!("{}!{}@{}", self.nick, part(&self.user), part(&self.host))
    }

    /// Fill in user and host when they are still unknown.
    pub(crate) fn learn_userhost(&mut self, user: Option<&str>, host: Option<&str>) {
        if let Some(user) = user.filter(|u| !u.is_empty()) {
            if self.user.is_empty() {
                self.user = user.to_owned();
            }
        }
        if let Some(host) = host.filter(|h| !h.is_empty()) {
            if self.host.is_empty() {
                self.host = host.to_owned();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identified() {
        let mut c = Client::new(ClientId(1), "n", "u", "h");
        assert!(!c.is_identified());
        c.account = ACCOUNT_UNKNOWN.into();
        assert!(!c.is_identified());
        c.account = "acct".into();
        assert!(c.is_identified());
    }

    #[test]
    fn test_mask_and_learn() {
        let mut c = Client::new(ClientId(1), "n", "", "");
        assert_eq!(c.mask(), "n!*@*");
        c.learn_userhost(Some("u"), None);
        c.learn_userhost(Some("other"), Some("h"));
        assert_eq!(c.mask(), "n!u@h");
    }
}
