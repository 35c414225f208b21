//! Channels and memberships.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};

use super::client::ClientId;

/// Arena key for a [`Channel`]. Never reused within one graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub(crate) u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

/// A channel the bot is on, or has seen referenced by a membership.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    pub(crate) id: ChannelId,
    pub(crate) name: String,
    pub(crate) members: BTreeSet<ClientId>,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    pub(crate) fn new(id: ChannelId, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            members: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn id(&self) -> ChannelId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.members.iter().copied()
    }

    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn has_member(&self, client: ClientId) -> bool {
        self.members.contains(&client)
    }
}

/// "This client is on this channel", plus per-channel standing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Membership {
    pub client: ClientId,
    pub channel: ChannelId,
    modes: BTreeSet<char>,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    pub(crate) fn new(client: ClientId, channel: ChannelId) -> Self {
        Self {
            client,
            channel,
            modes: BTreeSet::new(),
            joined_at: Utc::now(),
        }
    }

    /// Add a standing flag. Returns `true` when it was not already set.
    pub fn add_mode(&mut self, mode: char) -> bool {
        self.modes.insert(mode)
    }

    pub fn remove_mode(&mut self, mode: char) -> bool {
        self.modes.remove(&mode)
    }

    #[inline]
    pub fn has_mode(&self, mode: char) -> bool {
        self.modes.contains(&mode)
    }

    /// Standing flags as a sorted string, e.g. `"ov"`.
    pub fn modes(&self) -> String {
        self.modes.iter().collect()
    }

    #[inline]
    pub fn is_op(&self) -> bool {
        self.has_mode('o')
    }

    #[inline]
    pub fn is_voiced(&self) -> bool {
        self.has_mode('v')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_modes() {
        let mut m = Membership::new(ClientId(1), ChannelId(1));
        assert!(m.add_mode('v'));
        assert!(m.add_mode('o'));
        assert!(!m.add_mode('o'));
        assert_eq!(m.modes(), "ov");
        assert!(m.is_op() && m.is_voiced());
        assert!(m.remove_mode('v'));
        assert_eq!(m.modes(), "o");
    }
}
