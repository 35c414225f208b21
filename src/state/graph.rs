//! The entity graph: clients, channels and the memberships between them.
//!
//! Clients and channels live in id-keyed arenas. A membership is keyed by
//! its `(client, channel)` pair and mirrored in both ends' id sets, so every
//! mutation goes through this type to keep the two views in step.
//!
//! The graph itself never prunes. Callers decide when a memberless client
//! goes away, because removal is announced to handlers first.

use std::collections::HashMap;

use rookery_proto::CaseMapping;
use tracing::{debug, trace};

use super::channel::{Channel, ChannelId, Membership};
use super::client::{Client, ClientId};

/// Clients, channels and memberships for one bot instance.
#[derive(Debug, Default)]
pub struct Graph {
    casemap: CaseMapping,
    next_client: u64,
    next_channel: u64,
    clients: HashMap<ClientId, Client>,
    channels: HashMap<ChannelId, Channel>,
    memberships: HashMap<(ClientId, ChannelId), Membership>,
    nicks: HashMap<String, ClientId>,
    names: HashMap<String, ChannelId>,
    me: Option<ClientId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn casemapping(&self) -> CaseMapping {
        self.casemap
    }

    /// Switch case mapping and rebuild both name indexes.
    ///
    /// When two entries fold to the same key under the new mapping, the
    /// one with the lower id keeps the index slot. Clients that lost their
    /// slot are returned unindexed; the caller removes them.
    pub fn set_casemapping(&mut self, casemap: CaseMapping) -> Vec<ClientId> {
        if casemap == self.casemap {
            return Vec::new();
        }
        self.casemap = casemap;

        let mut clients: Vec<_> = self.clients.values().map(|c| (c.id, c.nick.clone())).collect();
        clients.sort();
        self.nicks.clear();
        let mut displaced = Vec::new();
        for (id, nick) in clients {
            let slot = self.nicks.entry(casemap.fold(&nick)).or_insert(id);
            if *slot != id {
                displaced.push(id);
            }
        }

        let mut channels: Vec<_> = self.channels.values().map(|c| (c.id, c.name.clone())).collect();
        channels.sort();
        self.names.clear();
        for (id, name) in channels {
            self.names.entry(casemap.fold(&name)).or_insert(id);
        }
        debug!(
            casemapping = casemap.as_str(),
            displaced = displaced.len(),
            "Rebuilt name indexes"
        );
        displaced
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn client_id(&self, nick: &str) -> Option<ClientId> {
        self.nicks.get(&self.casemap.fold(nick)).copied()
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn client_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    pub fn client_by_nick(&self, nick: &str) -> Option<&Client> {
        self.client_id(nick).and_then(|id| self.clients.get(&id))
    }

    pub fn channel_id(&self, name: &str) -> Option<ChannelId> {
        self.names.get(&self.casemap.fold(name)).copied()
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    pub fn channel_by_name(&self, name: &str) -> Option<&Channel> {
        self.channel_id(name).and_then(|id| self.channels.get(&id))
    }

    pub fn membership(&self, client: ClientId, channel: ChannelId) -> Option<&Membership> {
        self.memberships.get(&(client, channel))
    }

    pub fn membership_mut(
        &mut self,
        client: ClientId,
        channel: ChannelId,
    ) -> Option<&mut Membership> {
        self.memberships.get_mut(&(client, channel))
    }

    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        self.clients.values()
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    #[inline]
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    #[inline]
    pub fn membership_count(&self) -> usize {
        self.memberships.len()
    }

    // ------------------------------------------------------------------
    // The bot's own client
    // ------------------------------------------------------------------

    #[inline]
    pub fn me(&self) -> Option<ClientId> {
        self.me
    }

    pub fn set_me(&mut self, id: Option<ClientId>) {
        self.me = id;
    }

    #[inline]
    pub fn is_me(&self, id: ClientId) -> bool {
        self.me == Some(id)
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert a new client. Returns `None` when the nick is already taken.
    pub fn insert_client(&mut self, nick: &str, user: &str, host: &str) -> Option<ClientId> {
        let key = self.casemap.fold(nick);
        if self.nicks.contains_key(&key) {
            return None;
        }
        self.next_client += 1;
        let id = ClientId(self.next_client);
        self.clients.insert(id, Client::new(id, nick, user, host));
        self.nicks.insert(key, id);
        trace!(client = %id, nick = %nick, "Client inserted");
        Some(id)
    }

    /// Find a channel by name, creating it when absent.
    pub fn find_or_create_channel(&mut self, name: &str) -> ChannelId {
        if let Some(id) = self.channel_id(name) {
            return id;
        }
        self.next_channel += 1;
        let id = ChannelId(self.next_channel);
        self.channels.insert(id, Channel::new(id, name));
        self.names.insert(self.casemap.fold(name), id);
        trace!(channel = %name, "Channel created");
        id
    }

    /// Create the membership, or return the existing one.
    ///
    /// Returns `None` when either end does not exist.
    pub fn join(&mut self, client: ClientId, channel: ChannelId) -> Option<&mut Membership> {
        if !self.clients.contains_key(&client) || !self.channels.contains_key(&channel) {
            return None;
        }
        if let Some(c) = self.clients.get_mut(&client) {
            c.channels.insert(channel);
        }
        if let Some(h) = self.channels.get_mut(&channel) {
            h.members.insert(client);
        }
        Some(
            self.memberships
                .entry((client, channel))
                .or_insert_with(|| Membership::new(client, channel)),
        )
    }

    /// Remove one membership from both ends.
    pub fn remove_membership(
        &mut self,
        client: ClientId,
        channel: ChannelId,
    ) -> Option<Membership> {
        let membership = self.memberships.remove(&(client, channel))?;
        if let Some(c) = self.clients.get_mut(&client) {
            c.channels.remove(&channel);
        }
        if let Some(h) = self.channels.get_mut(&channel) {
            h.members.remove(&client);
        }
        Some(membership)
    }

    /// Remove a client and every membership it holds. Channels stay.
    pub fn remove_client(&mut self, id: ClientId) -> Option<Client> {
        let channels: Vec<ChannelId> = self.clients.get(&id)?.channels().collect();
        for channel in channels {
            self.remove_membership(id, channel);
        }
        let client = self.clients.remove(&id)?;
        let key = self.casemap.fold(&client.nick);
        if self.nicks.get(&key) == Some(&id) {
            self.nicks.remove(&key);
        }
        if self.me == Some(id) {
            self.me = None;
        }
        trace!(client = %id, nick = %client.nick, "Client removed");
        Some(client)
    }

    /// Remove a channel. Must be memberless; returns `None` otherwise.
    pub fn remove_channel(&mut self, id: ChannelId) -> Option<Channel> {
        if self.channels.get(&id)?.member_count() > 0 {
            return None;
        }
        let channel = self.channels.remove(&id)?;
        let key = self.casemap.fold(&channel.name);
        if self.names.get(&key) == Some(&id) {
            self.names.remove(&key);
        }
        trace!(channel = %channel.name, "Channel removed");
        Some(channel)
    }

    /// Re-key a client under a new nick. Memberships are untouched.
    ///
    /// Fails when another client already owns the new key; callers remove
    /// that stale entry first.
    pub fn rename_client(&mut self, id: ClientId, new_nick: &str) -> bool {
        let new_key = self.casemap.fold(new_nick);
        match self.nicks.get(&new_key) {
            Some(&owner) if owner != id => return false,
            _ => {}
        }
        let Some(client) = self.clients.get_mut(&id) else {
            return false;
        };
        let old_key = self.casemap.fold(&client.nick);
        client.nick = new_nick.to_owned();
        if self.nicks.get(&old_key) == Some(&id) {
            self.nicks.remove(&old_key);
        }
        self.nicks.insert(new_key, id);
        true
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.clients.clear();
        self.channels.clear();
        self.memberships.clear();
        self.nicks.clear();
        self.names.clear();
        self.me = None;
    }

    /// Check the structural invariants; returns a description of the first
    /// violation found.
    pub fn verify(&self) -> Result<(), String> {
        for (&(client, channel), m) in &self.memberships {
            if m.client != client || m.channel != channel {
                return Err(format!("membership {client}/{channel} keyed wrongly"));
            }
            let c = self
                .clients
                .get(&client)
                .ok_or_else(|| format!("membership {client}/{channel} has no client"))?;
            let h = self
                .channels
                .get(&channel)
                .ok_or_else(|| format!("membership {client}/{channel} has no channel"))?;
            if !c.is_on(channel) || !h.has_member(client) {
                return Err(format!("membership {client}/{channel} not indexed"));
            }
        }
        for c in self.clients.values() {
            for channel in c.channels() {
                if !self.memberships.contains_key(&(c.id, channel)) {
                    return Err(format!("client {} lists {channel} without membership", c.id));
                }
            }
            if self.nicks.get(&self.casemap.fold(&c.nick)) != Some(&c.id) {
                return Err(format!("client {} not indexed by nick {:?}", c.id, c.nick));
            }
        }
        for h in self.channels.values() {
            for client in h.members() {
                if !self.memberships.contains_key(&(client, h.id)) {
                    return Err(format!("channel {} lists {client} without membership", h.name));
                }
            }
        }
        if let Some(me) = self.me {
            if !self.clients.contains_key(&me) {
                return Err(format!("self client {me} missing"));
            }
        }
        Ok(())
    }
}
