//! Helper functions shared by the reconciliation handlers.
//!
//! Every graph mutation that adds or drops a client goes through here so the
//! `new_client` / `client_remove` notifications fire consistently, and so
//! pruning happens the moment a client stops sharing a channel with the bot.

use tracing::{debug, info};

use crate::bot::Bot;
use crate::event::Event;
use crate::state::{ChannelId, ClientId};

/// Internal event fired after a client enters the graph.
pub const NEW_CLIENT: &str = "new_client";
/// Internal event fired before a client leaves the graph.
pub const CLIENT_REMOVE: &str = "client_remove";

/// Find a client by nick, creating it (and announcing it) when unknown.
///
/// Known clients get any still-missing user/host filled in. Returns `None`
/// only for an empty nick.
pub fn find_or_create_client(
    bot: &mut Bot,
    nick: &str,
    user: Option<&str>,
    host: Option<&str>,
) -> Option<ClientId> {
    if nick.is_empty() {
        return None;
    }
    if let Some(id) = bot.graph().client_id(nick) {
        if let Some(client) = bot.graph_mut().client_mut(id) {
            client.learn_userhost(user, host);
        }
        return Some(id);
    }
    add_client(bot, nick, user.unwrap_or(""), host.unwrap_or(""))
}

/// Insert a new client. Returns `None` if the nick is already taken.
pub fn add_client(bot: &mut Bot, nick: &str, user: &str, host: &str) -> Option<ClientId> {
    let id = bot.graph_mut().insert_client(nick, user, host)?;
    if bot.is_own_nick(nick) {
        bot.graph_mut().set_me(Some(id));
    }
    debug!(bot = %bot.name(), nick = %nick, client = %id, "New client");
    let event = Event::about_client(bot.name(), NEW_CLIENT, id, nick);
    bot.dispatch(&event);
    Some(id)
}

/// Announce and remove a client with all its memberships.
pub fn remove_client(bot: &mut Bot, id: ClientId) {
    let Some(nick) = bot.graph().client(id).map(|c| c.nick().to_owned()) else {
        return;
    };
    let event = Event::about_client(bot.name(), CLIENT_REMOVE, id, &nick);
    bot.dispatch(&event);
    bot.graph_mut().remove_client(id);
    debug!(bot = %bot.name(), nick = %nick, client = %id, "Client removed");
}

/// Remove a client that no longer shares any channel with the bot.
///
/// The bot's own client is never pruned here.
pub fn prune_client(bot: &mut Bot, id: ClientId) -> bool {
    let memberless = bot
        .graph()
        .client(id)
        .is_some_and(|c| c.channel_count() == 0);
    if memberless && !bot.graph().is_me(id) {
        remove_client(bot, id);
        true
    } else {
        false
    }
}

/// A client stops being on a channel (part or kick).
///
/// When the client is the bot itself, the channel is unwound completely:
/// every remaining membership goes, memberless clients are pruned and the
/// channel is removed.
pub fn client_leaving_channel(bot: &mut Bot, client: ClientId, channel: ChannelId) {
    if bot.graph_mut().remove_membership(client, channel).is_none() {
        return;
    }
    prune_client(bot, client);

    if !bot.graph().is_me(client) {
        return;
    }

    let members: Vec<ClientId> = bot
        .graph()
        .channel(channel)
        .map(|c| c.members().collect())
        .unwrap_or_default();
    for member in members {
        bot.graph_mut().remove_membership(member, channel);
        prune_client(bot, member);
    }
    if let Some(removed) = bot.graph_mut().remove_channel(channel) {
        info!(bot = %bot.name(), channel = %removed.name(), "Left channel");
    }
}

/// Apply WHO-style status flags (`H@+`) to a membership. Characters that
/// are not prefix symbols under the current `PREFIX` are ignored.
pub fn apply_status_flags(bot: &mut Bot, client: ClientId, channel: ChannelId, flags: &str) {
    let modes: Vec<char> = flags
        .chars()
        .filter_map(|c| bot.features().mode_for_prefix(c))
        .collect();
    if let Some(membership) = bot.graph_mut().membership_mut(client, channel) {
        for mode in modes {
            membership.add_mode(mode);
        }
    }
}
