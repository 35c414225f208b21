//! Per-client handlers: QUIT, NICK and ACCOUNT.

use tracing::{debug, info};

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;
use crate::handlers::helpers::remove_client;

/// `:nick!user@host QUIT [:reason]`
///
/// Channels stay; only the client and its memberships go. When the bot
/// itself quits the whole graph is dropped.
pub fn handle_quit(bot: &mut Bot, event: &Event) -> HandlerResult {
    let Some(client) = bot.graph().client_id(event.nick()) else {
        return Ok(());
    };
    if bot.graph().is_me(client) {
        info!(bot = %bot.name(), "Own QUIT, clearing state");
        let others: Vec<_> = bot.graph().clients().map(|c| c.id()).collect();
        for id in others {
            remove_client(bot, id);
        }
        bot.graph_mut().clear();
        return Ok(());
    }
    remove_client(bot, client);
    Ok(())
}

/// `:old!user@host NICK :new`
pub fn handle_nick(bot: &mut Bot, event: &Event) -> HandlerResult {
    let new_nick = event.destination();
    if new_nick.is_empty() {
        return Ok(());
    }
    let Some(client) = bot.graph().client_id(event.nick()) else {
        debug!(old = %event.nick(), new = %new_nick, "NICK for unknown client");
        return Ok(());
    };

    // A leftover entry under the new nick is stale by definition.
    if let Some(stale) = bot.graph().client_id(new_nick)
        && stale != client
    {
        remove_client(bot, stale);
    }
    bot.graph_mut().rename_client(client, new_nick);

    if bot.graph().is_me(client) {
        info!(bot = %bot.name(), nick = %new_nick, "Own nick changed");
        bot.set_nick(new_nick);
    }
    Ok(())
}

/// `:nick!user@host ACCOUNT <account>`
///
/// The value is stored as sent; `*` means logged out.
pub fn handle_account(bot: &mut Bot, event: &Event) -> HandlerResult {
    let account = event.destination();
    let Some(client) = bot.graph().client_id(event.nick()) else {
        return Ok(());
    };
    if let Some(c) = bot.graph_mut().client_mut(client) {
        debug!(nick = %c.nick(), account = %account, "Account changed");
        c.account = account.to_owned();
    }
    Ok(())
}
