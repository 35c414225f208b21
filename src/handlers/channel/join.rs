//! JOIN handler.

use tracing::{debug, info};

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;
use crate::handlers::helpers::find_or_create_client;
use crate::handlers::who::request_identities;

/// `:nick!user@host JOIN #chan [account :realname]`
///
/// The account parameter only arrives with `extended-join`, and is only
/// trusted while identity tracking is on.
pub fn handle_join(bot: &mut Bot, event: &Event) -> HandlerResult {
    let chan = event.destination();
    if chan.is_empty() || event.nick().is_empty() {
        debug!(raw = %event.raw, "JOIN without channel or source");
        return Ok(());
    }

    let Some(client) = find_or_create_client(
        bot,
        event.nick(),
        event.source.user.as_deref(),
        event.source.host.as_deref(),
    ) else {
        return Ok(());
    };

    if bot.flags().identity_tracking()
        && let Some(account) = event.arg(1)
        && let Some(c) = bot.graph_mut().client_mut(client)
    {
        c.account = account.to_owned();
    }

    let channel = bot.graph_mut().find_or_create_channel(chan);
    bot.graph_mut().join(client, channel);

    if bot.graph().is_me(client) {
        info!(bot = %bot.name(), channel = %chan, "Joined channel");
        request_identities(bot, chan)?;
    }
    Ok(())
}
