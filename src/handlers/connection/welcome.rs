//! RPL_WELCOME (001) handler.

use tracing::info;

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;
use crate::handlers::helpers::find_or_create_client;

/// Internal event marking completed registration.
pub const REGISTERED: &str = "registered";

/// `:server 001 <nick> :Welcome to the network`
///
/// The first argument is the nick the server actually gave us.
pub fn handle_welcome(bot: &mut Bot, event: &Event) -> HandlerResult {
    let nick = event.destination();
    if !nick.is_empty() {
        bot.set_nick(nick);
    }
    bot.set_registered(true);

    if let Some(id) = bot.nick_retry() {
        bot.unregister(id);
        bot.set_nick_retry(None);
    }

    let nick = bot.nick().to_owned();
    if let Some(me) = find_or_create_client(bot, &nick, None, None) {
        bot.graph_mut().set_me(Some(me));
    }
    info!(bot = %bot.name(), nick = %nick, "Registered");

    bot.dispatch_internal(REGISTERED, [nick]);
    Ok(())
}
