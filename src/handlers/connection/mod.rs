//! Connection lifecycle handlers.
//!
//! Handles the bot's own registration: opening `CAP` negotiation and sending
//! NICK/USER on connect, nick collisions before `001`, the welcome itself,
//! and keepalive PINGs.

mod nick;
mod ping;
mod welcome;

pub use nick::handle_nick_in_use;
pub use ping::handle_ping;
pub use welcome::handle_welcome;

use rookery_proto::Response;
use tracing::debug;

use crate::bot::Bot;
use crate::dispatch::Predicate;
use crate::error::HandlerResult;
use crate::event::Event;
use crate::handlers::cap::begin_negotiation;

/// Internal: a transport was attached. Starts registration.
pub fn handle_on_connect(bot: &mut Bot, _event: &Event) -> HandlerResult {
    begin_negotiation(bot)?;

    if let Some(pass) = bot
        .settings()
        .server
        .as_ref()
        .and_then(|s| s.password.clone())
    {
        bot.send(&format!("PASS {pass}"))?;
    }
    let nick = bot.nick().to_owned();
    let realname = bot.realname().to_owned();
    bot.send(&format!("NICK {nick}"))?;
    bot.send(&format!("USER {nick} 0 * :{realname}"))?;

    // Nick collisions only matter until the server welcomes us.
    if let Some(old) = bot.nick_retry() {
        bot.unregister(old);
    }
    let id = bot.register(
        Response::ERR_NICKNAMEINUSE.as_command().as_str(),
        Predicate::network(),
        handle_nick_in_use,
    );
    bot.set_nick_retry(Some(id));
    debug!(bot = %bot.name(), handler = %id, "Waiting for welcome");
    Ok(())
}

/// Internal: the bot is about to be torn down.
pub fn handle_shutting_down(bot: &mut Bot, _event: &Event) -> HandlerResult {
    if bot.is_registered() {
        bot.send("QUIT :Shutting down")?;
    }
    Ok(())
}
