//! Built-in directive handlers (`server`, `throttle`).
//!
//! Errors are returned as configuration errors so they land on the
//! directive's `file:line` location.

use tracing::debug;

use crate::bot::Bot;
use crate::config::{ServerSettings, Throttle};
use crate::error::{HandlerError, HandlerResult};
use crate::event::Event;

/// `server <host> <port> <nick> [password]`
pub fn handle_server(bot: &mut Bot, event: &Event) -> HandlerResult {
    let [host, port, nick, rest @ ..] = event.args.as_slice() else {
        return Err(HandlerError::config(
            "usage: server <host> <port> <nick> [password]",
        ));
    };
    let port: u16 = port
        .parse()
        .map_err(|_| HandlerError::config(format!("invalid port: {port}")))?;
    Bot::require(!nick.is_empty(), "server: empty nick")?;

    let server = ServerSettings {
        host: host.clone(),
        port,
        nick: nick.clone(),
        password: rest.first().cloned(),
    };
    debug!(bot = %bot.name(), address = %server.address(), nick = %server.nick, "Server configured");
    bot.settings_mut().server = Some(server);
    Ok(())
}

/// `throttle <burst> <rate> <lines>`: `burst` lines at once, then `lines`
/// lines every `rate` seconds.
pub fn handle_throttle(bot: &mut Bot, event: &Event) -> HandlerResult {
    let [burst, rate, num] = event.args.as_slice() else {
        return Err(HandlerError::config("usage: throttle <burst> <rate> <lines>"));
    };
    let number = |what: &str, value: &str| {
        value
            .parse::<u32>()
            .map_err(|_| HandlerError::config(format!("throttle: invalid {what}: {value}")))
    };
    let throttle = Throttle {
        burst: number("burst", burst)?,
        rate: number("rate", rate)?,
        num: number("lines", num)?,
    };
    Bot::require(throttle.burst >= 1, "throttle: burst must be at least 1")?;
    Bot::require(throttle.num >= 1, "throttle: lines must be at least 1")?;

    debug!(bot = %bot.name(), ?throttle, "Throttle configured");
    bot.settings_mut().throttle = throttle;
    Ok(())
}
