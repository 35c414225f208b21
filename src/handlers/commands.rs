//! Chat commands.
//!
//! A `PRIVMSG` addressed to the bot, or channel text starting with the
//! command prefix, becomes a command-origin event named after its first
//! word. Command handlers filter on privileges; reconciliation handlers
//! never see these events.

use tracing::{debug, info};

use crate::bot::Bot;
use crate::error::{HandlerError, HandlerResult};
use crate::event::{Event, Origin};

/// `:nick!user@host PRIVMSG <target> :<text>`
pub fn handle_privmsg(bot: &mut Bot, event: &Event) -> HandlerResult {
    let Some(text) = event.arg(1) else {
        return Ok(());
    };
    let prefix = bot.command_prefix();
    let line = if bot.is_own_nick(event.destination()) {
        text.strip_prefix(prefix).unwrap_or(text)
    } else {
        match text.strip_prefix(prefix) {
            Some(rest) if !prefix.is_empty() => rest,
            _ => return Ok(()),
        }
    };

    let mut words = line.split_whitespace().map(str::to_owned);
    let Some(name) = words.next() else {
        return Ok(());
    };
    let command = Event::command(event, &name, words.collect());
    debug!(bot = %bot.name(), nick = %event.nick(), command = %name, "Chat command");
    if bot.dispatch(&command) == 0 {
        debug!(command = %name, "No handler accepted command");
    }
    Ok(())
}

/// `set <key> <value...>` from a directive file or a privileged user.
pub fn handle_set(bot: &mut Bot, event: &Event) -> HandlerResult {
    let [key, value @ ..] = event.args.as_slice() else {
        return Err(HandlerError::NeedMoreParams);
    };
    Bot::require(!value.is_empty(), "usage: set <key> <value>")?;
    let value = value.join(" ");
    let previous = bot.settings_mut().set(key, &value);
    debug!(bot = %bot.name(), key = %key, value = %value, ?previous, "Setting stored");
    if event.origin == Origin::Command {
        bot.reply(&event.reply, &format!("{key} = {value}"));
    }
    Ok(())
}

/// `rehash` from a privileged user.
pub fn handle_rehash(bot: &mut Bot, event: &Event) -> HandlerResult {
    info!(bot = %bot.name(), nick = %event.nick(), "Rehash requested");
    let problems = bot.rehash()?;
    for problem in &problems {
        bot.reply(&event.reply, problem);
    }
    bot.reply(&event.reply, "Done.");
    Ok(())
}

/// Internal: directive state is about to be reloaded.
pub fn handle_clear_lists(bot: &mut Bot, _event: &Event) -> HandlerResult {
    bot.settings_mut().clear_values();
    Ok(())
}
