//! Core handler registration.
//!
//! Every bot starts with the same set of handlers: reconciliation of the
//! entity graph from network lines, capability and feature tracking,
//! connection registration, the built-in directives and the chat commands.
//! Embedders add their own on top with [`Bot::register`].

pub mod cap;
pub mod channel;
pub mod commands;
pub mod connection;
pub mod directives;
pub mod helpers;
pub mod user;
pub mod who;

use rookery_proto::Response;

use crate::bot::Bot;
use crate::dispatch::Predicate;

/// Subscribe the built-in handlers on a new bot.
pub fn register_core(bot: &mut Bot) {
    let numeric = |r: Response| r.as_command();

    // Graph reconciliation
    bot.register("JOIN", Predicate::network(), channel::handle_join);
    bot.register("PART", Predicate::network(), channel::handle_part);
    bot.register("KICK", Predicate::network(), channel::handle_kick);
    bot.register("QUIT", Predicate::network(), user::handle_quit);
    bot.register("NICK", Predicate::network(), user::handle_nick);
    bot.register("ACCOUNT", Predicate::network(), user::handle_account);
    bot.register(
        &numeric(Response::RPL_WHOREPLY),
        Predicate::network(),
        who::handle_legacy,
    );
    bot.register(
        &numeric(Response::RPL_WHOSPCRPL),
        Predicate::network(),
        who::handle_extended,
    );

    // Capabilities and features
    bot.register("CAP", Predicate::network(), cap::handle_cap);
    bot.register(
        &numeric(Response::RPL_ISUPPORT),
        Predicate::network(),
        cap::handle_isupport,
    );
    bot.register(cap::CAP_ENABLED, Predicate::internal(), cap::handle_cap_enabled);
    bot.register(
        cap::ISUPPORT_ENABLED,
        Predicate::internal(),
        cap::handle_isupport_enabled,
    );

    // Connection
    bot.register("on_connect", Predicate::internal(), connection::handle_on_connect);
    bot.register(
        &numeric(Response::RPL_WELCOME),
        Predicate::network(),
        connection::handle_welcome,
    );
    bot.register("PING", Predicate::network(), connection::handle_ping);
    bot.register(
        "shutting_down",
        Predicate::internal(),
        connection::handle_shutting_down,
    );

    // Directives
    bot.register("server", Predicate::config(), directives::handle_server);
    bot.register("throttle", Predicate::config(), directives::handle_throttle);
    bot.register("clear_lists", Predicate::internal(), commands::handle_clear_lists);

    // Chat commands
    bot.register("PRIVMSG", Predicate::network(), commands::handle_privmsg);
    bot.register(
        "set",
        Predicate::command()
            .and(Predicate::privilege("admin"))
            .or_config(),
        commands::handle_set,
    );
    bot.register(
        "rehash",
        Predicate::command().and(Predicate::privilege("admin")),
        commands::handle_rehash,
    );
}
