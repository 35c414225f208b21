//! WHO reply reconciliation.
//!
//! Both reply formats land in [`reconcile`]; they differ only in where the
//! fields sit and what the account column holds. The extended format is
//! only accepted when it answers the query this bot issued last.

use tracing::{debug, trace};

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;
use crate::handlers::helpers::{apply_status_flags, find_or_create_client};
use crate::state::ACCOUNT_UNKNOWN;

/// Query token sent with `WHO #chan %cnuhaft,<token>`.
pub const WHOX_TOKEN: &str = "524";

/// WHOX field selection: token, channel, user, host, nick, flags, account.
const WHOX_FIELDS: &str = "%cnuhaft";

/// Number of parameters after the destination both formats carry.
const REPLY_PARAMS: usize = 7;

/// Layout of a WHO reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhoFormat {
    /// `352 me #chan user host server nick flags :hops realname`
    Legacy,
    /// `354 me token #chan user host nick flags account`
    Extended,
}

/// Fields pulled from one reply line.
#[derive(Debug, PartialEq, Eq)]
struct WhoReply<'a> {
    channel: &'a str,
    user: &'a str,
    host: &'a str,
    nick: &'a str,
    flags: &'a str,
    account: &'a str,
}

impl WhoFormat {
    fn extract<'a>(self, params: &'a [String]) -> Option<WhoReply<'a>> {
        if params.len() != REPLY_PARAMS {
            return None;
        }
        let p = |i: usize| params[i].as_str();
        Some(match self {
            Self::Legacy => WhoReply {
                channel: p(0),
                user: p(1),
                host: p(2),
                nick: p(4),
                flags: p(5),
                account: ACCOUNT_UNKNOWN,
            },
            Self::Extended => WhoReply {
                channel: p(1),
                user: p(2),
                host: p(3),
                nick: p(4),
                flags: p(5),
                account: match p(6) {
                    "0" => "",
                    account => account,
                },
            },
        })
    }
}

/// Ask the server who is on a channel the bot just joined.
pub fn request_identities(bot: &mut Bot, channel: &str) -> HandlerResult {
    if bot.flags().whox {
        bot.send(&format!("WHO {channel} {WHOX_FIELDS},{WHOX_TOKEN}"))?;
        bot.set_whox_token(WHOX_TOKEN);
    } else {
        bot.send(&format!("WHO {channel}"))?;
    }
    Ok(())
}

pub fn handle_legacy(bot: &mut Bot, event: &Event) -> HandlerResult {
    reconcile(bot, event, WhoFormat::Legacy)
}

pub fn handle_extended(bot: &mut Bot, event: &Event) -> HandlerResult {
    reconcile(bot, event, WhoFormat::Extended)
}

/// Fold one WHO reply into the graph.
pub fn reconcile(bot: &mut Bot, event: &Event, format: WhoFormat) -> HandlerResult {
    let params = event.params();
    if format == WhoFormat::Extended {
        let token = params.first().map(String::as_str);
        if token.is_none() || token != bot.whox_token() {
            trace!(token = ?token, "Ignoring WHOX reply with foreign token");
            return Ok(());
        }
    }
    let Some(reply) = format.extract(params) else {
        debug!(raw = %event.raw, ?format, "Short WHO reply");
        return Ok(());
    };
    if reply.channel.is_empty() || reply.nick.is_empty() {
        return Ok(());
    }

    let Some(client) = find_or_create_client(bot, reply.nick, Some(reply.user), Some(reply.host))
    else {
        return Ok(());
    };
    if let Some(c) = bot.graph_mut().client_mut(client) {
        c.account = reply.account.to_owned();
    }
    let channel = bot.graph_mut().find_or_create_channel(reply.channel);
    bot.graph_mut().join(client, channel);
    apply_status_flags(bot, client, channel, reply.flags);

    trace!(nick = %reply.nick, channel = %reply.channel, account = %reply.account, "WHO reply reconciled");
    Ok(())
}
