//! Capability negotiation and server feature advertisement.
//!
//! Network-side handlers (`CAP`, `005`) turn what the server says into
//! internal `cap_enabled` / `isupport_enabled` events, one per newly
//! available name. Only the internal handlers touch [`FeatureFlags`].
//!
//! [`FeatureFlags`]: crate::capabilities::FeatureFlags

mod subcommands;

use rookery_proto::{CapReply, CapSubCommand};
use tracing::{debug, info};

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;
use crate::handlers::helpers::remove_client;

pub use subcommands::{begin_negotiation, end_negotiation};

/// Internal event carrying one acknowledged capability name.
pub const CAP_ENABLED: &str = "cap_enabled";
/// Internal event carrying one newly advertised feature key.
pub const ISUPPORT_ENABLED: &str = "isupport_enabled";

/// `:server CAP <target> <sub> [*] :<caps>`
pub fn handle_cap(bot: &mut Bot, event: &Event) -> HandlerResult {
    let Some(reply) = CapReply::parse(event.args.as_slice()) else {
        debug!(raw = %event.raw, "Unparseable CAP reply");
        return Ok(());
    };
    match reply.subcommand {
        CapSubCommand::Ls => subcommands::ls(bot, reply),
        CapSubCommand::Ack => subcommands::ack(bot, reply),
        CapSubCommand::Nak => subcommands::nak(bot, reply),
        other => {
            debug!(subcommand = other.as_str(), "CAP subcommand ignored");
            Ok(())
        }
    }
}

/// `:server 005 <nick> TOKEN[=value]... :are supported by this server`
pub fn handle_isupport(bot: &mut Bot, event: &Event) -> HandlerResult {
    let before = bot.features().casemapping();
    let added = bot.features_mut().apply_reply(event.args.as_slice());

    let after = bot.features().casemapping();
    if after != before {
        debug!(casemapping = after.as_str(), "Casemapping changed");
        for id in bot.graph_mut().set_casemapping(after) {
            remove_client(bot, id);
        }
    }

    for key in added {
        bot.dispatch_internal(ISUPPORT_ENABLED, [key]);
    }
    Ok(())
}

/// Internal: a capability was acknowledged.
pub fn handle_cap_enabled(bot: &mut Bot, event: &Event) -> HandlerResult {
    let name = event.destination();
    if bot.flags_mut().enable_capability(name) {
        info!(bot = %bot.name(), capability = %name, "Capability enabled");
    }
    Ok(())
}

/// Internal: a feature key was advertised.
pub fn handle_isupport_enabled(bot: &mut Bot, event: &Event) -> HandlerResult {
    let key = event.destination();
    if bot.flags_mut().enable_feature(key) {
        info!(bot = %bot.name(), feature = %key, "Feature enabled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::bot::Bot;
    use crate::transport::Recorder;

    fn negotiating() -> (Bot, Recorder) {
        let rec = Recorder::new();
        let mut bot = Bot::new("test");
        bot.connect(rec.clone());
        rec.take();
        (bot, rec)
    }

    #[test]
    fn test_ls_requests_wanted_intersection() {
        let (mut bot, rec) = negotiating();
        bot.handle_line(":srv CAP * LS * :multi-prefix extended-join")
            .unwrap();
        assert!(rec.lines().is_empty());
        bot.handle_line(":srv CAP * LS :account-notify sasl=PLAIN")
            .unwrap();
        assert_eq!(rec.take(), vec!["CAP REQ :account-notify extended-join"]);
    }

    #[test]
    fn test_ls_without_overlap_ends() {
        let (mut bot, rec) = negotiating();
        bot.handle_line(":srv CAP * LS :multi-prefix sasl").unwrap();
        assert_eq!(rec.take(), vec!["CAP END"]);
        assert!(!bot.caps().in_progress());
    }

    #[test]
    fn test_ack_enables_flags_and_ends() {
        let (mut bot, rec) = negotiating();
        bot.handle_line(":srv CAP * LS :account-notify extended-join")
            .unwrap();
        rec.take();
        bot.handle_line(":srv CAP test ACK :account-notify extended-join")
            .unwrap();
        assert_eq!(rec.take(), vec!["CAP END"]);
        assert!(bot.flags().account_notify);
        assert!(bot.flags().extended_join);
        assert!(!bot.flags().identity_tracking());
        assert!(bot.caps().is_enabled("extended-join"));
    }

    #[test]
    fn test_nak_ends() {
        let (mut bot, rec) = negotiating();
        bot.handle_line(":srv CAP * LS :account-notify").unwrap();
        rec.take();
        bot.handle_line(":srv CAP test NAK :account-notify").unwrap();
        assert_eq!(rec.take(), vec!["CAP END"]);
        assert!(!bot.flags().account_notify);
    }

    #[test]
    fn test_isupport_whox_and_casemapping() {
        let (mut bot, _rec) = negotiating();
        bot.handle_line(":srv 005 test CASEMAPPING=ascii WHOX :are supported")
            .unwrap();
        assert!(bot.flags().whox);
        assert_eq!(bot.graph().casemapping().as_str(), "ascii");
        assert!(bot.features().contains("WHOX"));
    }

    #[test]
    fn test_casemapping_collision_removes_newer_client() {
        let (mut bot, _rec) = negotiating();
        bot.handle_line(":srv 005 test CASEMAPPING=ascii :are supported")
            .unwrap();
        bot.handle_line(":test!t@me JOIN #chan").unwrap();
        bot.handle_line(":dave[1]!d@one JOIN #chan").unwrap();
        bot.handle_line(":dave{1}!d@two JOIN #chan").unwrap();
        assert_eq!(bot.graph().client_count(), 3);

        bot.handle_line(":srv 005 test CASEMAPPING=rfc1459 :are supported")
            .unwrap();
        assert_eq!(bot.graph().client_count(), 2);
        let kept = bot.graph().client_id("DAVE{1}").unwrap();
        assert_eq!(bot.graph().client(kept).unwrap().nick(), "dave[1]");
        bot.graph().verify().unwrap();
    }

    #[test]
    fn test_flags_never_set_from_chat_text() {
        let (mut bot, _rec) = negotiating();
        bot.handle_line(":mallory!m@h PRIVMSG test :cap_enabled account-notify")
            .unwrap();
        bot.handle_line(":mallory!m@h isupport_enabled WHOX").unwrap();
        assert!(!bot.flags().account_notify);
        assert!(!bot.flags().whox);
    }
}
