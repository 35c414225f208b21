//! PART handler.

use tracing::debug;

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;
use crate::handlers::helpers::client_leaving_channel;

/// `:nick!user@host PART #chan [:reason]`
pub fn handle_part(bot: &mut Bot, event: &Event) -> HandlerResult {
    let graph = bot.graph();
    let (Some(client), Some(channel)) = (
        graph.client_id(event.nick()),
        graph.channel_id(event.destination()),
    ) else {
        debug!(nick = %event.nick(), channel = %event.destination(), "PART for unknown client or channel");
        return Ok(());
    };
    client_leaving_channel(bot, client, channel);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::bot::Bot;
    use crate::transport::Recorder;

    fn joined() -> Bot {
        let mut bot = Bot::new("test");
        bot.connect(Recorder::new());
        bot.handle_line(":srv 001 test :Welcome").unwrap();
        bot.handle_line(":test!t@me JOIN #a").unwrap();
        bot.handle_line(":test!t@me JOIN #b").unwrap();
        bot.handle_line(":alice!a@h JOIN #a").unwrap();
        bot.handle_line(":alice!a@h JOIN #b").unwrap();
        bot.handle_line(":carol!c@h JOIN #a").unwrap();
        bot
    }

    #[test]
    fn test_part_keeps_client_with_other_channels() {
        let mut bot = joined();
        bot.handle_line(":alice!a@h PART #a :bye").unwrap();
        let graph = bot.graph();
        let alice = graph.client_by_nick("alice").unwrap();
        assert_eq!(alice.channel_count(), 1);
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn test_part_prunes_memberless_client() {
        let mut bot = joined();
        bot.handle_line(":carol!c@h PART #a").unwrap();
        assert!(bot.graph().client_by_nick("carol").is_none());
        assert!(bot.graph().verify().is_ok());
    }

    #[test]
    fn test_self_part_unwinds_channel() {
        let mut bot = joined();
        bot.handle_line(":test!t@me PART #a").unwrap();
        let graph = bot.graph();
        assert!(graph.channel_id("#a").is_none());
        // carol shared only #a with us
        assert!(graph.client_by_nick("carol").is_none());
        assert_eq!(graph.client_by_nick("alice").unwrap().channel_count(), 1);
        assert!(graph.client_by_nick("test").is_some());
        assert!(graph.verify().is_ok());
    }

    #[test]
    fn test_part_unknown_is_noop() {
        let mut bot = joined();
        let before = bot.graph().membership_count();
        bot.handle_line(":nobody!n@h PART #a").unwrap();
        bot.handle_line(":alice!a@h PART #nowhere").unwrap();
        assert_eq!(bot.graph().membership_count(), before);
    }
}
