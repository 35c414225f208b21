//! CAP subcommand handlers (client side).

use rookery_proto::CapReply;
use tracing::{debug, info};

use super::CAP_ENABLED;
use crate::bot::Bot;
use crate::error::HandlerResult;

/// Start negotiation on a fresh connection.
pub fn begin_negotiation(bot: &mut Bot) -> HandlerResult {
    bot.caps_mut().begin();
    bot.send("CAP LS 302")?;
    Ok(())
}

/// Close negotiation; registration proceeds on the server side.
pub fn end_negotiation(bot: &mut Bot) -> HandlerResult {
    if !bot.caps().in_progress() {
        return Ok(());
    }
    bot.caps_mut().finish();
    bot.send("CAP END")?;
    Ok(())
}

/// `CAP * LS [*] :caps` - collect offers until the final line, then request.
pub(super) fn ls(bot: &mut Bot, reply: CapReply) -> HandlerResult {
    bot.caps_mut().offer(reply.caps);
    if reply.more {
        return Ok(());
    }

    let wanted = bot.caps().to_request();
    if wanted.is_empty() {
        debug!(bot = %bot.name(), "No wanted capabilities offered");
        return end_negotiation(bot);
    }
    bot.send(&format!("CAP REQ :{}", wanted.join(" ")))?;
    Ok(())
}

/// `CAP <nick> ACK :caps`
pub(super) fn ack(bot: &mut Bot, reply: CapReply) -> HandlerResult {
    for cap in reply.caps {
        // A leading '-' means the cap was disabled.
        if cap.starts_with('-') {
            continue;
        }
        if bot.caps_mut().acknowledge(&cap) {
            info!(bot = %bot.name(), capability = %cap, "Capability acknowledged");
            bot.dispatch_internal(CAP_ENABLED, [cap]);
        }
    }
    end_negotiation(bot)
}

/// `CAP <nick> NAK :caps`
pub(super) fn nak(bot: &mut Bot, reply: CapReply) -> HandlerResult {
    debug!(bot = %bot.name(), rejected = ?reply.caps, "Capabilities rejected");
    end_negotiation(bot)
}
