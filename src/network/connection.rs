//! One bot connection.
//!
//! ```text
//!   TcpStream ── LinesCodec ──▶ reader loop ──▶ Bot::handle_line (under lock)
//!                                                   │
//!                                                   ▼ Bot::send
//!   TcpStream ◀── LinesCodec ◀── writer task ◀── LineSender channel
//!                                  (governor throttle)
//! ```

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use governor::RateLimiter;
use parking_lot::Mutex;
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec};
use tracing::{debug, info, instrument, warn};

use crate::bot::Bot;
use crate::error::BotError;
use crate::transport::LineSender;

/// Longest inbound line accepted, tags included.
pub const MAX_LINE_LENGTH: usize = 8191 + 512;

/// Connect `bot` to its server and run until the connection closes.
#[instrument(skip_all, fields(bot = %name), name = "connection")]
pub async fn run(name: String, bot: Arc<Mutex<Bot>>) -> Result<(), BotError> {
    let (server, throttle) = {
        let bot = bot.lock();
        let server = bot
            .settings()
            .server
            .clone()
            .ok_or_else(|| BotError::NoServer(name.clone()))?;
        (server, bot.settings().throttle)
    };

    let address = server.address();
    info!(address = %address, nick = %server.nick, "Connecting");
    let stream = TcpStream::connect(address.as_str()).await?;
    let (mut sink, mut lines) =
        Framed::new(stream, LinesCodec::new_with_max_length(MAX_LINE_LENGTH)).split();

    let (sender, mut outgoing) = LineSender::channel();
    let limiter = throttle.quota().map(RateLimiter::direct);

    let writer = tokio::spawn(async move {
        while let Some(line) = outgoing.recv().await {
            if let Some(limiter) = &limiter {
                limiter.until_ready().await;
            }
            if let Err(e) = sink.send(line).await {
                warn!(error = %e, "Write error");
                break;
            }
        }
        debug!("Writer finished");
    });

    bot.lock().connect(sender);

    while let Some(result) = lines.next().await {
        match result {
            Ok(line) => {
                let mut bot = bot.lock();
                if let Err(e) = bot.handle_line(&line) {
                    debug!(error = %e, code = e.error_code(), "Unparseable line");
                }
            }
            Err(e) => {
                warn!(error = %e, "Read error");
                break;
            }
        }
    }

    info!("Connection closed");
    bot.lock().disconnect();
    if let Err(e) = writer.await {
        warn!(error = %e, "Writer task failed");
    }
    Ok(())
}
