//! Outbound line sinks.
//!
//! A [`Bot`](crate::Bot) never touches sockets itself. It hands finished
//! lines to a [`Transport`], which is either the network runner's channel
//! ([`LineSender`]) or an in-memory [`Recorder`].

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors raised while handing a line to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("not connected")]
    NotConnected,

    #[error("transport closed")]
    Closed,
}

/// A sink for outbound protocol lines (without line terminators).
pub trait Transport: Send {
    /// Queue one line for transmission.
    fn send_line(&mut self, line: &str) -> Result<(), TransportError>;
}

/// Transport backed by an unbounded tokio channel; the network runner owns
/// the receiving end and writes lines to the socket.
#[derive(Debug, Clone)]
pub struct LineSender {
    tx: mpsc::UnboundedSender<String>,
}

impl LineSender {
    /// Create a sender together with the receiver the writer task drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Transport for LineSender {
    fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.tx
            .send(line.to_owned())
            .map_err(|_| TransportError::Closed)
    }
}

/// Transport that keeps every line in memory.
///
/// Clones share the same buffer, so a test can keep one handle while the bot
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line sent so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Drain the recorded lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Transport for Recorder {
    fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.lines.lock().push(line.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_shares_buffer() {
        let recorder = Recorder::new();
        let mut handle = recorder.clone();
        handle.send_line("PING :x").unwrap();
        assert_eq!(recorder.lines(), vec!["PING :x"]);
        assert_eq!(recorder.take(), vec!["PING :x"]);
        assert!(recorder.lines().is_empty());
    }

    #[test]
    fn test_line_sender_closed() {
        let (mut sender, rx) = LineSender::channel();
        sender.send_line("NICK a").unwrap();
        drop(rx);
        assert_eq!(sender.send_line("NICK b"), Err(TransportError::Closed));
    }
}
