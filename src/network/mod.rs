//! Network runner.
//!
//! Connects one bot to its configured server and pumps lines in both
//! directions until the connection ends. There is no reconnect: when the
//! socket closes the bot is disconnected and the runner returns.

mod connection;

pub use connection::{MAX_LINE_LENGTH, run};
