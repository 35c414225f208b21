//! State management module.
//!
//! The entity graph a bot rebuilds from the event stream: who is on which
//! channel, and with what standing. Nothing here is persisted; a graph lives
//! for one connection.

mod channel;
mod client;
mod graph;

pub use channel::{Channel, ChannelId, Membership};
pub use client::{ACCOUNT_UNKNOWN, Client, ClientId};
pub use graph::Graph;
