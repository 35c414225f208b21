//! rookery - the protocol core of an IRC bot framework.
//!
//! A [`Bot`] turns raw protocol lines into [`Event`]s and routes them through
//! a predicate-filtered dispatcher. The built-in handlers keep an entity
//! graph of clients, channels and memberships in step with what the server
//! reports, using `WHO`/`WHOX` replies and IRCv3 account tracking whenever
//! the server supports them.
//!
//! ```
//! use rookery::{Bot, Recorder};
//!
//! let out = Recorder::new();
//! let mut bot = Bot::new("demo");
//! bot.connect(out.clone());
//! bot.handle_line(":irc.example.net 001 demo :Welcome").unwrap();
//! bot.handle_line(":demo!d@host JOIN #rust").unwrap();
//!
//! assert!(bot.graph().channel_by_name("#rust").is_some());
//! assert_eq!(out.lines().last().map(String::as_str), Some("WHO #rust"));
//! ```

pub mod auth;
pub mod bot;
pub mod capabilities;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod handlers;
pub mod manager;
pub mod network;
pub mod state;
pub mod transport;

pub use auth::{Authorizer, DenyAll, StaticPrivileges};
pub use bot::Bot;
pub use capabilities::{CapNegotiation, FeatureFlags};
pub use dispatch::{HandlerId, Predicate};
pub use error::{BotError, HandlerError, HandlerResult};
pub use event::{Event, Origin, ReplyTarget, Source};
pub use manager::{BotHandle, BotManager};
pub use state::{Channel, ChannelId, Client, ClientId, Graph, Membership};
pub use transport::{LineSender, Recorder, Transport, TransportError};
