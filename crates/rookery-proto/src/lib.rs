//! # rookery-proto
//!
//! Protocol-level building blocks for the rookery bot core: everything that
//! is a pure function of the bytes on the wire and carries no session state.
//!
//! ## Features
//!
//! - Lenient line parsing with IRCv3 tag sections, prefixes and trailing arguments
//! - `nick!user@host` prefix decomposition
//! - Case mappings (`ascii`, `rfc1459`, `rfc1459-strict`)
//! - ISUPPORT feature table with `PREFIX` and `CASEMAPPING` tracking
//! - `CAP` reply parsing
//!
//! ```rust
//! use rookery_proto::{Line, Response};
//!
//! let line: Line = ":irc.example.net 354 me 524 #chan u h nick H@ acct"
//!     .parse()
//!     .unwrap();
//! assert_eq!(line.command.parse::<Response>(), Ok(Response::RPL_WHOSPCRPL));
//! assert_eq!(line.destination(), "me");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod caps;
pub mod casemap;
pub mod chan;
pub mod error;
pub mod isupport;
pub mod line;
pub mod prefix;
pub mod response;

pub use self::caps::{CapReply, CapSubCommand, Capability};
pub use self::casemap::CaseMapping;
pub use self::chan::{mentions_channel, ChannelExt};
pub use self::error::ParseError;
pub use self::isupport::{FeatureTable, PrefixSpec};
pub use self::line::{sanitize_outbound, strip_line_ending, Line, LineRef};
pub use self::prefix::{Prefix, PrefixRef};
pub use self::response::Response;
