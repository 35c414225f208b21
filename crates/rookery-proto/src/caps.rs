//! IRCv3 capability negotiation support.
//!
//! Only the client side is covered: reading `CAP` replies and naming the
//! capabilities the bot core reacts to.
//!
//! # Reference
//! - IRCv3 Capability Negotiation: <https://ircv3.net/specs/extensions/capability-negotiation>

use std::fmt;

/// Capabilities the bot core knows by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Capability {
    /// Notify of account login/logout
    AccountNotify,
    /// Extended JOIN with account and realname
    ExtendedJoin,
    /// Unknown/custom capability
    Custom(String),
}

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        match self {
            Self::AccountNotify => "account-notify",
            Self::ExtendedJoin => "extended-join",
            Self::Custom(s) => s,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        match s {
            "account-notify" => Self::AccountNotify,
            "extended-join" => Self::ExtendedJoin,
            other => Self::Custom(other.to_owned()),
        }
    }
}

/// CAP subcommands a client sees in server replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapSubCommand {
    /// List of offered capabilities.
    Ls,
    /// Currently enabled capabilities.
    List,
    /// Request accepted.
    Ack,
    /// Request rejected.
    Nak,
    /// Capabilities newly offered (cap-notify).
    New,
    /// Capabilities withdrawn (cap-notify).
    Del,
}

impl CapSubCommand {
    /// Parse a subcommand token, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "LS" => Some(Self::Ls),
            "LIST" => Some(Self::List),
            "ACK" => Some(Self::Ack),
            "NAK" => Some(Self::Nak),
            "NEW" => Some(Self::New),
            "DEL" => Some(Self::Del),
            _ => None,
        }
    }

    /// Wire form of the subcommand.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ls => "LS",
            Self::List => "LIST",
            Self::Ack => "ACK",
            Self::Nak => "NAK",
            Self::New => "NEW",
            Self::Del => "DEL",
        }
    }
}

/// One parsed `CAP` reply.
///
/// ```
/// use rookery_proto::caps::{CapReply, CapSubCommand};
///
/// let reply = CapReply::parse(&["*", "LS", "*", "sasl=PLAIN extended-join"]).unwrap();
/// assert_eq!(reply.subcommand, CapSubCommand::Ls);
/// assert!(reply.more);
/// assert_eq!(reply.caps, vec!["sasl", "extended-join"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapReply {
    /// Which subcommand this reply carries.
    pub subcommand: CapSubCommand,
    /// True when this is a non-final line of a multi-line reply.
    pub more: bool,
    /// Capability names with any `=value` stripped.
    pub caps: Vec<String>,
}

impl CapReply {
    /// Parse the arguments of a `CAP` line: `<target> <sub> [*] :<caps>`.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Option<Self> {
        let sub = CapSubCommand::parse(args.get(1)?.as_ref())?;
        let (more, list) = match args.get(2).map(AsRef::as_ref) {
            Some("*") if args.len() > 3 => (true, args.get(3).map(AsRef::as_ref)),
            other => (false, other),
        };
        let caps = list
            .unwrap_or("")
            .split_whitespace()
            .map(|c| c.split_once('=').map_or(c, |(name, _)| name).to_owned())
            .collect();
        Some(Self {
            subcommand: sub,
            more,
            caps,
        })
    }
}
