//! Negotiated capability and advertised feature tracking.
//!
//! Flags only ever turn on during a session. Nothing may assume one is set:
//! with all of them off the bot falls back to plain `WHO` replies and no
//! live account updates.

use std::collections::BTreeSet;

use rookery_proto::Capability;

/// `ISUPPORT` key advertising extended WHO support.
pub const WHOX_FEATURE: &str = "WHOX";

/// Capabilities always requested.
pub const DEFAULT_CAPABILITIES: &[&str] = &["account-notify", "extended-join"];

/// The three switches gating identity tracking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Server advertised `WHOX`.
    pub whox: bool,
    /// `account-notify` was acknowledged.
    pub account_notify: bool,
    /// `extended-join` was acknowledged.
    pub extended_join: bool,
}

impl FeatureFlags {
    /// Account names can be followed for every visible client.
    #[inline]
    pub fn identity_tracking(&self) -> bool {
        self.whox && self.account_notify && self.extended_join
    }

    /// Record an acknowledged capability. Returns `true` if a flag changed.
    pub fn enable_capability(&mut self, name: &str) -> bool {
        let flag = match Capability::from(name) {
            Capability::AccountNotify => &mut self.account_notify,
            Capability::ExtendedJoin => &mut self.extended_join,
            _ => return false,
        };
        !std::mem::replace(flag, true)
    }

    /// Record an advertised feature. Returns `true` if a flag changed.
    pub fn enable_feature(&mut self, key: &str) -> bool {
        if key.eq_ignore_ascii_case(WHOX_FEATURE) {
            !std::mem::replace(&mut self.whox, true)
        } else {
            false
        }
    }
}

/// Client side of `CAP` negotiation for one connection.
#[derive(Clone, Debug, Default)]
pub struct CapNegotiation {
    wanted: BTreeSet<String>,
    offered: BTreeSet<String>,
    enabled: BTreeSet<String>,
    in_progress: bool,
}

impl CapNegotiation {
    pub fn new<I, S>(wanted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            wanted: wanted.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Forget everything learned from the previous connection.
    pub fn reset(&mut self) {
        self.offered.clear();
        self.enabled.clear();
        self.in_progress = false;
    }

    /// Negotiation started (`CAP LS` sent).
    pub fn begin(&mut self) {
        self.reset();
        self.in_progress = true;
    }

    #[inline]
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Negotiation ended (`CAP END` sent).
    pub fn finish(&mut self) {
        self.in_progress = false;
    }

    /// Note offered caps from one `CAP LS` line.
    pub fn offer<I, S>(&mut self, caps: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.offered.extend(caps.into_iter().map(Into::into));
    }

    /// Wanted caps the server offered and that are not yet enabled.
    pub fn to_request(&self) -> Vec<String> {
        self.wanted
            .intersection(&self.offered)
            .filter(|c| !self.enabled.contains(*c))
            .cloned()
            .collect()
    }

    /// Record an acknowledged cap. Returns `false` for caps already enabled.
    pub fn acknowledge(&mut self, cap: &str) -> bool {
        self.enabled.insert(cap.to_owned())
    }

    pub fn is_enabled(&self, cap: &str) -> bool {
        self.enabled.contains(cap)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }

    pub fn wanted(&self) -> impl Iterator<Item = &str> {
        self.wanted.iter().map(String::as_str)
    }
}
