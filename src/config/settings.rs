//! Runtime settings filled in by directives.

use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::time::Duration;

use governor::Quota;
use nonzero_ext::nonzero;

use super::defaults::{default_throttle_burst, default_throttle_num, default_throttle_rate};

/// Where and as whom to connect (`server` directive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub nick: String,
    pub password: Option<String>,
}

impl ServerSettings {
    /// `host:port` for the connector.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Outbound flood control (`throttle` directive): up to `burst` lines at
/// once, then `num` lines every `rate` seconds. A rate of zero disables
/// throttling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    pub burst: u32,
    pub rate: u32,
    pub num: u32,
}

impl Default for Throttle {
    fn default() -> Self {
        Self {
            burst: default_throttle_burst(),
            rate: default_throttle_rate(),
            num: default_throttle_num(),
        }
    }
}

impl Throttle {
    /// Governor quota for this throttle, or `None` when unthrottled.
    pub fn quota(&self) -> Option<Quota> {
        if self.rate == 0 {
            return None;
        }
        let burst = NonZeroU32::new(self.burst).unwrap_or(nonzero!(1u32));
        let period = Duration::from_secs(u64::from(self.rate)) / self.num.max(1);
        Quota::with_period(period).map(|q| q.allow_burst(burst))
    }
}

/// Per-bot settings.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: Option<ServerSettings>,
    pub throttle: Throttle,
    values: BTreeMap<String, String>,
}

impl Settings {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Store a value, returning the previous one.
    pub fn set(&mut self, key: &str, value: &str) -> Option<String> {
        self.values.insert(key.to_owned(), value.to_owned())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Forget values set by directives (rehash boundary). Server and
    /// throttle settings stay until the directives set them again.
    pub fn clear_values(&mut self) {
        self.values.clear();
    }
}
