//! ISUPPORT (005) feature table.
//!
//! Servers advertise optional features as `KEY` or `KEY=value` tokens spread
//! over one or more `RPL_ISUPPORT` replies, and may withdraw one later with
//! `-KEY`. [`FeatureTable`] accumulates them for the lifetime of a connection
//! and exposes the handful the bot core cares about.
//!
//! # Reference
//! - <https://modern.ircdocs.horse/#rplisupport-005>

use std::collections::BTreeMap;

use crate::casemap::CaseMapping;
use crate::chan::DEFAULT_CHANTYPES;

/// Prefix mapping from the `PREFIX` token, e.g. `(ov)@+`.
///
/// ```
/// use rookery_proto::isupport::PrefixSpec;
///
/// let spec = PrefixSpec::parse("(qaohv)~&@%+").unwrap();
/// assert_eq!(spec.mode_for_prefix('@'), Some('o'));
/// assert_eq!(spec.prefix_for_mode('v'), Some('+'));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixSpec {
    /// Mode characters, highest rank first.
    pub modes: String,
    /// Prefix symbols, in the same order as `modes`.
    pub prefixes: String,
}

impl Default for PrefixSpec {
    fn default() -> Self {
        Self {
            modes: "ov".to_owned(),
            prefixes: "@+".to_owned(),
        }
    }
}

impl PrefixSpec {
    /// Parse a `PREFIX` value like `(ov)@+`.
    ///
    /// Returns `None` when the parentheses are missing or the two halves
    /// differ in length.
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.strip_prefix('(')?;
        let (modes, prefixes) = inner.split_once(')')?;
        if modes.chars().count() != prefixes.chars().count() {
            return None;
        }
        Some(Self {
            modes: modes.to_owned(),
            prefixes: prefixes.to_owned(),
        })
    }

    /// Mode character for a prefix symbol (`@` → `o`).
    pub fn mode_for_prefix(&self, prefix: char) -> Option<char> {
        let idx = self.prefixes.chars().position(|p| p == prefix)?;
        self.modes.chars().nth(idx)
    }

    /// Prefix symbol for a mode character (`o` → `@`).
    pub fn prefix_for_mode(&self, mode: char) -> Option<char> {
        let idx = self.modes.chars().position(|m| m == mode)?;
        self.prefixes.chars().nth(idx)
    }

    /// Whether a character is one of the advertised prefix symbols.
    #[inline]
    pub fn is_prefix(&self, c: char) -> bool {
        self.prefixes.contains(c)
    }
}

/// Accumulated ISUPPORT tokens for one connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureTable {
    entries: BTreeMap<String, Option<String>>,
    prefix: PrefixSpec,
    casemapping: CaseMapping,
}

impl FeatureTable {
    /// Create an empty table with protocol defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the arguments of one `RPL_ISUPPORT` reply.
    ///
    /// The first argument (our nick) is skipped. When more than one argument
    /// follows it, the last is the human-readable description and is skipped
    /// too, whatever its wording. Returns the keys that were not present
    /// before, in reply order.
    pub fn apply_reply<S: AsRef<str>>(&mut self, args: &[S]) -> Vec<String> {
        let tokens = match args.get(1..) {
            Some(rest) if rest.len() > 1 => &rest[..rest.len() - 1],
            Some(rest) => rest,
            None => &[],
        };
        self.apply_tokens(tokens.iter().map(AsRef::as_ref))
    }

    /// Apply raw `KEY`, `KEY=value` and `-KEY` tokens.
    ///
    /// Returns the keys that were not present before.
    pub fn apply_tokens<'t, I>(&mut self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'t str>,
    {
        let mut added = Vec::new();
        for token in tokens {
            if token.is_empty() {
                continue;
            }
            if let Some(key) = token.strip_prefix('-') {
                self.remove(key);
                continue;
            }
            let (key, value) = match token.split_once('=') {
                Some((k, v)) => (k.to_ascii_uppercase(), Some(v.to_owned())),
                None => (token.to_ascii_uppercase(), None),
            };
            self.update_cached(&key, value.as_deref());
            if self.entries.insert(key.clone(), value).is_none() {
                added.push(key);
            }
        }
        added
    }

    fn remove(&mut self, key: &str) {
        let key = key.to_ascii_uppercase();
        self.entries.remove(&key);
        self.update_cached(&key, None);
    }

    fn update_cached(&mut self, key: &str, value: Option<&str>) {
        match key {
            "PREFIX" => {
                self.prefix = value.and_then(PrefixSpec::parse).unwrap_or_default();
            }
            "CASEMAPPING" => {
                self.casemapping = value.and_then(CaseMapping::from_token).unwrap_or_default();
            }
            _ => {}
        }
    }

    /// Whether a key has been advertised (with or without a value).
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_uppercase())
    }

    /// Look up a key: `Some(Some(v))` with value, `Some(None)` bare, `None` absent.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .get(&key.to_ascii_uppercase())
            .map(|v| v.as_deref())
    }

    /// The active prefix mapping.
    pub fn prefix(&self) -> &PrefixSpec {
        &self.prefix
    }

    /// The active case mapping.
    pub fn casemapping(&self) -> CaseMapping {
        self.casemapping
    }

    /// Advertised channel types, or `#&`.
    pub fn chantypes(&self) -> &str {
        self.get("CHANTYPES").flatten().unwrap_or(DEFAULT_CHANTYPES)
    }

    /// Advertised network name.
    pub fn network(&self) -> Option<&str> {
        self.get("NETWORK").flatten()
    }

    /// Translate a membership prefix symbol to its mode character.
    pub fn mode_for_prefix(&self, prefix: char) -> Option<char> {
        self.prefix.mode_for_prefix(prefix)
    }

    /// Iterate over all advertised keys and values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}
