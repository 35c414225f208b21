//! IRC case-mapping functions.
//!
//! Nicknames and channel names compare case-insensitively, and on most
//! networks some punctuation folds too (e.g., `[` and `{`). The network
//! advertises its rules through the `CASEMAPPING` feature token; this module
//! implements the three mappings in common use.

/// A case-folding rule advertised by the server via `CASEMAPPING`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaseMapping {
    /// Plain ASCII folding (`A`-`Z` only).
    Ascii,
    /// RFC 1459 folding: ASCII plus `[]\~` → `{}|^`.
    #[default]
    Rfc1459,
    /// RFC 1459 folding without the `~` → `^` pair.
    Rfc1459Strict,
}

impl CaseMapping {
    /// Look up a mapping by its `CASEMAPPING` token value.
    ///
    /// Unknown values return `None`; callers keep their current mapping.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "ascii" => Some(Self::Ascii),
            "rfc1459" => Some(Self::Rfc1459),
            "rfc1459-strict" | "strict-rfc1459" => Some(Self::Rfc1459Strict),
            _ => None,
        }
    }

    /// The token name the server uses for this mapping.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Rfc1459 => "rfc1459",
            Self::Rfc1459Strict => "rfc1459-strict",
        }
    }

    /// Fold a single character under this mapping.
    #[inline]
    pub const fn lower_char(&self, c: char) -> char {
        match (*self, c) {
            (_, 'A'..='Z') => (c as u8 + 32) as char,
            (Self::Ascii, _) => c,
            (_, '[') => '{',
            (_, ']') => '}',
            (_, '\\') => '|',
            (Self::Rfc1459, '~') => '^',
            _ => c,
        }
    }

    /// Fold a whole string under this mapping.
    pub fn fold(&self, s: &str) -> String {
        s.chars().map(|c| self.lower_char(c)).collect()
    }

    /// Compare two strings for equality under this mapping.
    pub fn equals(&self, a: &str, b: &str) -> bool {
        if a.len() != b.len() {
            return false;
        }

        a.chars()
            .zip(b.chars())
            .all(|(ca, cb)| self.lower_char(ca) == self.lower_char(cb))
    }
}
