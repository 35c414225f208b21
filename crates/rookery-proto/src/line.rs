//! Raw protocol line parsing.
//!
//! [`LineRef`] borrows from the input and is the single parser
//! implementation; [`Line`] is its owned form for callers that keep the data
//! around (events, queues).
//!
//! Grammar, as the bot sees it:
//!
//! ```text
//! [@tags SPACE] [:prefix SPACE] command {SPACE arg} [SPACE :trailing]
//! ```
//!
//! Arguments split on single spaces, so runs of spaces yield empty
//! arguments. The first argument starting with `:` swallows the rest of the
//! line, spaces included, as one final argument.

use smallvec::SmallVec;

use crate::error::ParseError;
use crate::prefix::{Prefix, PrefixRef};

/// Strip a single trailing CR and/or LF.
#[inline]
pub fn strip_line_ending(s: &str) -> &str {
    let s = s.strip_suffix('\n').unwrap_or(s);
    s.strip_suffix('\r').unwrap_or(s)
}

/// Truncate an outbound line at its first CR or LF.
///
/// Anything after an embedded line break would reach the server as a second,
/// unintended command.
#[inline]
pub fn sanitize_outbound(s: &str) -> &str {
    match s.find(['\r', '\n']) {
        Some(idx) => &s[..idx],
        None => s,
    }
}

#[inline]
fn split_token(s: &str) -> (&str, Option<&str>) {
    match s.split_once(' ') {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

/// A borrowed, parsed protocol line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineRef<'a> {
    /// The line with its terminator stripped.
    pub raw: &'a str,
    /// Raw IRCv3 tag section (without the leading `@`), if present.
    pub tags: Option<&'a str>,
    /// Decomposed source prefix, if present.
    pub prefix: Option<PrefixRef<'a>>,
    /// Command name or numeric, as sent.
    pub command: &'a str,
    /// Positional arguments, trailing argument included.
    pub args: SmallVec<[&'a str; 8]>,
}

impl<'a> LineRef<'a> {
    /// Parse one raw line.
    ///
    /// ```
    /// use rookery_proto::LineRef;
    ///
    /// let line = LineRef::parse(":nick!user@host JOIN #chan\r\n").unwrap();
    /// assert_eq!(line.command, "JOIN");
    /// assert_eq!(line.destination(), "#chan");
    /// ```
    pub fn parse(s: &'a str) -> Result<Self, ParseError> {
        let raw = strip_line_ending(s);
        if raw.is_empty() {
            return Err(ParseError::EmptyMessage);
        }

        let mut rest = raw;

        let mut tags = None;
        if let Some(stripped) = rest.strip_prefix('@') {
            let (t, tail) = split_token(stripped);
            tags = Some(t);
            rest = tail.unwrap_or("");
        }

        let mut prefix = None;
        if let Some(stripped) = rest.strip_prefix(':') {
            let (p, tail) = split_token(stripped);
            prefix = Some(PrefixRef::parse(p));
            rest = tail.unwrap_or("");
        }

        let (command, mut remaining) = split_token(rest.trim_start_matches(' '));
        if command.is_empty() {
            return Err(ParseError::MissingCommand(raw.to_owned()));
        }

        let mut args = SmallVec::new();
        while let Some(r) = remaining {
            if let Some(trailing) = r.strip_prefix(':') {
                args.push(trailing);
                break;
            }
            let (token, tail) = split_token(r);
            args.push(token);
            remaining = tail;
        }

        Ok(Self {
            raw,
            tags,
            prefix,
            command,
            args,
        })
    }

    /// Get a specific argument by index.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// The first argument, or `""` when there is none.
    #[inline]
    pub fn destination(&self) -> &'a str {
        self.arg(0).unwrap_or("")
    }

    /// Source nickname from the prefix, if present.
    #[inline]
    pub fn source_nick(&self) -> Option<&'a str> {
        self.prefix.as_ref().map(|p| p.nick)
    }

    /// Get the value of a tag by key; valueless tags yield `""`.
    pub fn tag_value(&self, key: &str) -> Option<&'a str> {
        let tags = self.tags?;
        for tag in tags.split(';') {
            match tag.split_once('=') {
                Some((k, v)) if k == key => return Some(v),
                None if tag == key => return Some(""),
                _ => {}
            }
        }
        None
    }

    /// Convert to an owned [`Line`].
    pub fn to_owned(&self) -> Line {
        Line {
            raw: self.raw.to_owned(),
            tags: self.tags.map(str::to_owned),
            prefix: self.prefix.as_ref().map(PrefixRef::to_owned),
            command: self.command.to_owned(),
            args: self.args.iter().map(|a| (*a).to_owned()).collect(),
        }
    }
}

/// An owned, parsed protocol line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line with its terminator stripped.
    pub raw: String,
    /// Raw IRCv3 tag section (without the leading `@`), if present.
    pub tags: Option<String>,
    /// Decomposed source prefix, if present.
    pub prefix: Option<Prefix>,
    /// Command name or numeric, as sent.
    pub command: String,
    /// Positional arguments, trailing argument included.
    pub args: Vec<String>,
}

impl Line {
    /// Parse one raw line into an owned value.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        LineRef::parse(s).map(|l| l.to_owned())
    }

    /// Get a specific argument by index.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// The first argument, or `""` when there is none.
    #[inline]
    pub fn destination(&self) -> &str {
        self.arg(0).unwrap_or("")
    }
}

impl std::str::FromStr for Line {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Line::parse(s)
    }
}
