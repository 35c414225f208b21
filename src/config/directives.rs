//! Directive files.
//!
//! A directive file holds one directive per line: a name followed by
//! whitespace-separated words, where double quotes group a word containing
//! spaces (`\"` and `\\` escape inside quotes). Blank lines and lines whose
//! first word starts with `#` are skipped.
//!
//! ```text
//! server irc.example.net 6667 rookery
//! throttle 5 2 1
//! set greeting "hello there"
//! ```

use thiserror::Error;

/// A line that could not be split into words.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("dangling escape at end of line")]
    DanglingEscape,
}

/// One non-blank, non-comment line of a directive file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// 1-based line number.
    pub line_no: usize,
    pub raw: &'a str,
    pub words: Result<Vec<String>, TokenizeError>,
}

/// Split a line into words, honouring double quotes.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut words = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            break;
        };

        let mut word = String::new();
        if first == '"' {
            chars.next();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some(escaped) => word.push(escaped),
                        None => return Err(TokenizeError::DanglingEscape),
                    },
                    _ => word.push(c),
                }
            }
            if !closed {
                return Err(TokenizeError::UnterminatedQuote);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                word.push(c);
            }
        }
        words.push(word);
    }

    Ok(words)
}

/// Iterate over the directives in a file's contents.
pub fn parse(content: &str) -> impl Iterator<Item = Directive<'_>> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let trimmed = raw.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            Some(Directive {
                line_no: idx + 1,
                raw,
                words: tokenize(raw),
            })
        })
}
