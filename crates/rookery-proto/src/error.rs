//! Error types for the protocol library.

use thiserror::Error;

/// Convenience type alias for Results using [`ParseError`].
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Errors produced while turning a raw line into a [`Line`](crate::Line).
///
/// The parser is deliberately lenient: the only structural failure is a line
/// that carries nothing to dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Line was empty after stripping the line terminator.
    #[error("empty message")]
    EmptyMessage,

    /// Line had a prefix or tag section but no command token.
    #[error("missing command in line: {0:?}")]
    MissingCommand(String),
}

impl ParseError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "empty_message",
            Self::MissingCommand(_) => "missing_command",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ParseError::EmptyMessage.to_string(), "empty message");
        assert_eq!(
            ParseError::MissingCommand(":nick".into()).to_string(),
            "missing command in line: \":nick\""
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ParseError::EmptyMessage.error_code(), "empty_message");
        assert_eq!(
            ParseError::MissingCommand(String::new()).error_code(),
            "missing_command"
        );
    }
}
