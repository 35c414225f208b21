//! Unified error handling for rookery.
//!
//! Handler errors never abort a dispatch pass; the dispatcher decides per
//! variant whether an operator gets to see them.

use rookery_proto::ParseError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::transport::TransportError;

// ============================================================================
// Handler Errors (event processing)
// ============================================================================

/// Errors a handler can return from one invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A directive or command was used wrongly. Reported through the event's
    /// error target so whoever issued it sees the message.
    #[error("{0}")]
    Configuration(String),

    #[error("not enough parameters")]
    NeedMoreParams,

    #[error("send error: {0}")]
    Transport(#[from] TransportError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Shorthand for a reportable configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::NeedMoreParams => "need_more_params",
            Self::Transport(_) => "transport",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the error goes back to the event's issuer rather than the log.
    pub fn is_reportable(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::NeedMoreParams | Self::Config(_)
        )
    }
}

/// Result type for event handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Bot Errors (instance lifecycle)
// ============================================================================

/// Errors from bot construction and the instance directory.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("a bot named {0:?} already exists")]
    DuplicateName(String),

    #[error("no bot named {0:?}")]
    NotFound(String),

    #[error("bot {0:?} has no server configured")]
    NoServer(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "duplicate_name",
            Self::NotFound(_) => "not_found",
            Self::NoServer(_) => "no_server",
            Self::Parse(e) => e.error_code(),
            Self::Config(_) => "config",
            Self::Transport(_) => "transport",
            Self::Io(_) => "io",
        }
    }
}
