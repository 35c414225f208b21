//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::collections::HashSet;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one [[bot]] block is required")]
    NoBots,
    #[error("bot name must not be empty")]
    EmptyBotName,
    #[error("bot name {0:?} is used more than once")]
    DuplicateBotName(String),
    #[error("bot {0:?}: command_prefix must not be empty")]
    EmptyCommandPrefix(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.bots.is_empty() {
        errors.push(ValidationError::NoBots);
    }

    let mut seen = HashSet::new();
    for bot in &config.bots {
        if bot.name.trim().is_empty() {
            errors.push(ValidationError::EmptyBotName);
            continue;
        }
        if !seen.insert(bot.name.as_str()) {
            errors.push(ValidationError::DuplicateBotName(bot.name.clone()));
        }
        if bot.command_prefix.is_empty() {
            errors.push(ValidationError::EmptyCommandPrefix(bot.name.clone()));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
