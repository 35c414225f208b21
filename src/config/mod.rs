//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: process config (`rookery.toml`) and per-bot blocks
//! - [`directives`]: the line-oriented directive files each bot reads
//! - [`settings`]: runtime settings those directives fill in
//! - [`validation`]: startup checks

mod defaults;
pub mod directives;
mod settings;
mod types;
mod validation;

pub use directives::{Directive, TokenizeError};
pub use settings::{ServerSettings, Settings, Throttle};
pub use types::{BotConfig, Config, ConfigError, LogFormat};
pub use validation::{ValidationError, validate};
