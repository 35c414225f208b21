//! Core configuration types and loading.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::{default_command_prefix, default_log_level, default_realname};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Invalid(_) => "invalid",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Process configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
    /// Bot instances to run.
    #[serde(default, rename = "bot")]
    pub bots: Vec<BotConfig>,
    /// Directory the config file lives in; relative paths resolve against it.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Directive file for a bot, resolved against the config's directory.
    pub fn directives_path(&self, bot: &BotConfig) -> PathBuf {
        let file = bot
            .directives
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.conf", bot.name)));
        if file.is_absolute() {
            file
        } else {
            self.base_dir.join(file)
        }
    }
}

/// One bot instance.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Instance name, unique within the process.
    pub name: String,
    /// Directive file; defaults to `<name>.conf` next to the config file.
    pub directives: Option<PathBuf>,
    /// Prefix marking channel text as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// Real name sent during registration.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// Account name -> privilege names.
    #[serde(default)]
    pub privileges: BTreeMap<String, Vec<String>>,
    /// Capabilities requested in addition to the built-in ones.
    #[serde(default)]
    pub capabilities: Vec<String>,
}
