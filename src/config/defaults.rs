//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Default log filter when `RUST_LOG` is unset.
pub fn default_log_level() -> String {
    "info".to_string()
}

/// Prefix marking chat text as a bot command.
pub fn default_command_prefix() -> String {
    "!".to_string()
}

pub fn default_realname() -> String {
    "rookery".to_string()
}

// =============================================================================
// Throttle Defaults
// =============================================================================

pub fn default_throttle_burst() -> u32 {
    5
}

pub fn default_throttle_rate() -> u32 {
    2
}

pub fn default_throttle_num() -> u32 {
    1
}
