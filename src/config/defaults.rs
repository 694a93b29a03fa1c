//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = crate::api::DEFAULT_TIMEOUT.as_secs();

/// Largest accepted request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// Default output path for `init`.
pub const CONFIG_FILE: &str = "vyos-client.toml";
