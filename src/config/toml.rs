//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Router connection section
    #[serde(default)]
    pub router: RouterSection,

    /// Command behavior section
    #[serde(default)]
    pub behavior: BehaviorSection,
}

/// Router connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterSection {
    /// Router API base URL
    pub host: Option<String>,

    /// API key sent with every request
    pub api_key: Option<String>,

    /// Accept invalid and self-signed certificates
    #[serde(default)]
    pub skip_tls_verify: bool,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Command behavior section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorSection {
    /// Save the configuration after every successful change
    #[serde(default)]
    pub save: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# vyos-client configuration file

[router]
# Router API base URL (required)
# host = "https://192.0.2.1"

# API key configured under `service https api keys` on the router
# api_key = "your-key-here"

# Accept invalid and self-signed certificates
# skip_tls_verify = false

# Request timeout in seconds (default: 30, 0 disables the timeout)
# timeout = 30

[behavior]
# Save the configuration after every successful change
# Without this, changes are lost when the router reboots
# save = false
"#
    .to_string()
}
