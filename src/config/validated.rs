//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the binary. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::api::{ClientConfig, normalize_host};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the binary.
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional
/// TOML config.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Settings for the router client
    pub client: ClientConfig,

    /// Save the configuration after a successful change
    pub save: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ host: {}, api_key: {}, skip_tls_verify: {}, timeout: {}s, save: {} }}",
            self.client.host,
            if self.client.api_key.is_empty() {
                "none"
            } else {
                "set"
            },
            self.client.skip_tls_verify,
            self.client.timeout.as_secs(),
            self.save,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `host` is missing, not an http(s) URL, or carries a query or fragment
    /// - The timeout exceeds [`defaults::MAX_TIMEOUT_SECS`]
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let host = Self::resolve_host(cli, toml)?;
        let api_key = Self::resolve_api_key(cli, toml);
        let timeout = Self::resolve_timeout(cli, toml)?;

        let skip_tls_verify = cli.skip_tls_verify || toml.is_some_and(|t| t.router.skip_tls_verify);
        let save = cli.save || toml.is_some_and(|t| t.behavior.save);

        let client = ClientConfig::new(host)
            .with_api_key(api_key)
            .with_skip_tls_verify(skip_tls_verify)
            .with_timeout(timeout);

        Ok(Self {
            client,
            save,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_host(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        let host = cli
            .host
            .as_deref()
            .or_else(|| toml.and_then(|t| t.router.host.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(field::HOST, "Use --host or set router.host in config file")
            })?;

        normalize_host(host).map_err(|reason| ConfigError::InvalidUrl {
            url: host.to_string(),
            reason,
        })?;

        Ok(host.to_string())
    }

    fn resolve_api_key(cli: &Cli, toml: Option<&TomlConfig>) -> String {
        cli.api_key
            .clone()
            .or_else(|| toml.and_then(|t| t.router.api_key.clone()))
            .unwrap_or_default()
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.router.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds > defaults::MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: format!("must be at most {} seconds", defaults::MAX_TIMEOUT_SECS),
            });
        }

        Ok(Duration::from_secs(seconds))
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
