//! Configuration layer for the `vyos-client` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments**
//! 2. **TOML config file**
//! 3. **Built-in defaults**
//!
//! `host` has no default and must come from the CLI or the file.
//!
//! # Boolean Flag Semantics
//!
//! `--skip-tls-verify` and `--save` use OR semantics: if either the CLI or
//! the TOML file enables them, they are enabled. Flags only enable, never
//! disable.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, IpVersionArg};
pub use error::{ConfigError, field};
pub use self::toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
