//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::api::IpVersion;

use super::defaults;

/// vyos-client: configure a VyOS router over its HTTP API
///
/// Every command performs one request. Changes only touch the running
/// configuration unless `--save` is given or `save` is run afterwards.
#[derive(Debug, Parser)]
#[command(name = "vyos-client")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Router API base URL, e.g. `https://192.0.2.1`
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// API key sent with every request
    #[arg(long = "api-key", global = true)]
    pub api_key: Option<String>,

    /// Accept invalid and self-signed TLS certificates
    #[arg(long = "skip-tls-verify", global = true)]
    pub skip_tls_verify: bool,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Save the configuration after a successful change
    #[arg(long, global = true)]
    pub save: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for vyos-client
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Set the MTU and optionally an address (CIDR) on an ethernet interface
    SetAddress {
        /// Interface name, e.g. eth1
        interface: String,
        /// Address in CIDR notation, e.g. 192.168.1.1/24
        address: Option<String>,
    },

    /// Delete one address, or all addresses, from an ethernet interface
    DeleteAddress {
        /// Interface name
        interface: String,
        /// Address in CIDR notation; omit to delete all addresses
        address: Option<String>,
    },

    /// Delete the configuration of an ethernet interface
    DeleteInterface {
        /// Interface name
        interface: String,
    },

    /// Create a source NAT rule
    AddSnat {
        /// Rule number
        rule: u32,
        /// Source address to match
        source: String,
        /// Address to translate to
        translation: String,
        /// Outbound interface
        interface: String,
    },

    /// Delete a source NAT rule
    DeleteSnat {
        /// Rule number
        rule: u32,
    },

    /// Create a destination NAT rule
    AddDnat {
        /// Rule number
        rule: u32,
        /// Destination address to match
        destination: String,
        /// Address to translate to
        translation: String,
        /// Inbound interface
        interface: String,
    },

    /// Delete a destination NAT rule
    DeleteDnat {
        /// Rule number
        rule: u32,
    },

    /// Add a static route
    AddRoute {
        /// Destination network in CIDR notation
        destination: String,
        /// Next-hop address
        next_hop: String,
        /// Address family of the route
        #[arg(long = "ip-version", value_enum)]
        ip_version: IpVersionArg,
    },

    /// Save the running configuration to the boot configuration
    Save,

    /// Print the running configuration as JSON
    ShowConfig,
}

impl Command {
    /// Returns true if the command changes the running configuration.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Self::Init { .. } | Self::Save | Self::ShowConfig)
    }
}

/// IP version argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IpVersionArg {
    /// IPv4 route
    #[value(name = "4", alias = "ipv4")]
    V4,
    /// IPv6 route
    #[value(name = "6", alias = "ipv6")]
    V6,
}

impl From<IpVersionArg> for IpVersion {
    fn from(arg: IpVersionArg) -> Self {
        match arg {
            IpVersionArg::V4 => Self::V4,
            IpVersionArg::V6 => Self::V6,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
