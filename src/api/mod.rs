//! Client for the VyOS HTTP configuration API.
//!
//! This module provides:
//! - Configuration actions and their wire encoding ([`Action`], [`Operation`], [`Endpoint`])
//! - The response envelope decoder ([`Envelope`])
//! - Address validation helpers ([`IpVersion`], [`parse_cidr`], [`parse_ip`])
//! - The router client itself ([`VyosClient`], [`ClientConfig`])
//!
//! Every mutating call only changes the running configuration. Call
//! [`VyosClient::save_config`] afterwards to keep the change across reboots.

mod action;
mod address;
mod client;
mod error;
mod response;
mod settings;

#[cfg(test)]
mod address_tests;
#[cfg(test)]
mod test_fixtures;

pub use action::{Action, Endpoint, Operation, encode_form};
pub use address::{IpVersion, family_of, parse_cidr, parse_ip};
pub use client::VyosClient;
pub use error::{Error, ValidationError};
pub use response::Envelope;
pub use settings::{ClientConfig, DEFAULT_TIMEOUT, FORM_CONTENT_TYPE, normalize_host};
