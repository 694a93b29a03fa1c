//! VyOS client: a thin async client for the VyOS HTTP configuration API.
//!
//! The library posts `set`/`delete`/`showConfig`/`save` actions to a router
//! and decodes its `{success, error, data}` envelope. See [`VyosClient`] for
//! the available operations.

pub mod api;
pub mod config;
pub mod transport;

pub use api::{ClientConfig, Error, IpVersion, ValidationError, VyosClient};
