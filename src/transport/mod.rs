//! HTTP transport used to reach the router API.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client abstraction ([`HttpClient`]), so tests can swap in a mock
//! - The production implementation on top of reqwest ([`ReqwestClient`])

mod client;
mod error;
mod request;

#[cfg(test)]
mod client_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};
