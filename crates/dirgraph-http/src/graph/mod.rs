//! HTTP plumbing for the directory service.
//!
//! This module provides the reqwest client that performs page requests and
//! the wire types both the client and the token broker decode.

mod client;
mod endpoints;

pub use client::GraphClient;
pub(crate) use client::build_http_client;
pub(crate) use endpoints::*;
