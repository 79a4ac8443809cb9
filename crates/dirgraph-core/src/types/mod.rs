//! Core directory identifier types.
//!
//! These types enforce their format at construction time,
//! ensuring invalid states are unrepresentable.

mod client_id;
mod endpoint_url;
mod tenant_id;

pub use client_id::ClientId;
pub use endpoint_url::EndpointUrl;
pub use tenant_id::TenantId;
