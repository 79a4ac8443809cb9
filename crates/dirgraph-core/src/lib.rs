//! dirgraph-core - Core types and traits for directory API clients.
//!
//! This crate holds everything that does not touch the network: validated
//! identifiers, tokens and their per-flow cache, the error taxonomy, and the
//! generic [`PagedCursor`] that walks any [`PageSource`].

pub mod config;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod paging;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use config::{DirectoryConfig, DirectoryConfigBuilder};
pub use credentials::ClientSecret;
pub use directory::{
    Application, Collection, Contact, Device, DirectoryObject, DirectoryRole, Domain, Group,
    OAuth2PermissionGrant, ServicePrincipal, SubscribedSku, TenantDetail, User, VerifiedDomain,
};
pub use error::{AuthError, ConfigError, Error, RequestError, RequestErrorKind};
pub use paging::{ContinuationToken, CursorState, Page, PagedCursor, Query};
pub use store::CredentialStore;
pub use tokens::{AccessToken, AuthFlow, Token};
pub use traits::{PageSource, TokenProvider};
pub use types::{ClientId, EndpointUrl, TenantId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
