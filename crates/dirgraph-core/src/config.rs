//! Process configuration for talking to a directory tenant.

use std::time::Duration;

use crate::credentials::ClientSecret;
use crate::error::{ConfigError, Error};
use crate::types::{ClientId, EndpointUrl, TenantId};

/// Default OAuth2 authority.
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com/";

/// Default directory resource (also the token audience).
pub const DEFAULT_RESOURCE: &str = "https://graph.windows.net/";

/// Default `api-version` query parameter sent with every directory request.
pub const DEFAULT_API_VERSION: &str = "1.6";

/// Settings needed to authenticate against and query one tenant.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Tenant GUID or verified domain.
    pub tenant_id: TenantId,
    /// Registered application id.
    pub client_id: ClientId,
    /// Application secret; required only for the application flow.
    pub client_secret: Option<ClientSecret>,
    /// OAuth2 authority base, e.g. `https://login.microsoftonline.com/`.
    pub authority: EndpointUrl,
    /// Directory resource base; also requested as the token audience.
    pub resource: EndpointUrl,
    /// Value of the `api-version` query parameter.
    pub api_version: String,
    /// Per-request timeout applied by the HTTP client, if any.
    pub request_timeout: Option<Duration>,
}

impl DirectoryConfig {
    /// Start building a configuration.
    pub fn builder() -> DirectoryConfigBuilder {
        DirectoryConfigBuilder::default()
    }

    /// The per-tenant base every relative collection path is resolved against.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource and tenant do not form a valid URL.
    pub fn service_root(&self) -> Result<EndpointUrl, Error> {
        self.resource.child(self.tenant_id.as_str())
    }

    /// The tenant's OAuth2 token endpoint.
    pub fn token_endpoint(&self) -> String {
        self.authority.join(&format!("{}/oauth2/token", self.tenant_id))
    }
}

/// Builder for [`DirectoryConfig`].
///
/// Values are kept as strings until [`build`](Self::build) so a front end can
/// feed raw flags and environment values straight in.
#[derive(Debug, Default, Clone)]
pub struct DirectoryConfigBuilder {
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    authority: Option<String>,
    resource: Option<String>,
    api_version: Option<String>,
    request_timeout: Option<Duration>,
}

impl DirectoryConfigBuilder {
    pub fn tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = Some(authority.into());
        self
    }

    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validate and assemble the configuration.
    ///
    /// A missing client secret is allowed here; it is reported when the
    /// application flow is first used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an absent tenant or client id, or
    /// an input error for malformed values.
    pub fn build(self) -> Result<DirectoryConfig, Error> {
        let tenant_id = self
            .tenant_id
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing { name: "tenant_id" })?;
        let client_id = self
            .client_id
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing { name: "client_id" })?;

        let api_version = self
            .api_version
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Ok(DirectoryConfig {
            tenant_id: TenantId::new(tenant_id)?,
            client_id: ClientId::new(client_id)?,
            client_secret: self.client_secret.map(ClientSecret::new),
            authority: EndpointUrl::new(self.authority.as_deref().unwrap_or(DEFAULT_AUTHORITY))?,
            resource: EndpointUrl::new(self.resource.as_deref().unwrap_or(DEFAULT_RESOURCE))?,
            api_version,
            request_timeout: self.request_timeout,
        })
    }
}
