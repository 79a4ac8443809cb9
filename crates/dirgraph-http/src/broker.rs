//! OAuth2 token broker.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use dirgraph_core::error::{AuthError, ConfigError};
use dirgraph_core::{
    AccessToken, AuthFlow, ClientId, ClientSecret, CredentialStore, DirectoryConfig, Result,
    TenantId, Token, TokenProvider,
};

use crate::graph::{TokenErrorResponse, TokenResponse, build_http_client};

/// Lifetime assumed when the token endpoint reports no expiry.
const FALLBACK_LIFETIME_SECS: i64 = 3600;

/// Acquires and caches bearer tokens for both authentication flows.
///
/// Application tokens come from the tenant's token endpoint via the
/// client-credential grant. Delegated tokens cannot be obtained here; the
/// broker hands out the one it was seeded with.
///
/// Cloning is cheap and clones share the cache.
#[derive(Clone)]
pub struct TokenBroker {
    inner: Arc<BrokerInner>,
}

struct BrokerInner {
    http: reqwest::Client,
    config: DirectoryConfig,
    store: Arc<CredentialStore>,
    user_token: RwLock<Option<Token>>,
    // Held across check-then-fetch so concurrent callers make one request.
    acquire: Mutex<()>,
}

impl TokenBroker {
    /// Create a broker with its own empty credential store.
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(CredentialStore::new()))
    }

    /// Create a broker that caches into `store`.
    pub fn with_store(config: DirectoryConfig, store: Arc<CredentialStore>) -> Result<Self> {
        let http = build_http_client(config.request_timeout)?;
        Ok(Self {
            inner: Arc::new(BrokerInner {
                http,
                config,
                store,
                user_token: RwLock::new(None),
                acquire: Mutex::new(()),
            }),
        })
    }

    /// Returns the configuration the broker was built with.
    pub fn config(&self) -> &DirectoryConfig {
        &self.inner.config
    }

    /// Returns the shared credential store.
    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.inner.store
    }

    /// Provide the delegated user token handed out by [`acquire_user_token`](Self::acquire_user_token).
    pub fn set_user_token(&self, access_token: AccessToken, expires_at: DateTime<Utc>) {
        let token = Token::new(access_token, expires_at, AuthFlow::DelegatedUser);
        *self
            .inner
            .user_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token);
        self.inner.store.invalidate(AuthFlow::DelegatedUser);
    }

    /// Exchange client credentials for an application token.
    ///
    /// Returns the cached token while one is usable.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingClientSecret`] if `client_secret` is blank; no
    ///   request is made.
    /// - [`AuthError`] if the endpoint is unreachable, rejects the request or
    ///   answers with a body that holds no token.
    #[instrument(skip(self, client_secret), fields(%tenant_id, %client_id))]
    pub async fn acquire_application_token(
        &self,
        tenant_id: &TenantId,
        client_id: &ClientId,
        client_secret: &ClientSecret,
    ) -> Result<Token> {
        if client_secret.is_empty() {
            return Err(ConfigError::MissingClientSecret.into());
        }

        if let Some(token) = self.inner.store.get(AuthFlow::Application) {
            debug!("Using cached application token");
            return Ok(token);
        }

        let _guard = self.inner.acquire.lock().await;

        // Another caller may have filled the cache while we waited.
        if let Some(token) = self.inner.store.get(AuthFlow::Application) {
            debug!("Using cached application token");
            return Ok(token);
        }

        let token = self
            .request_application_token(tenant_id, client_id, client_secret)
            .await?;
        self.inner.store.insert(token.clone());

        info!(expires_at = %token.expires_at(), "Acquired application token");
        Ok(token)
    }

    /// Return the delegated user token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::ConsentRequired`] if no user token was provided.
    /// - [`AuthError::TokenExpired`] if the provided token has expired.
    #[instrument(skip(self))]
    pub async fn acquire_user_token(&self) -> Result<Token> {
        if let Some(token) = self.inner.store.get(AuthFlow::DelegatedUser) {
            debug!("Using cached user token");
            return Ok(token);
        }

        let seeded = self
            .inner
            .user_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        match seeded {
            None => Err(AuthError::ConsentRequired.into()),
            Some(token) if token.is_expired() => {
                warn!(expired_at = %token.expires_at(), "User token has expired");
                Err(AuthError::TokenExpired.into())
            }
            Some(token) => {
                // Near expiry the store stops serving it, but it still works.
                self.inner.store.insert(token.clone());
                Ok(token)
            }
        }
    }

    async fn request_application_token(
        &self,
        tenant_id: &TenantId,
        client_id: &ClientId,
        client_secret: &ClientSecret,
    ) -> Result<Token> {
        let config = &self.inner.config;
        let url = config
            .authority
            .join(&format!("{}/oauth2/token", tenant_id));

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.expose()),
            ("resource", config.resource.as_str()),
        ];

        debug!(%url, "Requesting application token");
        let response = self
            .inner
            .http
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AuthError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| AuthError::Transport {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let details: TokenErrorResponse = serde_json::from_str(&body).unwrap_or_default();
            warn!(%status, error = ?details.error, "Token endpoint rejected the request");
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                error: details.error,
                description: details.error_description,
            }
            .into());
        }

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::InvalidResponse {
                message: e.to_string(),
            })?;

        if let Some(token_type) = parsed.token_type.as_deref() {
            if !token_type.eq_ignore_ascii_case("bearer") {
                return Err(AuthError::InvalidResponse {
                    message: format!("unsupported token type '{}'", token_type),
                }
                .into());
            }
        }

        let access_token =
            AccessToken::new(parsed.access_token).map_err(|_| AuthError::InvalidResponse {
                message: "empty access token".to_string(),
            })?;

        let now = Utc::now();
        let expires_at = match (parsed.expires_in, parsed.expires_on) {
            (Some(secs), _) => Duration::try_seconds(secs)
                .and_then(|lifetime| now.checked_add_signed(lifetime))
                .ok_or_else(|| AuthError::InvalidResponse {
                    message: format!("expires_in out of range: {}", secs),
                })?,
            (None, Some(epoch)) => DateTime::from_timestamp(epoch, 0).unwrap_or(now),
            (None, None) => {
                warn!("Token response has no expiry; assuming one hour");
                now + Duration::seconds(FALLBACK_LIFETIME_SECS)
            }
        };

        Ok(Token::new(access_token, expires_at, AuthFlow::Application))
    }
}

#[async_trait]
impl TokenProvider for TokenBroker {
    async fn token(&self, flow: AuthFlow) -> Result<Token> {
        match flow {
            AuthFlow::Application => {
                let config = &self.inner.config;
                let secret = config
                    .client_secret
                    .as_ref()
                    .ok_or(ConfigError::MissingClientSecret)?;
                self.acquire_application_token(&config.tenant_id, &config.client_id, secret)
                    .await
            }
            AuthFlow::DelegatedUser => self.acquire_user_token().await,
        }
    }

    fn invalidate(&self, flow: AuthFlow) {
        self.inner.store.invalidate(flow);
        if flow == AuthFlow::DelegatedUser {
            // A rejected user token cannot be renewed here.
            self.inner
                .user_token
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
        }
    }
}

impl std::fmt::Debug for TokenBroker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBroker")
            .field("tenant_id", &self.inner.config.tenant_id)
            .field("client_id", &self.inner.config.client_id)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
