//! Building sessions from command-line settings.

pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use tracing::{debug, warn};

use dirgraph_core::{AccessToken, AuthFlow, DirectoryConfig};
use dirgraph_http::{DirectorySession, TokenBroker};

use crate::cli::ConnectionArgs;

/// Lifetime assumed for a token passed with `--user-token`.
const PASSED_TOKEN_LIFETIME_MINS: i64 = 60;

/// A configured broker plus the settings it was built from.
pub struct Connection {
    pub config: DirectoryConfig,
    pub broker: Arc<TokenBroker>,
}

impl Connection {
    /// Validate settings and seed the broker with any available user token.
    ///
    /// A `--user-token` value wins over the token saved by `login`.
    pub fn open(args: &ConnectionArgs) -> Result<Self> {
        let config = args.config()?;
        let broker = TokenBroker::new(config.clone()).context("Failed to create token broker")?;

        if let Some(raw) = args.user_token.as_deref().filter(|t| !t.trim().is_empty()) {
            debug!("Using user token from the command line");
            let token = AccessToken::new(raw).context("Invalid user token")?;
            broker.set_user_token(token, Utc::now() + Duration::minutes(PASSED_TOKEN_LIFETIME_MINS));
        } else if let Some(login) = storage::load_login()? {
            if login
                .tenant_id
                .as_deref()
                .is_some_and(|t| !t.eq_ignore_ascii_case(config.tenant_id.as_str()))
            {
                warn!(
                    stored = login.tenant_id.as_deref().unwrap_or_default(),
                    "Stored login belongs to another tenant; ignoring it"
                );
            } else {
                debug!(expires_at = %login.expires_at, "Using stored user token");
                broker.set_user_token(login.access_token()?, login.expires_at);
            }
        }

        Ok(Self {
            config,
            broker: Arc::new(broker),
        })
    }

    /// A directory session under `flow` sharing this connection's broker.
    pub fn session(&self, flow: AuthFlow) -> Result<DirectorySession> {
        DirectorySession::connect(&self.config, flow, self.broker.clone())
            .context("Failed to create directory session")
    }
}
