//! Per-flow token cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::tokens::{AuthFlow, Token};

/// Default margin before expiry at which a cached token stops being served.
pub const DEFAULT_EXPIRY_SKEW_SECS: i64 = 300;

/// Holds at most one token per [`AuthFlow`].
///
/// The store is an explicit object owned by a token provider and shared with
/// the sessions that use it, so each test can build an isolated one.
/// Readers never block each other.
#[derive(Debug)]
pub struct CredentialStore {
    tokens: RwLock<HashMap<AuthFlow, Token>>,
    skew: Duration,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Create an empty store with the default expiry skew.
    pub fn new() -> Self {
        Self::with_skew(Duration::seconds(DEFAULT_EXPIRY_SKEW_SECS))
    }

    /// Create an empty store that treats tokens as expired `skew` early.
    pub fn with_skew(skew: Duration) -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            skew,
        }
    }

    /// Returns the cached token for `flow` if it is still usable now.
    pub fn get(&self, flow: AuthFlow) -> Option<Token> {
        self.get_at(flow, Utc::now())
    }

    /// Returns the cached token for `flow` if it is still usable at `now`.
    pub fn get_at(&self, flow: AuthFlow, now: DateTime<Utc>) -> Option<Token> {
        let tokens = self.tokens.read().unwrap_or_else(PoisonError::into_inner);
        match tokens.get(&flow) {
            Some(token) if !token.is_expired_at(now, self.skew) => Some(token.clone()),
            Some(_) => {
                debug!(%flow, "Cached token is expired or about to expire");
                None
            }
            None => None,
        }
    }

    /// Store `token` under its own flow, replacing any previous entry.
    pub fn insert(&self, token: Token) {
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        tokens.insert(token.flow(), token);
    }

    /// Drop the cached token for `flow`. Returns true if one was present.
    pub fn invalidate(&self, flow: AuthFlow) -> bool {
        let mut tokens = self.tokens.write().unwrap_or_else(PoisonError::into_inner);
        let removed = tokens.remove(&flow).is_some();
        if removed {
            debug!(%flow, "Invalidated cached token");
        }
        removed
    }

    /// Drop every cached token.
    pub fn clear(&self) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::AccessToken;

    fn token(value: &str, flow: AuthFlow, expires_at: DateTime<Utc>) -> Token {
        Token::new(AccessToken::new(value).unwrap(), expires_at, flow)
    }

    #[test]
    fn one_token_per_flow() {
        let store = CredentialStore::new();
        let later = Utc::now() + Duration::hours(1);

        store.insert(token("app-1", AuthFlow::Application, later));
        store.insert(token("user-1", AuthFlow::DelegatedUser, later));
        store.insert(token("app-2", AuthFlow::Application, later));

        let app = store.get(AuthFlow::Application).unwrap();
        assert_eq!(app.access_token().as_str(), "app-2");
        let user = store.get(AuthFlow::DelegatedUser).unwrap();
        assert_eq!(user.access_token().as_str(), "user-1");
    }

    #[test]
    fn expired_tokens_are_not_served() {
        let store = CredentialStore::with_skew(Duration::minutes(5));
        let now = Utc::now();
        store.insert(token("t", AuthFlow::Application, now + Duration::minutes(3)));

        assert!(store.get_at(AuthFlow::Application, now).is_none());
        assert!(
            store
                .get_at(AuthFlow::Application, now - Duration::minutes(10))
                .is_some()
        );
    }

    #[test]
    fn invalidate_removes_only_that_flow() {
        let store = CredentialStore::new();
        let later = Utc::now() + Duration::hours(1);
        store.insert(token("a", AuthFlow::Application, later));
        store.insert(token("u", AuthFlow::DelegatedUser, later));

        assert!(store.invalidate(AuthFlow::Application));
        assert!(!store.invalidate(AuthFlow::Application));
        assert!(store.get(AuthFlow::Application).is_none());
        assert!(store.get(AuthFlow::DelegatedUser).is_some());

        store.clear();
        assert!(store.get(AuthFlow::DelegatedUser).is_none());
    }
}
