//! Token types for directory authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, InvalidInputError};

/// The authentication flow a token was obtained through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthFlow {
    /// App-only client-credential flow; the application acts as itself.
    Application,
    /// Delegated flow; the token carries a signed-in user's permissions.
    DelegatedUser,
}

impl fmt::Display for AuthFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFlow::Application => f.write_str("application"),
            AuthFlow::DelegatedUser => f.write_str("delegated-user"),
        }
    }
}

/// An opaque bearer credential.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or blank.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(InvalidInputError::Other {
                message: "access token cannot be empty".to_string(),
            }
            .into());
        }
        Ok(Self(token))
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers or persisting
    /// a delegated token for the current user.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A bearer token together with its expiry and originating flow.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    access_token: AccessToken,
    expires_at: DateTime<Utc>,
    flow: AuthFlow,
}

impl Token {
    /// Create a new token.
    pub fn new(access_token: AccessToken, expires_at: DateTime<Utc>, flow: AuthFlow) -> Self {
        Self {
            access_token,
            expires_at,
            flow,
        }
    }

    /// Returns the bearer credential.
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    /// Returns the instant after which the token is no longer accepted.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the flow that produced this token.
    pub fn flow(&self) -> AuthFlow {
        self.flow
    }

    /// Returns true if the token is expired, or will be within `skew`, at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        now + skew >= self.expires_at
    }

    /// Returns true if the token is expired now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now(), Duration::zero())
    }

    /// Remaining lifetime at `now`, clamped to zero.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &self.access_token)
            .field("expires_at", &self.expires_at)
            .field("flow", &self.flow)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...").unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn token_debug_hides_value() {
        let token = Token::new(
            AccessToken::new("secret-bearer").unwrap(),
            Utc::now(),
            AuthFlow::Application,
        );
        let debug = format!("{:?}", token);
        assert!(!debug.contains("secret-bearer"));
        assert!(debug.contains("Application"));
    }

    #[test]
    fn empty_access_token_rejected() {
        assert!(AccessToken::new("").is_err());
        assert!(AccessToken::new("   ").is_err());
    }

    #[test]
    fn expiry_respects_skew() {
        let now = Utc::now();
        let token = Token::new(
            AccessToken::new("t").unwrap(),
            now + Duration::minutes(10),
            AuthFlow::DelegatedUser,
        );

        assert!(!token.is_expired_at(now, Duration::minutes(5)));
        assert!(token.is_expired_at(now, Duration::minutes(15)));
        assert_eq!(token.remaining_at(now), Duration::minutes(10));
        assert_eq!(
            token.remaining_at(now + Duration::minutes(20)),
            Duration::zero()
        );
    }

    #[test]
    fn flow_display() {
        assert_eq!(AuthFlow::Application.to_string(), "application");
        assert_eq!(AuthFlow::DelegatedUser.to_string(), "delegated-user");
    }
}
