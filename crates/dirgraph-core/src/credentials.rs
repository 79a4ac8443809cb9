//! Client secret type.

use std::fmt;

/// The shared secret an application presents in the client-credential flow.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use dirgraph_core::ClientSecret;
///
/// let secret = ClientSecret::new("s3cr3t");
/// assert!(!secret.is_empty());
/// assert!(!format!("{:?}", secret).contains("s3cr3t"));
/// ```
#[derive(Clone)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Wrap a secret value. Emptiness is checked at use, before any request.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns true if the secret is empty or blank.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing token requests.
    /// Never log or display this value.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClientSecret").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_hidden_in_debug() {
        let secret = ClientSecret::new("secret123");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn blank_secret_is_empty() {
        assert!(ClientSecret::new("").is_empty());
        assert!(ClientSecret::new("  ").is_empty());
        assert!(!ClientSecret::new("x").is_empty());
    }
}
