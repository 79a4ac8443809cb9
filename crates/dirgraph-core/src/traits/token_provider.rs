//! Token provider trait.

use async_trait::async_trait;

use crate::{AuthFlow, Result, Token};

/// Supplies bearer tokens to sessions.
///
/// This is the token-accessor a session holds; it is the only state a
/// session needs beyond its endpoint.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Return a usable token for `flow`, acquiring one if none is cached.
    async fn token(&self, flow: AuthFlow) -> Result<Token>;

    /// Forget any cached token for `flow`, e.g. after the service answered 401.
    fn invalidate(&self, flow: AuthFlow);
}
