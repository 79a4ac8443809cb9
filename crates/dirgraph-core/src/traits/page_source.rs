//! Page source trait.

use async_trait::async_trait;

use crate::Result;
use crate::paging::{ContinuationToken, Page, Query};

/// A remote listing that delivers results one page at a time.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    /// Issue the first page request for `query`.
    async fn first_page(&self, query: &Query) -> Result<Page<T>>;

    /// Fetch the page a previous response pointed to.
    async fn next_page(&self, continuation: &ContinuationToken) -> Result<Page<T>>;
}
