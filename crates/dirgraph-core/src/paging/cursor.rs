//! Generic page-walking cursor.

use std::collections::HashSet;
use std::sync::Arc;

use futures_core::Stream;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::traits::PageSource;

use super::{ContinuationToken, Page, Query};

/// Lifecycle of a [`PagedCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// A page is held and more may follow.
    Open,
    /// No further pages exist. Terminal.
    Exhausted,
}

/// Walks a paged listing one page at a time.
///
/// The cursor holds exactly one page. [`advance`](Self::advance) replaces it
/// with the next one, so callers that need earlier pages must copy them out
/// first. Only one request is ever in flight per cursor.
///
/// ```text
/// open ──► Open ──advance()=true──► Open
///            │
///            └──advance()=false──► Exhausted (terminal, no further I/O)
/// ```
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use dirgraph_core::{PagedCursor, PageSource, Query};
/// # async fn example(source: Arc<dyn PageSource<String>>) -> dirgraph_core::Result<()> {
/// let mut cursor = PagedCursor::open(source, &Query::new("users")).await?;
/// loop {
///     for item in cursor.current_page() {
///         println!("{item}");
///     }
///     if !cursor.advance().await? {
///         break;
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct PagedCursor<T> {
    source: Arc<dyn PageSource<T>>,
    items: Vec<T>,
    continuation: Option<ContinuationToken>,
    state: CursorState,
    pages_fetched: usize,
}

impl<T: Send> PagedCursor<T> {
    /// Issue the first page request and wrap the result.
    ///
    /// Leading empty pages that still carry a continuation are skipped. An
    /// empty result set yields a cursor that is already
    /// [`Exhausted`](CursorState::Exhausted) with an empty page.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the first fetch fails; no cursor is
    /// produced in that case.
    #[instrument(skip(source), fields(path = %query.path()))]
    pub async fn open(source: Arc<dyn PageSource<T>>, query: &Query) -> Result<Self> {
        debug!("Opening paged cursor");

        let first = source.first_page(query).await?;
        let mut cursor = Self {
            source,
            items: Vec::new(),
            continuation: None,
            state: CursorState::Open,
            pages_fetched: 1,
        };

        if first.items.is_empty() {
            match first.continuation {
                Some(next) => {
                    if !cursor.fetch_from(next).await? {
                        cursor.state = CursorState::Exhausted;
                    }
                }
                None => cursor.state = CursorState::Exhausted,
            }
        } else {
            cursor.items = first.items;
            cursor.continuation = first.continuation;
        }

        debug!(
            items = cursor.items.len(),
            state = ?cursor.state,
            "Cursor opened"
        );
        Ok(cursor)
    }

    /// Items of the page currently held. Performs no I/O.
    pub fn current_page(&self) -> &[T] {
        &self.items
    }

    /// Move to the next page.
    ///
    /// Returns `true` and replaces the held page when a non-empty page
    /// follows. Returns `false` and marks the cursor exhausted when there is
    /// no continuation or the server signals the end of results; the held
    /// page is left as it was. On an exhausted cursor this returns `false`
    /// without I/O.
    ///
    /// # Errors
    ///
    /// Returns the source's error if a fetch fails. The cursor is left
    /// unchanged and `advance` may be called again.
    pub async fn advance(&mut self) -> Result<bool> {
        if self.state == CursorState::Exhausted {
            return Ok(false);
        }

        let Some(next) = self.continuation.clone() else {
            debug!(pages = self.pages_fetched, "No continuation; cursor exhausted");
            self.state = CursorState::Exhausted;
            return Ok(false);
        };

        if self.fetch_from(next).await? {
            Ok(true)
        } else {
            self.state = CursorState::Exhausted;
            Ok(false)
        }
    }

    /// Fetch pages starting at `next` until one has items or the results end.
    ///
    /// A run of empty pages that revisits any continuation ends the results.
    /// State is only updated once a fetch succeeds.
    async fn fetch_from(&mut self, mut next: ContinuationToken) -> Result<bool> {
        let mut fetched = 0;
        let mut seen = HashSet::new();
        loop {
            seen.insert(next.clone());
            let page: Page<T> = self.source.next_page(&next).await?;
            fetched += 1;

            if !page.items.is_empty() {
                self.items = page.items;
                self.continuation = page.continuation;
                self.pages_fetched += fetched;
                return Ok(true);
            }

            match page.continuation {
                Some(following) if !seen.contains(&following) => next = following,
                Some(following) => {
                    warn!(continuation = %following, "Server looped over empty pages; treating as end of results");
                    break;
                }
                None => break,
            }
        }

        self.continuation = None;
        self.pages_fetched += fetched;
        Ok(false)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Returns true once no further pages can be fetched.
    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    /// Number of page requests that have completed successfully.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Drain the held page and every following page into one vector.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error; items gathered so far are dropped.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all = Vec::new();
        loop {
            all.append(&mut self.items);
            if !self.advance().await? {
                break;
            }
        }
        Ok(all)
    }
}

impl<T: Send + 'static> PagedCursor<T> {
    /// Flatten the remaining pages into a stream of items.
    ///
    /// The stream yields the held page first and ends after the first error.
    pub fn into_stream(mut self) -> impl Stream<Item = Result<T>> + Send {
        async_stream::try_stream! {
            loop {
                for item in std::mem::take(&mut self.items) {
                    yield item;
                }
                if !self.advance().await? {
                    break;
                }
            }
        }
    }
}

impl<T> std::fmt::Debug for PagedCursor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedCursor")
            .field("items", &self.items.len())
            .field("continuation", &self.continuation)
            .field("state", &self.state)
            .field("pages_fetched", &self.pages_fetched)
            .finish()
    }
}
