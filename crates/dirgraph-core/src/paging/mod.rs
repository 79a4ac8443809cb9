//! Paged listing primitives.
//!
//! A [`Query`] names a collection; a [`PageSource`](crate::PageSource)
//! answers it one [`Page`] at a time; a [`PagedCursor`] walks the pages.

mod cursor;
mod page;
mod query;

pub use cursor::{CursorState, PagedCursor};
pub use page::{ContinuationToken, Page};
pub use query::Query;
