//! Listing query.

use crate::directory::Collection;

/// A listing request: a collection path plus optional server-side options.
///
/// The path is held as unencoded segments.
///
/// # Example
///
/// ```
/// use dirgraph_core::{Collection, Query};
///
/// let query = Query::collection(&Collection::Users)
///     .filter("startswith(displayName,'Ad')")
///     .top(10);
/// assert_eq!(query.path(), "users");
/// assert_eq!(query.page_size(), Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    segments: Vec<String>,
    filter: Option<String>,
    top: Option<u32>,
}

impl Query {
    /// A query for a `/`-separated path relative to the session's service root.
    pub fn new(path: impl Into<String>) -> Self {
        let segments = path
            .into()
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self::from_segments(segments)
    }

    /// A query listing one of the known collections.
    pub fn collection(collection: &Collection) -> Self {
        Self::from_segments(collection.segments())
    }

    fn from_segments(segments: Vec<String>) -> Self {
        Self {
            segments,
            filter: None,
            top: None,
        }
    }

    /// Set an OData `$filter` expression.
    pub fn filter(mut self, expr: impl Into<String>) -> Self {
        self.filter = Some(expr.into());
        self
    }

    /// Ask the server for at most `n` items per page (`$top`).
    pub fn top(mut self, n: u32) -> Self {
        self.top = Some(n);
        self
    }

    /// Unencoded path segments, each to be percent-encoded on its own.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path joined with `/`, for display and logging.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    pub fn filter_expr(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn page_size(&self) -> Option<u32> {
        self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_trimmed() {
        assert_eq!(Query::new("/users/").path(), "users");
    }

    #[test]
    fn collection_keeps_id_as_one_segment() {
        let query = Query::collection(&Collection::GroupMembers("a/b".into()));
        assert_eq!(query.segments(), ["groups", "a/b", "members"]);
    }

    #[test]
    fn options_default_to_none() {
        let query = Query::new("groups");
        assert!(query.filter_expr().is_none());
        assert!(query.page_size().is_none());
    }
}
