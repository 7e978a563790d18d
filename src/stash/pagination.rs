//! Pagination options and hints for Stash list endpoints.
//!
//! Stash pages with `start`/`limit` offsets and reports the end of a
//! collection through an `isLastPage` flag. Callers think in 1-based page
//! numbers, so this module converts between the two and records the
//! follow-up page on the response envelope. The layer never walks pages on
//! its own; callers issue the next request with the returned hint.

/// Page selection for list operations.
///
/// `page` is 1-based; a value of 0 is treated as the first page. A `size`
/// of 0 leaves the page size to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    /// Requested page number (1-based).
    pub page: u32,
    /// Items per page, or 0 for the server default.
    pub size: u32,
}

impl ListOptions {
    /// Creates options for the given page and size.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Returns the requested page, treating 0 as 1.
    #[must_use]
    pub const fn effective_page(&self) -> u32 {
        if self.page == 0 { 1 } else { self.page }
    }

    /// Returns the `(key, value)` query pairs Stash expects.
    ///
    /// `start` is only sent past the first page and `limit` only when a size
    /// is set, matching the behaviour of the Stash web client.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let page = self.effective_page();
        if page > 1 {
            let start = u64::from(page - 1) * u64::from(self.size);
            pairs.push(("start", start.to_string()));
        }
        if self.size != 0 {
            pairs.push(("limit", self.size.to_string()));
        }
        pairs
    }
}

/// Pagination hints attached to a response envelope.
///
/// A hint of 0 means "not set".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageHints {
    /// Index of the first page, when more pages exist.
    pub first: u32,
    /// Index of the next page, when more pages exist.
    pub next: u32,
}

impl PageHints {
    /// Builds hints for a page response.
    ///
    /// When the response is not known to be the last page, the hints point at
    /// the first page and the page after `requested_page`. The last page
    /// carries no hints.
    #[must_use]
    pub const fn for_page(requested_page: u32, is_last_page: Option<bool>) -> Self {
        match is_last_page {
            Some(true) => Self { first: 0, next: 0 },
            Some(false) | None => Self {
                first: 1,
                next: requested_page.saturating_add(1),
            },
        }
    }

    /// Returns true when the caller should request another page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next != 0
    }
}

/// Joins a path and query pairs into a request path.
pub(crate) fn with_query(path: String, pairs: &[(&'static str, String)]) -> String {
    if pairs.is_empty() {
        return path;
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(key, value)| (*key, value.as_str())))
        .finish();
    format!("{path}?{query}")
}
