//! URL-backed list query
//!
//! The query string is the single source of truth for what a list shows.
//! Lists are addressed as `?<term>=…&start=<offset>&take=<size>`, the same
//! parameters the backend uses, so a URL can be shared or reloaded and
//! reproduces the same page.

use crate::client::MAX_TAKE;

/// `(term, page, page_size)` for one list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub term: String,
    /// 1-based
    pub page: u64,
    pub page_size: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new("", 1, 10)
    }
}

impl ListQuery {
    pub fn new(term: impl Into<String>, page: u64, page_size: u64) -> Self {
        Self {
            term: term.into(),
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_TAKE),
        }
    }

    /// Rebuild from raw `start`/`take` query values
    ///
    /// Unparseable or missing values fall back to offset 0 and the default
    /// page size. An offset that is not a multiple of `take` lands on the page
    /// containing it.
    pub fn from_params(
        term: impl Into<String>,
        start: Option<&str>,
        take: Option<&str>,
        default_size: u64,
    ) -> Self {
        let take = take
            .and_then(|t| t.trim().parse::<u64>().ok())
            .filter(|t| *t > 0)
            .unwrap_or(default_size)
            .clamp(1, MAX_TAKE);
        let start = start
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(0);

        Self::new(term, (start / take).saturating_add(1), take)
    }

    /// Backend offset for the current page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Same term, different page
    pub fn with_page(&self, page: u64, page_size: u64) -> Self {
        Self::new(self.term.clone(), page, page_size)
    }

    /// Same page size, new term, back to page 1
    pub fn with_term(&self, term: impl Into<String>) -> Self {
        Self::new(term, 1, self.page_size)
    }

    /// Relative URL reproducing this query
    ///
    /// The term goes under `term_param`, then `extra` pairs (empty values are
    /// dropped), then `start` and `take`.
    pub fn href(&self, path: &str, term_param: &str, extra: &[(&str, &str)]) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if !term_param.is_empty() && !self.term.is_empty() {
            query.append_pair(term_param, &self.term);
        }
        for (key, value) in extra {
            if !value.is_empty() {
                query.append_pair(key, value);
            }
        }
        query.append_pair("start", &self.offset().to_string());
        query.append_pair("take", &self.page_size.to_string());

        format!("{}?{}", path, query.finish())
    }

    /// Number of pages needed for `total` items (at least one)
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size).max(1)
    }
}

/// Encode arbitrary pairs into a query string (empty values dropped)
pub fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if !value.is_empty() {
            query.append_pair(key, value);
        }
    }
    query.finish()
}
