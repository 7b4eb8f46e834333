//! Page handlers
//!
//! Every list page builds its own [`ListController`](crate::listing::ListController)
//! from the URL, mounts it (one backend fetch) and renders the resulting
//! state. Nothing is cached between requests.

pub mod detail;
pub mod gitlink;
pub mod histories;
pub mod home;
pub mod rankings;
pub mod results;

use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use super::error::PageError;
use super::render::{layout, Section};

/// `start` / `take` as raw strings so malformed values fall back to
/// defaults instead of rejecting the request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    pub start: Option<String>,
    pub take: Option<String>,
}

/// Full page response
pub(crate) fn page(
    status: StatusCode,
    title: &str,
    section: Section,
    search: &str,
    body: &str,
) -> Response {
    (status, Html(layout(title, section, search, body))).into_response()
}

/// Score ids are path segments; anything but an integer is rejected
/// before a request is made
pub(crate) fn parse_score_id(raw: &str) -> Result<i64, PageError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| PageError::InvalidScoreId(raw.to_string()))
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn not_found(uri: Uri) -> PageError {
    PageError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_id() {
        assert_eq!(parse_score_id("42").ok(), Some(42));
        assert!(matches!(
            parse_score_id("abc"),
            Err(PageError::InvalidScoreId(_))
        ));
        assert!(parse_score_id("1.5").is_err());
        assert!(parse_score_id("").is_err());
    }
}
