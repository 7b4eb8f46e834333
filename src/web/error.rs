//! Page-level failures rendered as full HTML result pages

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::client::ClientError;

use super::render::{layout, result_panel, Section, Tone};

/// Errors that end a page request before its normal view is rendered
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Path segment that should have been a score id was not an integer
    #[error("invalid score id: {0}")]
    InvalidScoreId(String),

    /// The by-id fetch failed or returned nothing
    #[error("score {id} unavailable: {source}")]
    DetailUnavailable {
        id: i64,
        #[source]
        source: ClientError,
    },

    /// `/gitlink` asked for a table that is not configured
    #[error("unknown package table: {0}")]
    UnknownTable(String),

    #[error("no route for {0}")]
    NotFound(String),
}

impl PageError {
    fn status(&self) -> StatusCode {
        match self {
            PageError::InvalidScoreId(_) | PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::UnknownTable(_) => StatusCode::BAD_REQUEST,
            PageError::DetailUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn panel(&self) -> (&'static str, String) {
        match self {
            PageError::InvalidScoreId(_) => {
                ("Invalid Score ID", "Score ID must be an integer".to_string())
            }
            PageError::DetailUnavailable { .. } => {
                ("No Results Found", "Maybe server error occurs".to_string())
            }
            PageError::UnknownTable(name) => (
                "Unknown Table",
                format!("There is no package table named \"{}\"", name),
            ),
            PageError::NotFound(_) => (
                "Page Not Found",
                "The page you are looking for does not exist".to_string(),
            ),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Page error: {} - {}", status, self);
        } else {
            tracing::warn!("Page error: {} - {}", status, self);
        }

        let (title, subtitle) = self.panel();
        let body = result_panel(Tone::Error, title, &subtitle);
        (status, Html(layout(title, Section::Search, "", &body))).into_response()
    }
}
