//! Landing page

use axum::http::StatusCode;
use axum::response::Response;

use super::page;
use crate::web::render::{escape, search_form, Section};

/// Shown when a search is submitted without a term
pub const MISSING_QUERY: &str = "Please enter a search query";

pub async fn home() -> Response {
    render(None)
}

/// Logo and large search box; `error` is shown under the box
pub fn render(error: Option<&str>) -> Response {
    let mut body = String::from(r#"<div class="search-hero"><h1>Criticality Score</h1>"#);
    body.push_str(
        r#"<p class="subtitle">Search open source repositories and see how critical they are to the ecosystem.</p>"#,
    );
    body.push_str(&search_form(
        "/results",
        "q",
        "",
        &[],
        "Repository link, e.g. github.com/redis/redis",
    ));
    if let Some(error) = error {
        body.push_str(&format!(
            r#"<p class="form-error" role="alert">{}</p>"#,
            escape(error)
        ));
    }
    body.push_str("</div>");

    page(StatusCode::OK, "Home", Section::Home, "", &body)
}
