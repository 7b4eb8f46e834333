//! Score history of one repository

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use super::page;
use crate::client::ScoreResult;
use crate::listing::{HistoriesSource, ListController, ListQuery};
use crate::web::render::list::list_body;
use crate::web::render::score::{score_card, CardLinks};
use crate::web::render::{escape, result_panel, search_form, Section, Tone};
use crate::web::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoriesParams {
    pub link: Option<String>,
    pub start: Option<String>,
    pub take: Option<String>,
}

/// GET /histories
pub async fn histories(
    State(state): State<AppState>,
    Query(params): Query<HistoriesParams>,
) -> Response {
    let link = params.link.as_deref().unwrap_or("").trim();
    let query = ListQuery::from_params(
        link,
        params.start.as_deref(),
        params.take.as_deref(),
        state.default_page_size(),
    );

    let take = query.page_size.to_string();
    let mut body = String::from(r#"<div class="toolbar"><h1>Histories</h1>"#);
    body.push_str(&search_form(
        "/histories",
        "link",
        &query.term,
        &[("take", take.as_str())],
        "Repository link",
    ));
    body.push_str("</div>");

    if query.term.is_empty() {
        body.push_str(&result_panel(
            Tone::Info,
            "Please enter a repository link",
            "Histories are listed per repository.",
        ));
        return page(StatusCode::OK, "Histories", Section::Search, "", &body);
    }

    let mut controller = ListController::new(HistoriesSource::new(state.client.clone()), query.clone());
    controller.mount().await;
    let list = controller.into_state();

    // history entries link to the full detail page only
    let links = CardLinks {
        detail_path: "/detail",
        histories_path: None,
        keep: &[],
    };
    let view = list_body(
        &list,
        &state.page_sizes(query.page_size),
        |items: &[ScoreResult]| items.iter().map(|item| score_card(item, &links)).collect(),
        &|q: &ListQuery| q.href("/histories", "link", &[]),
    );

    body.push_str(&format!(r#"<p class="subtitle">{}</p>"#, escape(&query.term)));
    body.push_str(&view.html);
    page(view.status, "Histories", Section::Search, "", &body)
}
