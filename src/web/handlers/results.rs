//! Search results, plus the detail modal and histories drawer drawn over them

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use super::{home, page, parse_score_id};
use crate::client::{ClientError, ScoreResult};
use crate::listing::{encode_pairs, HistoriesSource, ListController, ListQuery, ResultsSource};
use crate::web::error::PageError;
use crate::web::render::list::{list_body, ListView};
use crate::web::render::score::{score_card, score_detail, CardLinks};
use crate::web::render::{overlay, result_panel, Overlay, Section, Tone};
use crate::web::state::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub start: Option<String>,
    pub take: Option<String>,
}

impl SearchParams {
    fn term(&self) -> &str {
        self.q.as_deref().unwrap_or("").trim()
    }

    fn query(&self, default_size: u64) -> ListQuery {
        ListQuery::from_params(
            self.term(),
            self.start.as_deref(),
            self.take.as_deref(),
            default_size,
        )
    }
}

/// Histories drawer parameters on top of the results list's own
///
/// The drawer pages with `hstart` / `htake` so it does not disturb the
/// list underneath.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrawerParams {
    pub link: Option<String>,
    pub q: Option<String>,
    pub start: Option<String>,
    pub take: Option<String>,
    pub hstart: Option<String>,
    pub htake: Option<String>,
}

impl DrawerParams {
    fn search(&self) -> SearchParams {
        SearchParams {
            q: self.q.clone(),
            start: self.start.clone(),
            take: self.take.clone(),
        }
    }
}

/// GET /results
pub async fn results(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    if params.term().is_empty() {
        return home::render(Some(home::MISSING_QUERY));
    }

    let query = params.query(state.default_page_size());
    let view = results_list(&state, &query).await;
    page(view.status, &query.term, Section::Search, &query.term, &view.html)
}

/// GET /results/detail/:id
pub async fn detail_overlay(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Response, PageError> {
    let id = parse_score_id(&raw_id)?;
    let query = params.query(state.default_page_size());

    let (list, detail) = tokio::join!(
        results_list(&state, &query),
        state.client.get_result_by_score_id(id)
    );

    let (status, content) = detail_content(id, detail);
    let close = query.href("/results", "q", &[]);
    let mut html = list.html;
    html.push_str(&overlay(Overlay::Modal, "Score Detail", &close, &content));

    Ok(page(
        worst(list.status, status),
        &query.term,
        Section::Search,
        &query.term,
        &html,
    ))
}

/// GET /results/histories
pub async fn histories_overlay(
    State(state): State<AppState>,
    Query(params): Query<DrawerParams>,
) -> Response {
    let search = params.search();
    let query = search.query(state.default_page_size());
    let link = params.link.as_deref().unwrap_or("").trim().to_string();
    let drawer_query = ListQuery::from_params(
        link.as_str(),
        params.hstart.as_deref(),
        params.htake.as_deref(),
        state.default_page_size(),
    );

    let (list, drawer) = tokio::join!(
        results_list(&state, &query),
        histories_drawer(&state, &query, &drawer_query)
    );

    let close = query.href("/results", "q", &[]);
    let mut html = list.html;
    html.push_str(&overlay(Overlay::Drawer, "Histories", &close, &drawer.html));

    page(
        worst(list.status, drawer.status),
        &query.term,
        Section::Search,
        &query.term,
        &html,
    )
}

/// Results list for `query`, with links that keep the search parameters
async fn results_list(state: &AppState, query: &ListQuery) -> ListView {
    if query.term.is_empty() {
        return ListView {
            status: StatusCode::OK,
            html: result_panel(Tone::Info, home::MISSING_QUERY, ""),
        };
    }

    let mut controller = ListController::new(ResultsSource::new(state.client.clone()), query.clone());
    controller.mount().await;
    let list = controller.into_state();

    let start = query.offset().to_string();
    let take = query.page_size.to_string();
    let keep = [("q", query.term.as_str()), ("start", start.as_str()), ("take", take.as_str())];
    let links = CardLinks {
        detail_path: "/results/detail",
        histories_path: Some("/results/histories"),
        keep: &keep,
    };

    list_body(
        &list,
        &state.page_sizes(query.page_size),
        |items: &[ScoreResult]| items.iter().map(|item| score_card(item, &links)).collect(),
        &|q: &ListQuery| q.href("/results", "q", &[]),
    )
}

async fn histories_drawer(state: &AppState, results: &ListQuery, query: &ListQuery) -> ListView {
    if query.term.is_empty() {
        return ListView {
            status: StatusCode::OK,
            html: result_panel(Tone::Info, "No repository selected", ""),
        };
    }

    let mut controller = ListController::new(HistoriesSource::new(state.client.clone()), query.clone());
    controller.mount().await;
    let list = controller.into_state();

    let links = CardLinks {
        detail_path: "/detail",
        histories_path: None,
        keep: &[],
    };
    let results_start = results.offset().to_string();
    let results_take = results.page_size.to_string();
    let href = |q: &ListQuery| {
        let hstart = q.offset().to_string();
        let htake = q.page_size.to_string();
        format!(
            "/results/histories?{}",
            encode_pairs(&[
                ("q", results.term.as_str()),
                ("start", results_start.as_str()),
                ("take", results_take.as_str()),
                ("link", q.term.as_str()),
                ("hstart", hstart.as_str()),
                ("htake", htake.as_str()),
            ])
        )
    };

    list_body(
        &list,
        &state.page_sizes(query.page_size),
        |items: &[ScoreResult]| items.iter().map(|item| score_card(item, &links)).collect(),
        &href,
    )
}

/// Detail tables, or the server-error panel when the fetch failed
pub(crate) fn detail_content(id: i64, detail: Result<ScoreResult, ClientError>) -> (StatusCode, String) {
    match detail {
        Ok(item) => (StatusCode::OK, score_detail(&item)),
        Err(e) => {
            tracing::error!("Failed to load score {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                result_panel(Tone::Error, "No Results Found", "Maybe server error occurs"),
            )
        }
    }
}

/// Higher of two statuses, so a failure in either half is not masked
fn worst(a: StatusCode, b: StatusCode) -> StatusCode {
    if b.as_u16() > a.as_u16() {
        b
    } else {
        a
    }
}
