//! Global ranking table

use axum::extract::{Query, State};
use axum::response::Response;

use super::{page, Paging};
use crate::client::RankingResult;
use crate::listing::{ListController, ListQuery, RankingsSource};
use crate::web::render::list::list_body;
use crate::web::render::{escape, fmt_score, Section};
use crate::web::state::AppState;

/// GET /rankings
pub async fn rankings(State(state): State<AppState>, Query(paging): Query<Paging>) -> Response {
    let query = ListQuery::from_params(
        "",
        paging.start.as_deref(),
        paging.take.as_deref(),
        state.default_page_size(),
    );

    let mut controller = ListController::new(RankingsSource::new(state.client.clone()), query.clone());
    controller.mount().await;
    let list = controller.into_state();

    let view = list_body(
        &list,
        &state.page_sizes(query.page_size),
        ranking_table,
        &|q: &ListQuery| q.href("/rankings", "", &[]),
    );

    let body = format!("<h1>Rankings</h1>{}", view.html);
    page(view.status, "Rankings", Section::Rankings, "", &body)
}

fn ranking_table(rows: &[RankingResult]) -> String {
    let mut html = String::from(
        r#"<table class="rankings"><thead><tr><th>Rank</th><th>Link</th><th>Total Score</th><th>Git Metadata</th><th>Lang Ecosystem</th><th>Distributions</th><th></th></tr></thead><tbody>"#,
    );
    for row in rows {
        let item = &row.result;
        let details = match item.score_id {
            Some(id) => format!(r#"<a href="/detail/{}">Details</a>"#, id),
            None => String::new(),
        };
        html.push_str(&format!(
            r#"<tr class="ranking-row"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
            row.ranking,
            escape(&item.link),
            fmt_score(item.score),
            fmt_score(item.git_score),
            fmt_score(item.lang_score),
            fmt_score(item.distro_score),
            details,
        ));
    }
    html.push_str("</tbody></table>");
    html
}
