//! Full-page score detail

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use super::{page, parse_score_id};
use crate::web::error::PageError;
use crate::web::render::score::score_detail;
use crate::web::render::Section;
use crate::web::state::AppState;

/// GET /detail/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, PageError> {
    let id = parse_score_id(&raw_id)?;

    let item = state
        .client
        .get_result_by_score_id(id)
        .await
        .map_err(|source| PageError::DetailUnavailable { id, source })?;

    let body = format!(r#"<h1>Score Detail</h1>{}"#, score_detail(&item));
    Ok(page(StatusCode::OK, &item.link, Section::Search, "", &body))
}
