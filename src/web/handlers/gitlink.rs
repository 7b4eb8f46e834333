//! Package table editor: list, search, and the edit-gitlink modal

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use super::page;
use crate::client::PackageRow;
use crate::config::TableConfig;
use crate::gitlink::EditDraft;
use crate::listing::{ListController, ListQuery, PackageSource};
use crate::web::error::PageError;
use crate::web::render::gitlink::{edit_modal, package_table, table_dropdown, EditForm};
use crate::web::render::list::list_body;
use crate::web::render::{search_form, Section};
use crate::web::state::AppState;

const BASE_PATH: &str = "/gitlink";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitlinkParams {
    pub table: Option<String>,
    pub q: Option<String>,
    pub confidence: Option<String>,
    pub start: Option<String>,
    pub take: Option<String>,
    /// Package whose edit modal is open
    pub edit: Option<String>,
}

impl GitlinkParams {
    /// Parse the query part of a `/gitlink?…` URL
    fn from_url(url: &str) -> Self {
        let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = Some(value.into_owned());
            match key.as_ref() {
                "table" => params.table = value,
                "q" => params.q = value,
                "confidence" => params.confidence = value,
                "start" => params.start = value,
                "take" => params.take = value,
                "edit" => params.edit = value,
                _ => {}
            }
        }
        params
    }

    fn confidence_flag(&self) -> bool {
        matches!(
            self.confidence.as_deref().map(str::trim),
            Some("true" | "1" | "on")
        )
    }
}

/// Submitted edit form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub link: String,
    pub confidence: Option<String>,
    /// List URL to go back to
    pub return_to: Option<String>,
}

impl UpdateForm {
    fn draft(&self) -> EditDraft {
        EditDraft {
            package: self.package.clone(),
            table: self.table.clone(),
            link: self.link.clone(),
            confidence: self.confidence.clone(),
        }
    }

    /// Only same-site list URLs are accepted as a return target
    fn return_to(&self) -> String {
        match self.return_to.as_deref() {
            Some(url) if url == BASE_PATH || url.starts_with("/gitlink?") => url.to_string(),
            _ => BASE_PATH.to_string(),
        }
    }
}

/// Submitted values to put back into a re-opened modal
struct Rejected {
    link: String,
    confidence: Option<String>,
    error: String,
    status: StatusCode,
}

/// GET /gitlink
pub async fn gitlink(
    State(state): State<AppState>,
    Query(params): Query<GitlinkParams>,
) -> Result<Response, PageError> {
    render(&state, &params, None).await
}

/// POST /gitlink/update
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateForm>) -> Result<Response, PageError> {
    let return_to = form.return_to();
    let mut params = GitlinkParams::from_url(&return_to);
    params.table = Some(form.table.clone());
    params.edit = Some(form.package.clone());

    let request = match form.draft().validate(&state.config.gitlink) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(package = %form.package, table = %form.table, "Rejected gitlink edit: {}", e);
            let rejected = Rejected {
                link: form.link.clone(),
                confidence: form.confidence.clone(),
                error: e.to_string(),
                status: StatusCode::UNPROCESSABLE_ENTITY,
            };
            return render(&state, &params, Some(rejected)).await;
        }
    };

    match state.client.post_update_gitlink(&request).await {
        Ok(ack) => {
            tracing::info!(
                package = %request.package_name,
                table = %request.table_name,
                link = %request.new_git_link,
                "Updated gitlink: {}",
                ack.message.as_deref().unwrap_or("ok")
            );
            Ok(Redirect::to(&return_to).into_response())
        }
        Err(e) => {
            tracing::error!(
                package = %request.package_name,
                table = %request.table_name,
                "Failed to update gitlink: {}",
                e
            );
            let rejected = Rejected {
                link: form.link.clone(),
                confidence: form.confidence.clone(),
                error: format!("Update failed. {}", e.user_message()),
                status: StatusCode::BAD_GATEWAY,
            };
            render(&state, &params, Some(rejected)).await
        }
    }
}

/// Selected table, failing on a name that is not configured
fn select_table<'a>(state: &'a AppState, requested: Option<&str>) -> Result<&'a TableConfig, PageError> {
    let requested = requested.map(str::trim).filter(|name| !name.is_empty());
    if let Some(name) = requested {
        if state.config.gitlink.table(name).is_none() {
            return Err(PageError::UnknownTable(name.to_string()));
        }
    }
    state
        .config
        .gitlink
        .resolve(requested)
        .ok_or_else(|| PageError::UnknownTable(requested.unwrap_or_default().to_string()))
}

async fn render(
    state: &AppState,
    params: &GitlinkParams,
    rejected: Option<Rejected>,
) -> Result<Response, PageError> {
    let table = select_table(state, params.table.as_deref())?;
    let confidence = params.confidence_flag();
    let confidence_param = if confidence { "true" } else { "" };
    let term = params.q.as_deref().unwrap_or("").trim();

    let query = ListQuery::from_params(
        term,
        params.start.as_deref(),
        params.take.as_deref(),
        state.default_page_size(),
    );

    let source = PackageSource::new(state.client.clone(), table.name.clone(), confidence);
    let mut controller = ListController::new(source, query.clone());
    controller.mount().await;
    let list = controller.into_state();

    let extra = [("table", table.name.as_str()), ("confidence", confidence_param)];
    let list_href = |q: &ListQuery| q.href(BASE_PATH, "q", &extra);
    let edit_href = |row: &PackageRow| {
        query.href(
            BASE_PATH,
            "q",
            &[
                ("table", table.name.as_str()),
                ("confidence", confidence_param),
                ("edit", row.package.as_str()),
            ],
        )
    };

    let view = list_body(
        &list,
        &state.page_sizes(query.page_size),
        |rows: &[PackageRow]| package_table(rows, table.confidence, &edit_href),
        &list_href,
    );

    let take = query.page_size.to_string();
    let mut body = String::from(r#"<div class="toolbar"><h1>GitLink</h1>"#);
    body.push_str(&table_dropdown(
        &state.config.gitlink.tables,
        &table.name,
        query.page_size,
    ));
    body.push_str(&search_form(
        BASE_PATH,
        "q",
        term,
        &[
            ("table", table.name.as_str()),
            ("confidence", confidence_param),
            ("take", take.as_str()),
        ],
        "Search packages",
    ));
    body.push_str("</div>");
    body.push_str(&view.html);

    let mut status = view.status;
    let editing = params
        .edit
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    if let Some(package) = editing {
        let row = list
            .data()
            .items
            .iter()
            .find(|row| row.package == package)
            .cloned()
            .unwrap_or_else(|| PackageRow {
                package: package.to_string(),
                key: package.to_string(),
                ..Default::default()
            });

        let return_to = list_href(&query);
        let form = match &rejected {
            Some(r) => EditForm {
                link: &r.link,
                confidence: r.confidence.as_deref(),
                error: Some(&r.error),
            },
            None => EditForm {
                link: row.git_link.as_deref().unwrap_or(""),
                confidence: None,
                error: None,
            },
        };
        body.push_str(&edit_modal(&row, table, &form, &return_to));

        if let Some(r) = &rejected {
            status = r.status;
        }
    }

    Ok(page(status, "GitLink", Section::GitLink, "", &body))
}
