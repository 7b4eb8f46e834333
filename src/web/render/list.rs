//! Generic list body and pagination control

use axum::http::StatusCode;

use crate::listing::{ListQuery, ListState, ListStatus};

use super::{escape, result_panel, Tone};

/// Pages shown on each side of the current one
const PAGE_WINDOW: u64 = 2;

/// Page numbers to show; `None` marks a gap
fn page_window(current: u64, last: u64) -> Vec<Option<u64>> {
    let low = current.saturating_sub(PAGE_WINDOW).max(1);
    let high = current.saturating_add(PAGE_WINDOW).min(last);

    let mut pages = Vec::new();
    if low > 1 {
        pages.push(Some(1));
        if low > 2 {
            pages.push(None);
        }
    }
    pages.extend((low..=high).map(Some));
    if high < last {
        if high + 1 < last {
            pages.push(None);
        }
        pages.push(Some(last));
    }
    pages
}

/// Previous / numbered / next links plus a page size selector
///
/// Every link is the URL of the query a `PageChanged` event would move the
/// list to; `href` maps that query to its URL. A size change keeps the
/// current page when it still exists under the new size and otherwise lands
/// on the new last page.
pub fn pagination<T>(
    state: &ListState<T>,
    total: u64,
    size_options: &[u64],
    href: &dyn Fn(&ListQuery) -> String,
) -> String {
    let query = state.query();
    let last = query.page_count(total);
    let current = query.page.min(last);
    let size = query.page_size;

    let link = |page: u64, label: &str, class: &str| {
        format!(
            r#"<a class="{}" href="{}">{}</a>"#,
            class,
            escape(&href(&state.query_for_page(page, size))),
            label
        )
    };

    let mut html = String::from(r#"<nav class="pagination" aria-label="Pagination">"#);
    html.push_str(&format!(r#"<span class="total">Total {}</span>"#, total));

    if current > 1 {
        html.push_str(&link(current - 1, "&lsaquo; Prev", "prev"));
    } else {
        html.push_str(r#"<span class="prev disabled">&lsaquo; Prev</span>"#);
    }

    for entry in page_window(current, last) {
        match entry {
            Some(page) if page == current => {
                html.push_str(&format!(
                    r#"<span class="page current" aria-current="page">{}</span>"#,
                    page
                ));
            }
            Some(page) => html.push_str(&link(page, &page.to_string(), "page")),
            None => html.push_str(r#"<span class="gap">&hellip;</span>"#),
        }
    }

    if current < last {
        html.push_str(&link(current + 1, "Next &rsaquo;", "next"));
    } else {
        html.push_str(r#"<span class="next disabled">Next &rsaquo;</span>"#);
    }

    html.push_str(r#"<span class="sizes">"#);
    for &option in size_options {
        if option == size {
            html.push_str(&format!(r#"<span class="size current">{} / page</span>"#, option));
        } else {
            let page = current.min(query.with_page(1, option).page_count(total));
            html.push_str(&format!(
                r#"<a class="size" href="{}">{} / page</a>"#,
                escape(&href(&state.query_for_page(page, option))),
                option
            ));
        }
    }
    html.push_str("</span></nav>");
    html
}

/// Rendered list plus the HTTP status it should be served with
pub struct ListView {
    pub status: StatusCode,
    pub html: String,
}

/// Items, pagination, or the empty / failed panel for a list state
pub fn list_body<T>(
    state: &ListState<T>,
    size_options: &[u64],
    render_items: impl Fn(&[T]) -> String,
    href: &dyn Fn(&ListQuery) -> String,
) -> ListView {
    match state.status() {
        ListStatus::Ready => {
            let data = state.data();
            let mut html = render_items(&data.items);
            html.push_str(&pagination(state, data.total, size_options, href));
            ListView {
                status: StatusCode::OK,
                html,
            }
        }
        ListStatus::Empty => ListView {
            status: StatusCode::OK,
            html: result_panel(
                Tone::Warning,
                "No Results Found",
                "Sorry, we couldn't find any results for your search.",
            ),
        },
        ListStatus::Failed(message) => ListView {
            status: StatusCode::BAD_GATEWAY,
            html: result_panel(Tone::Error, "Backend unavailable", message),
        },
        ListStatus::Idle | ListStatus::Loading => ListView {
            status: StatusCode::OK,
            html: r#"<div class="result"><p>Loading&hellip;</p></div>"#.to_string(),
        },
    }
}
