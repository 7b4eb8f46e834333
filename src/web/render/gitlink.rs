//! Package table, table selector and edit modal for the git-link editor

use crate::client::PackageRow;
use crate::config::TableConfig;

use super::{escape, fmt_opt, overlay, Overlay};

/// Table selector; switching tables starts again from page 1
pub fn table_dropdown(tables: &[TableConfig], current: &str, take: u64) -> String {
    let mut html = String::from(
        r#"<form class="table-select" method="get" action="/gitlink"><label for="table">Table</label> <select id="table" name="table" onchange="this.form.submit()">"#,
    );
    for table in tables {
        let selected = if table.name == current { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{name}"{selected}>{name}</option>"#,
            name = escape(&table.name),
            selected = selected
        ));
    }
    html.push_str(&format!(
        r#"</select><input type="hidden" name="take" value="{}"><noscript><button type="submit">Go</button></noscript></form>"#,
        take
    ));
    html
}

/// Only plain web URLs become links; anything else is shown as text
fn is_web_url(value: &str) -> bool {
    let lower = value.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn cell_link(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(url) if is_web_url(url) => format!(
            r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a>"#,
            url = escape(url)
        ),
        Some(text) if !text.is_empty() => escape(text),
        _ => "-".to_string(),
    }
}

/// Package rows with an Edit action per row
pub fn package_table(
    rows: &[PackageRow],
    show_confidence: bool,
    edit_href: &dyn Fn(&PackageRow) -> String,
) -> String {
    let mut html = String::from(
        r#"<table class="packages"><thead><tr><th>Package</th><th>Description</th><th>Homepage</th><th>Git Link</th>"#,
    );
    if show_confidence {
        html.push_str("<th>Link Confidence</th>");
    }
    html.push_str("<th>Action</th></tr></thead><tbody>");

    for row in rows {
        html.push_str(&format!(
            r#"<tr class="package-row" data-key="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td>"#,
            escape(&row.key),
            escape(&row.package),
            escape(row.description.as_deref().unwrap_or("-")),
            cell_link(&row.homepage),
            cell_link(&row.git_link),
        ));
        if show_confidence {
            html.push_str(&format!("<td>{}</td>", fmt_opt(row.link_confidence)));
        }
        html.push_str(&format!(
            r#"<td><a class="edit" href="{}">Edit</a></td></tr>"#,
            escape(&edit_href(row))
        ));
    }

    html.push_str("</tbody></table>");
    html
}

/// Values re-displayed in the edit form after a rejected submission
#[derive(Debug, Clone, Default)]
pub struct EditForm<'a> {
    pub link: &'a str,
    pub confidence: Option<&'a str>,
    pub error: Option<&'a str>,
}

/// Edit modal for one package row
///
/// Confirm posts to `/gitlink/update`; Cancel and Close return to `return_to`.
pub fn edit_modal(
    row: &PackageRow,
    table: &TableConfig,
    form: &EditForm<'_>,
    return_to: &str,
) -> String {
    let mut body = String::from(r#"<div class="edit-grid"><div class="package-info">"#);
    body.push_str(&format!(
        "<p><strong>Package Name:</strong> {}</p>",
        escape(&row.package)
    ));
    body.push_str(&format!(
        "<p><strong>Description:</strong> {}</p>",
        escape(row.description.as_deref().unwrap_or("-"))
    ));
    body.push_str(&format!(
        "<p><strong>Homepage:</strong> {}</p>",
        cell_link(&row.homepage)
    ));
    body.push_str(&format!(
        "<p><strong>Current GitLink:</strong> {}</p>",
        cell_link(&row.git_link)
    ));
    body.push_str(&format!(
        "<p><strong>Table Name:</strong> {}</p>",
        escape(&table.name)
    ));
    body.push_str("</div>");

    body.push_str(r#"<form class="edit-form" method="post" action="/gitlink/update">"#);
    if let Some(error) = form.error {
        body.push_str(&format!(
            r#"<div class="form-error" role="alert">{}</div>"#,
            escape(error)
        ));
    }
    body.push_str(&format!(
        r#"<input type="hidden" name="package" value="{}"><input type="hidden" name="table" value="{}"><input type="hidden" name="return_to" value="{}">"#,
        escape(&row.package),
        escape(&table.name),
        escape(return_to)
    ));
    body.push_str(&format!(
        r#"<div class="form-row"><label for="link">New GitLink</label><input id="link" type="text" name="link" value="{}" required></div>"#,
        escape(form.link)
    ));
    if table.confidence {
        let confidence = form
            .confidence
            .map(String::from)
            .or_else(|| row.link_confidence.map(|c| c.to_string()))
            .unwrap_or_else(|| "1".to_string());
        body.push_str(&format!(
            r#"<div class="form-row"><label for="confidence">Link Confidence</label><input id="confidence" type="number" name="confidence" min="0" max="1" step="any" value="{}" required></div>"#,
            escape(&confidence)
        ));
    }
    body.push_str(&format!(
        r#"<div class="actions"><a class="cancel" href="{}">Cancel</a><button type="submit">Confirm</button></div></form></div>"#,
        escape(return_to)
    ));

    overlay(Overlay::Modal, "Edit GitLink", return_to, &body)
}
