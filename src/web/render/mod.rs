//! Server-side HTML rendering
//!
//! Every view is a plain string built with `format!`. Anything that came
//! from the backend or the URL goes through [`escape`] before it is written.

pub mod gitlink;
pub mod list;
pub mod score;

use chrono::{DateTime, Utc};

use crate::config::VERSION;

// ─────────────────────────────────────────────────────────────────────────────
// Text helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Escape text for HTML element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Scores are shown with four decimals; missing ones as a dash
pub fn fmt_score(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}

pub fn fmt_time(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "-".to_string(),
    }
}

pub fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Page shell
// ─────────────────────────────────────────────────────────────────────────────

/// Top menu entry highlighted on the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Rankings,
    GitLink,
    /// Result, detail and history pages
    Search,
}

const STYLE: &str = r#"
    :root {
        --bg: #f8fafc;
        --card: #ffffff;
        --border: #e2e8f0;
        --text: #0f172a;
        --muted: #64748b;
        --accent: #1e40af;
        --error: #dc2626;
        --warning: #d97706;
    }
    * { box-sizing: border-box; }
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: var(--bg); color: var(--text); }
    a { color: var(--accent); text-decoration: none; }
    .nav { display: flex; align-items: center; gap: 2rem; padding: 0.75rem 2rem; background: var(--card); border-bottom: 1px solid var(--border); }
    .nav .logo { font-weight: 700; font-size: 1.125rem; color: var(--text); }
    .nav .menu { display: flex; gap: 1rem; }
    .nav .menu a.active { font-weight: 700; border-bottom: 2px solid var(--accent); }
    .nav form { margin-left: auto; }
    main { max-width: 1200px; margin: 0 auto; padding: 2rem; }
    .search { display: flex; gap: 0.5rem; }
    .search input[type=text] { flex: 1; min-width: 16rem; padding: 0.5rem 0.75rem; border: 1px solid var(--border); border-radius: 6px; }
    .search-hero { margin: 20vh auto 0; max-width: 640px; text-align: center; }
    .search-hero h1 { font-size: 2.5rem; }
    .card { margin: 1.5rem 0; padding: 1.5rem 2rem; background: var(--card); border: 1px solid var(--border); border-radius: 12px; }
    .card .link { font-weight: 700; }
    .card .updated { margin-top: 0.75rem; color: var(--muted); }
    .card .no-score { margin-top: 0.75rem; color: var(--error); }
    .stats { display: flex; gap: 3rem; margin-top: 1rem; }
    .stat .title { color: var(--muted); font-size: 0.875rem; }
    .stat .value { font-size: 1.5rem; }
    .card-links { display: flex; gap: 1rem; margin-top: 1rem; }
    table { width: 100%; border-collapse: collapse; margin-bottom: 1.5rem; background: var(--card); }
    th, td { padding: 0.5rem 0.75rem; text-align: left; border-bottom: 1px solid var(--border); vertical-align: top; }
    th { background: var(--bg); }
    .tag { display: inline-block; padding: 0 0.4rem; margin: 0 0.25rem 0.25rem 0; border: 1px solid var(--border); border-radius: 4px; font-size: 0.8rem; }
    .result { margin: 4rem auto; text-align: center; }
    .result h2 { margin-bottom: 0.25rem; }
    .result p { color: var(--muted); }
    .result-error h2 { color: var(--error); }
    .result-warning h2 { color: var(--warning); }
    .pagination { display: flex; flex-wrap: wrap; align-items: center; gap: 0.5rem; margin: 1.5rem 0; }
    .pagination a, .pagination span { padding: 0.25rem 0.6rem; border: 1px solid var(--border); border-radius: 4px; }
    .pagination .current { background: var(--accent); color: #fff; border-color: var(--accent); }
    .pagination .disabled { color: var(--muted); }
    .pagination .sizes { margin-left: auto; display: flex; gap: 0.25rem; }
    .overlay { position: fixed; inset: 0; background: rgba(15, 23, 42, 0.45); overflow-y: auto; }
    .overlay .panel { background: var(--card); padding: 1.5rem 2rem; }
    .overlay-modal .panel { max-width: 1100px; margin: 4rem auto; border-radius: 12px; }
    .overlay-drawer .panel { position: absolute; top: 0; right: 0; bottom: 0; width: min(900px, 90vw); overflow-y: auto; }
    .overlay .panel-head { display: flex; justify-content: space-between; align-items: center; }
    .toolbar { display: flex; align-items: center; gap: 1rem; margin-bottom: 1rem; }
    .form-row { margin-bottom: 1rem; }
    .form-row label { display: block; font-weight: 600; margin-bottom: 0.25rem; }
    .form-row input { width: 100%; padding: 0.5rem; border: 1px solid var(--border); border-radius: 6px; }
    .form-error { color: var(--error); margin-bottom: 1rem; }
    .edit-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
    .actions { display: flex; gap: 1rem; justify-content: flex-end; }
    footer { text-align: center; color: var(--muted); padding: 2rem; font-size: 0.8rem; }
"#;

/// Navigation bar: logo, top menu, inline search box
pub fn nav(section: Section, search: &str) -> String {
    let item = |target: Section, href: &str, label: &str| {
        let class = if section == target { " class=\"active\"" } else { "" };
        format!("<a href=\"{}\"{}>{}</a>", href, class, label)
    };

    format!(
        r#"<nav class="nav">
    <a class="logo" href="/">Criticality Score</a>
    <div class="menu">{}{}{}</div>
    {}
</nav>"#,
        item(Section::Home, "/", "Home"),
        item(Section::Rankings, "/rankings", "Rankings"),
        item(Section::GitLink, "/gitlink", "GitLink"),
        search_form("/results", "q", search, &[], "Search repositories"),
    )
}

/// GET search form; `hidden` pairs ride along with the term
pub fn search_form(
    action: &str,
    name: &str,
    value: &str,
    hidden: &[(&str, &str)],
    placeholder: &str,
) -> String {
    let mut html = format!(r#"<form class="search" method="get" action="{}">"#, escape(action));
    for (key, val) in hidden {
        if !val.is_empty() {
            html.push_str(&format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                escape(key),
                escape(val)
            ));
        }
    }
    html.push_str(&format!(
        r#"<input type="text" name="{}" value="{}" placeholder="{}"><button type="submit">Search</button></form>"#,
        escape(name),
        escape(value),
        escape(placeholder)
    ));
    html
}

/// Full HTML document around `body`
pub fn layout(title: &str, section: Section, search: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Criticality Score</title>
    <style>{style}</style>
</head>
<body>
{nav}
<main>
{body}
</main>
<footer>criticality-web v{version}</footer>
</body>
</html>
"#,
        title = escape(title),
        style = STYLE,
        nav = nav(section, search),
        body = body,
        version = VERSION,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared fragments
// ─────────────────────────────────────────────────────────────────────────────

/// Tone of a result panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warning,
    Error,
}

/// Centered title + subtitle block used for empty and error states
pub fn result_panel(tone: Tone, title: &str, subtitle: &str) -> String {
    let class = match tone {
        Tone::Info => "result",
        Tone::Warning => "result result-warning",
        Tone::Error => "result result-error",
    };
    format!(
        r#"<div class="{}"><h2>{}</h2><p>{}</p></div>"#,
        class,
        escape(title),
        escape(subtitle)
    )
}

/// How an overlay is presented over the page beneath it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// Centered dialog (score detail, edit form)
    Modal,
    /// Right-hand side panel (histories)
    Drawer,
}

/// Overlay panel; closing it navigates to `close_href`
pub fn overlay(kind: Overlay, title: &str, close_href: &str, body: &str) -> String {
    let class = match kind {
        Overlay::Modal => "overlay overlay-modal",
        Overlay::Drawer => "overlay overlay-drawer",
    };
    format!(
        r#"<div class="{class}" role="dialog" aria-modal="true">
<div class="panel">
<div class="panel-head"><h2>{title}</h2><a class="close" href="{close}" aria-label="Close">Close</a></div>
{body}
</div>
</div>"#,
        class = class,
        title = escape(title),
        close = escape(close_href),
        body = body,
    )
}
