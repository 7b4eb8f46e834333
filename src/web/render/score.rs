//! Score cards and the score detail view

use crate::client::{DistDetail, GitDetail, LangDetail, ScoreResult};
use crate::labels::{Distribution, Ecosystem};
use crate::listing::encode_pairs;

use super::{escape, fmt_opt, fmt_score, fmt_time};

/// Where a card's Details / Histories links point
#[derive(Debug, Clone, Copy)]
pub struct CardLinks<'a> {
    /// `/detail` for the full page, `/results/detail` for the overlay
    pub detail_path: &'a str,
    /// `None` hides the Histories link
    pub histories_path: Option<&'a str>,
    /// Search parameters carried on both links
    pub keep: &'a [(&'a str, &'a str)],
}

impl CardLinks<'_> {
    pub fn detail_href(&self, score_id: i64) -> String {
        let query = encode_pairs(self.keep);
        if query.is_empty() {
            format!("{}/{}", self.detail_path, score_id)
        } else {
            format!("{}/{}?{}", self.detail_path, score_id, query)
        }
    }

    pub fn histories_href(&self, link: &str) -> Option<String> {
        let path = self.histories_path?;
        let mut pairs: Vec<(&str, &str)> = self.keep.iter().copied().filter(|(k, _)| *k != "link").collect();
        pairs.push(("link", link));
        Some(format!("{}?{}", path, encode_pairs(&pairs)))
    }
}

fn link_heading(item: &ScoreResult) -> String {
    let (class, title) = if item.is_github() {
        ("icon icon-github", "GitHub")
    } else {
        ("icon icon-fork", "Git repository")
    };
    format!(
        r#"<div class="link"><span class="{}" title="{}"></span> {}</div>"#,
        class,
        title,
        escape(&item.link)
    )
}

fn stat(title: &str, value: Option<f64>) -> String {
    format!(
        r#"<div class="stat"><div class="title">{}</div><div class="value">{}</div></div>"#,
        title,
        fmt_score(value)
    )
}

/// One search / history result
pub fn score_card(item: &ScoreResult, links: &CardLinks<'_>) -> String {
    let mut html = String::from(r#"<div class="card score-card">"#);
    html.push_str(&link_heading(item));

    if item.update_time.is_some() {
        html.push_str(&format!(
            r#"<div class="updated">Updated at {}</div>"#,
            fmt_time(item.update_time)
        ));
    }

    match item.score_id {
        None => html.push_str(r#"<div class="no-score">No Score Data Found</div>"#),
        Some(id) => {
            html.push_str(r#"<div class="stats">"#);
            html.push_str(&stat("Total Score", item.score));
            html.push_str(&stat("Git Metadata", item.git_score));
            html.push_str(&stat("Lang Ecosystem", item.lang_score));
            html.push_str(&stat("Distributions", item.distro_score));
            html.push_str("</div>");

            html.push_str(r#"<div class="card-links">"#);
            html.push_str(&format!(
                r#"<a href="{}">Details</a>"#,
                escape(&links.detail_href(id))
            ));
            if let Some(href) = links.histories_href(&item.link) {
                html.push_str(&format!(r#"<a href="{}">Histories</a>"#, escape(&href)));
            }
            html.push_str("</div>");
        }
    }

    html.push_str("</div>");
    html
}

// ─────────────────────────────────────────────────────────────────────────────
// Detail tables
// ─────────────────────────────────────────────────────────────────────────────

fn tags(values: &Option<Vec<String>>) -> String {
    match values {
        Some(values) => values
            .iter()
            .map(|v| format!(r#"<span class="tag">{}</span>"#, escape(v)))
            .collect(),
        None => String::new(),
    }
}

fn table(class: &str, headers: &[&str], rows: Vec<String>) -> String {
    let mut html = format!(r#"<table class="{}"><thead><tr>"#, class);
    for header in headers {
        html.push_str(&format!("<th>{}</th>", header));
    }
    html.push_str("</tr></thead><tbody>");
    if rows.is_empty() {
        html.push_str(&format!(
            r#"<tr class="empty-row"><td colspan="{}">No data</td></tr>"#,
            headers.len()
        ));
    }
    for row in rows {
        html.push_str(&row);
    }
    html.push_str("</tbody></table>");
    html
}

fn git_row(d: &GitDetail) -> String {
    format!(
        r#"<tr class="git-row"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
        fmt_opt(d.commit_frequency),
        fmt_opt(d.contributor_count),
        fmt_time(d.created_since),
        fmt_time(d.updated_since),
        tags(&d.language),
        tags(&d.license),
        fmt_opt(d.org_count),
        fmt_time(d.update_time),
    )
}

fn lang_row(d: &LangDetail) -> String {
    format!(
        r#"<tr class="lang-row"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
        Ecosystem::from_code(d.kind),
        fmt_opt(d.dep_count),
        fmt_opt(d.lang_eco_impact),
        fmt_time(d.update_time),
    )
}

fn dist_row(d: &DistDetail) -> String {
    format!(
        r#"<tr class="dist-row"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
        Distribution::from_code(d.kind),
        fmt_opt(d.count),
        fmt_opt(d.impact),
        fmt_opt(d.page_rank),
        fmt_time(d.update_time),
    )
}

/// Full breakdown of one score: git metadata, language ecosystems, distributions
pub fn score_detail(item: &ScoreResult) -> String {
    let mut html = String::from(r#"<div class="score-detail">"#);
    html.push_str(&link_heading(item));
    html.push_str(&format!("<h3>Total Score: {}</h3>", fmt_score(item.score)));

    html.push_str(&format!("<h3>Git Metadata: {}</h3>", fmt_score(item.git_score)));
    html.push_str(&table(
        "detail-git",
        &[
            "Commit Frequency",
            "Contributor Count",
            "Created Since",
            "Updated Since",
            "Language",
            "License",
            "Org Count",
            "Update Time",
        ],
        item.git_detail.iter().map(git_row).collect(),
    ));

    html.push_str(&format!(
        "<h3>Language Ecosystems: {}</h3>",
        fmt_score(item.lang_score)
    ));
    html.push_str(&table(
        "detail-lang",
        &["Type", "Dep Count", "Lang Eco Impact", "Update Time"],
        item.lang_detail.iter().map(lang_row).collect(),
    ));

    html.push_str(&format!(
        "<h3>Distributions: {}</h3>",
        fmt_score(item.distro_score)
    ));
    html.push_str(&table(
        "detail-dist",
        &["Type", "Count", "Impact", "Page Rank", "Update Time"],
        item.dist_detail.iter().map(dist_row).collect(),
    ));

    html.push_str("</div>");
    html
}
