//! Wire types for the scoring backend
//!
//! Shapes mirror the backend's JSON contract. The backend is loose about
//! nulls (Go nil slices, nullable columns), so most fields are optional and
//! collections decode `null` as empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Decode `null` (or a missing field, together with `#[serde(default)]`) as `T::default()`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Link confidence arrives as a number from some tables and as a numeric
/// string from others
fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Scores
// ─────────────────────────────────────────────────────────────────────────────

/// Backend-computed score for one repository link
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Absent when the link is known but has not been scored yet
    #[serde(rename = "scoreID")]
    pub score_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    pub score: Option<f64>,
    pub git_score: Option<f64>,
    pub lang_score: Option<f64>,
    pub distro_score: Option<f64>,
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub git_detail: Vec<GitDetail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lang_detail: Vec<LangDetail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dist_detail: Vec<DistDetail>,
}

impl ScoreResult {
    /// Whether the link points at GitHub (drives the card icon)
    pub fn is_github(&self) -> bool {
        self.link.contains("github")
    }
}

/// Git metadata sub-score row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitDetail {
    pub license: Option<Vec<String>>,
    pub language: Option<Vec<String>>,
    pub created_since: Option<DateTime<Utc>>,
    pub updated_since: Option<DateTime<Utc>>,
    pub contributor_count: Option<i64>,
    pub org_count: Option<i64>,
    pub commit_frequency: Option<f64>,
    pub update_time: Option<DateTime<Utc>>,
}

/// Language-ecosystem sub-score row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LangDetail {
    /// Ecosystem code, see [`crate::labels::Ecosystem`]
    #[serde(rename = "type")]
    pub kind: Option<i64>,
    pub lang_eco_impact: Option<f64>,
    pub dep_count: Option<i64>,
    pub update_time: Option<DateTime<Utc>>,
}

/// Distribution sub-score row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistDetail {
    /// Distribution code, see [`crate::labels::Distribution`]
    #[serde(rename = "type")]
    pub kind: Option<i64>,
    pub count: Option<i64>,
    pub impact: Option<f64>,
    pub page_rank: Option<f64>,
    pub update_time: Option<DateTime<Utc>>,
}

/// A score result with its position in the global ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    #[serde(flatten)]
    pub result: ScoreResult,
    #[serde(default)]
    pub ranking: i64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pagination envelope
// ─────────────────────────────────────────────────────────────────────────────

/// Generic paginated envelope
///
/// `total` is the size of the whole matching set; `count` is how many items
/// this page actually carries; `start` echoes the requested offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            total: 0,
            start: 0,
            count: 0,
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Distribution package tables
// ─────────────────────────────────────────────────────────────────────────────

/// One row of a distribution package table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageRow {
    #[serde(default, deserialize_with = "null_as_default")]
    pub package: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub git_link: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub link_confidence: Option<f64>,
    /// Row identity for rendering; not part of the backend schema
    #[serde(skip)]
    pub key: String,
}

/// Envelope returned by `/query-with-pagination` and `/search-packages`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackagePage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<PackageRow>,
    #[serde(rename = "totalPages", default)]
    pub total_pages: u64,
}

impl PackagePage {
    /// Normalise into the common [`Page`] shape
    ///
    /// The backend reports page counts, not item counts, so `total` is
    /// reconstructed as `total_pages * page_size`.
    pub fn into_page(self, offset: u64, page_size: u64) -> Page<PackageRow> {
        let items: Vec<PackageRow> = self
            .items
            .into_iter()
            .map(|mut row| {
                if row.key.is_empty() {
                    row.key = row.package.clone();
                }
                row
            })
            .collect();

        Page {
            total: self.total_pages.saturating_mul(page_size),
            start: offset,
            count: items.len() as u64,
            items,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

/// Query for `GET /results`
#[derive(Debug, Serialize)]
pub struct ResultsQuery<'a> {
    pub q: &'a str,
    pub start: u64,
    pub take: u64,
}

/// Query for `GET /histories`
#[derive(Debug, Serialize)]
pub struct HistoriesQuery<'a> {
    pub link: &'a str,
    pub start: u64,
    pub take: u64,
}

/// Query for `GET /rankings`
#[derive(Debug, Serialize)]
pub struct RankingsQuery {
    pub start: u64,
    pub take: u64,
    pub detail: bool,
}

/// Query for `GET /query-with-pagination`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery<'a> {
    pub table_name: &'a str,
    pub page_size: u64,
    pub offset: u64,
    pub confidence: bool,
}

/// Query for `GET /search-packages`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPackagesQuery<'a> {
    pub table_name: &'a str,
    pub page_size: u64,
    pub offset: u64,
    pub search_query: &'a str,
}

/// Body for `POST /update-gitlink`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGitLink {
    pub package_name: String,
    pub table_name: String,
    pub new_git_link: String,
    /// Sent as a string; the backend binds it as text
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "confidence_as_text"
    )]
    pub link_confidence: Option<f64>,
}

fn confidence_as_text<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&v.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Acknowledgement returned by write operations
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateAck {
    #[serde(default)]
    pub message: Option<String>,
}
