//! Page sources backed by the scoring backend

use std::future::Future;

use crate::client::{BackendClient, ClientError, Page, PackageRow, RankingResult, ScoreResult};

use super::controller::PageSource;

/// Search results; the term is the search query
#[derive(Debug, Clone)]
pub struct ResultsSource {
    client: BackendClient,
}

impl ResultsSource {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

impl PageSource for ResultsSource {
    type Item = ScoreResult;

    fn fetch(
        &self,
        term: &str,
        offset: u64,
        take: u64,
    ) -> impl Future<Output = Result<Page<ScoreResult>, ClientError>> + Send {
        let client = self.client.clone();
        let term = term.to_string();
        async move { client.get_results(&term, offset, take).await }
    }
}

/// Score history; the term is the repository link
#[derive(Debug, Clone)]
pub struct HistoriesSource {
    client: BackendClient,
}

impl HistoriesSource {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

impl PageSource for HistoriesSource {
    type Item = ScoreResult;

    fn fetch(
        &self,
        term: &str,
        offset: u64,
        take: u64,
    ) -> impl Future<Output = Result<Page<ScoreResult>, ClientError>> + Send {
        let client = self.client.clone();
        let link = term.to_string();
        async move { client.get_histories(&link, offset, take).await }
    }
}

/// Global ranking; the term is ignored
#[derive(Debug, Clone)]
pub struct RankingsSource {
    client: BackendClient,
}

impl RankingsSource {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

impl PageSource for RankingsSource {
    type Item = RankingResult;

    fn fetch(
        &self,
        _term: &str,
        offset: u64,
        take: u64,
    ) -> impl Future<Output = Result<Page<RankingResult>, ClientError>> + Send {
        let client = self.client.clone();
        async move {
            let page = client.get_rankings(offset, take, false).await?;
            Ok(open_ended(page, offset, take))
        }
    }
}

/// The rankings endpoint reports the length of the returned page as `total`,
/// so the real size is unknown. A full page promises one more item past it so
/// a Next link is offered; a short page ends the list where it stops.
fn open_ended<T>(mut page: Page<T>, offset: u64, take: u64) -> Page<T> {
    let returned = page.items.len() as u64;
    page.total = if take > 0 && returned >= take {
        offset.saturating_add(take).saturating_add(1)
    } else {
        offset.saturating_add(returned)
    };
    page
}

/// Rows of one distribution package table
///
/// An empty term lists the table page by page; anything else searches it.
#[derive(Debug, Clone)]
pub struct PackageSource {
    client: BackendClient,
    table: String,
    confidence: bool,
}

impl PackageSource {
    pub fn new(client: BackendClient, table: impl Into<String>, confidence: bool) -> Self {
        Self {
            client,
            table: table.into(),
            confidence,
        }
    }
}

impl PageSource for PackageSource {
    type Item = PackageRow;

    fn fetch(
        &self,
        term: &str,
        offset: u64,
        take: u64,
    ) -> impl Future<Output = Result<Page<PackageRow>, ClientError>> + Send {
        let client = self.client.clone();
        let table = self.table.clone();
        let confidence = self.confidence;
        let search = term.trim().to_string();

        async move {
            if search.is_empty() {
                client
                    .get_query_with_pagination(&table, take, offset, confidence)
                    .await
            } else {
                client
                    .get_search_packages(&table, take, offset, &search)
                    .await
            }
        }
    }
}
