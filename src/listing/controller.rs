//! Drives a [`ListState`] against a page source
//!
//! The reducer decides *what* to fetch; the controller performs the fetch
//! and feeds the outcome back in. Fetches can also be split into
//! `begin` / `fetch` / `complete` so several may be in flight at once.

use std::future::Future;

use crate::client::{ClientError, Page};

use super::query::ListQuery;
use super::state::{FetchRequest, ListEvent, ListState};

/// Fetch function for one kind of list
pub trait PageSource {
    type Item;

    /// Fetch `take` items for `term` starting at `offset`
    fn fetch(
        &self,
        term: &str,
        offset: u64,
        take: u64,
    ) -> impl Future<Output = Result<Page<Self::Item>, ClientError>> + Send;
}

pub struct ListController<S: PageSource> {
    source: S,
    state: ListState<S::Item>,
}

impl<S: PageSource> ListController<S> {
    pub fn new(source: S, query: ListQuery) -> Self {
        Self {
            source,
            state: ListState::new(query),
        }
    }

    pub fn state(&self) -> &ListState<S::Item> {
        &self.state
    }

    pub fn into_state(self) -> ListState<S::Item> {
        self.state
    }

    /// Accept already-fetched data for the current query
    pub fn adopt(&mut self, page: Page<S::Item>) {
        self.state.dispatch(ListEvent::Adopt(page));
    }

    /// Initial activation; fetches unless data was adopted
    pub async fn mount(&mut self) {
        self.dispatch(ListEvent::Mount).await;
    }

    /// Apply an event and run the fetch it produces, if any
    pub async fn dispatch(&mut self, event: ListEvent<S::Item>) {
        let Some(request) = self.state.dispatch(event) else {
            return;
        };

        let guard = LoadingGuard::new(&mut self.state, request.seq);
        let outcome = fetch_page(&self.source, &request).await;
        guard.settle(outcome);
    }

    /// Apply an event without fetching; the caller runs the returned request
    pub fn begin(&mut self, event: ListEvent<S::Item>) -> Option<FetchRequest> {
        self.state.dispatch(event)
    }

    /// Run a request produced by [`begin`](Self::begin)
    pub async fn fetch(&self, request: &FetchRequest) -> ListEvent<S::Item> {
        fetch_page(&self.source, request).await
    }

    /// Feed a completion back in; stale completions are dropped
    pub fn complete(&mut self, outcome: ListEvent<S::Item>) {
        self.state.dispatch(outcome);
    }
}

async fn fetch_page<S: PageSource>(source: &S, request: &FetchRequest) -> ListEvent<S::Item> {
    tracing::debug!(
        seq = request.seq,
        term = %request.term,
        offset = request.offset,
        take = request.take,
        "Fetching list page"
    );

    match source.fetch(&request.term, request.offset, request.take).await {
        Ok(page) => ListEvent::FetchSucceeded {
            seq: request.seq,
            page,
        },
        Err(e) => {
            tracing::error!("List fetch failed: {}", e);
            ListEvent::FetchFailed {
                seq: request.seq,
                message: e.user_message(),
            }
        }
    }
}

/// Releases the loading flag for `seq` if the fetch never settles
/// (e.g. the request future is dropped mid-flight)
struct LoadingGuard<'a, T> {
    state: &'a mut ListState<T>,
    seq: u64,
    settled: bool,
}

impl<'a, T> LoadingGuard<'a, T> {
    fn new(state: &'a mut ListState<T>, seq: u64) -> Self {
        Self {
            state,
            seq,
            settled: false,
        }
    }

    fn settle(mut self, outcome: ListEvent<T>) {
        self.settled = true;
        self.state.dispatch(outcome);
    }
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.dispatch(ListEvent::FetchFailed {
                seq: self.seq,
                message: "Request was cancelled".to_string(),
            });
        }
    }
}
