//! Pure list state machine
//!
//! `ListState::apply(event)` returns the next state plus, when the event
//! calls for one, the fetch the caller must issue. Every fetch carries a
//! sequence number; a completion is only applied when it answers the most
//! recently issued fetch, so late responses can never overwrite newer data.

use crate::client::Page;

use super::query::ListQuery;

/// What the list currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    /// Nothing loaded or requested yet
    Idle,
    Loading,
    /// Data with at least one item
    Ready,
    /// Successful fetch with zero items
    Empty,
    /// The last fetch failed; carries a user-facing message
    Failed(String),
}

/// A fetch the caller must perform and report back with the same `seq`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub term: String,
    pub offset: u64,
    pub take: u64,
}

#[derive(Debug, Clone)]
pub enum ListEvent<T> {
    /// Data already fetched for the current URL; accepted once, before mount
    Adopt(Page<T>),
    /// First activation; fetches the current query unless data was adopted
    Mount,
    FilterChanged(String),
    PageChanged { page: u64, page_size: u64 },
    FetchSucceeded { seq: u64, page: Page<T> },
    FetchFailed { seq: u64, message: String },
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    query: ListQuery,
    data: Page<T>,
    status: ListStatus,
    /// Sequence number of the newest fetch issued
    issued: u64,
    /// One-shot guard separating initial mount from later updates
    mounted: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new(ListQuery::default())
    }
}

impl<T> ListState<T> {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            data: Page::empty(),
            status: ListStatus::Idle,
            issued: 0,
            mounted: false,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn data(&self) -> &Page<T> {
        &self.data
    }

    pub fn status(&self) -> &ListStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ListStatus::Loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Sequence number of the newest fetch issued (0 before any)
    pub fn latest_seq(&self) -> u64 {
        self.issued
    }

    /// Query a `PageChanged { page, page_size }` event moves this list to
    ///
    /// Pagination links are built from this so a followed link reproduces
    /// exactly the fetch the event would issue.
    pub fn query_for_page(&self, page: u64, page_size: u64) -> ListQuery {
        page_target(&self.query, page, page_size)
    }

    /// Apply one event
    pub fn apply(mut self, event: ListEvent<T>) -> (Self, Option<FetchRequest>) {
        match event {
            ListEvent::Adopt(page) => {
                if !self.mounted {
                    self.mounted = true;
                    self.status = status_for(&page);
                    self.data = page;
                }
                (self, None)
            }
            ListEvent::Mount => {
                if self.mounted {
                    return (self, None);
                }
                self.mounted = true;
                let request = self.issue();
                (self, Some(request))
            }
            ListEvent::FilterChanged(term) => {
                if self.mounted && term == self.query.term {
                    return (self, None);
                }
                self.mounted = true;
                self.query = self.query.with_term(term);
                let request = self.issue();
                (self, Some(request))
            }
            ListEvent::PageChanged { page, page_size } => {
                self.mounted = true;
                self.query = page_target(&self.query, page, page_size);
                let request = self.issue();
                (self, Some(request))
            }
            ListEvent::FetchSucceeded { seq, page } => {
                if seq != self.issued {
                    tracing::debug!(seq, latest = self.issued, "Discarding stale list response");
                    return (self, None);
                }
                self.status = status_for(&page);
                self.data = page;
                (self, None)
            }
            ListEvent::FetchFailed { seq, message } => {
                if seq != self.issued {
                    tracing::debug!(seq, latest = self.issued, "Discarding stale list failure");
                    return (self, None);
                }
                self.status = ListStatus::Failed(message);
                self.data = Page::empty();
                (self, None)
            }
        }
    }

    /// In-place variant of [`apply`](Self::apply)
    pub fn dispatch(&mut self, event: ListEvent<T>) -> Option<FetchRequest> {
        let state = std::mem::take(self);
        let (next, request) = state.apply(event);
        *self = next;
        request
    }

    fn issue(&mut self) -> FetchRequest {
        self.issued += 1;
        self.status = ListStatus::Loading;
        FetchRequest {
            seq: self.issued,
            term: self.query.term.clone(),
            offset: self.query.offset(),
            take: self.query.page_size,
        }
    }
}

fn status_for<T>(page: &Page<T>) -> ListStatus {
    if page.items.is_empty() {
        ListStatus::Empty
    } else {
        ListStatus::Ready
    }
}

/// Same term, new page and size
fn page_target(query: &ListQuery, page: u64, page_size: u64) -> ListQuery {
    query.with_page(page, page_size)
}
