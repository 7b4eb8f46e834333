//! Paginated list controller
//!
//! One generic controller shared by every list view (search results,
//! histories, rankings, package tables). `query` maps URLs to list queries,
//! `state` is the pure reducer, `controller` runs it against a
//! [`PageSource`], and `sources` binds sources to backend endpoints.

mod controller;
mod query;
mod sources;
mod state;

pub use controller::{ListController, PageSource};
pub use query::{encode_pairs, ListQuery};
pub use sources::{HistoriesSource, PackageSource, RankingsSource, ResultsSource};
pub use state::{FetchRequest, ListEvent, ListState, ListStatus};
