//! Shared, immutable per-process state handed to every handler

use std::sync::Arc;

use anyhow::Result;

use crate::client::BackendClient;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    /// Typed client for the backend API (pooled)
    pub client: BackendClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let client = BackendClient::new(&config.backend)?;
        Ok(Self::with_client(config, client))
    }

    /// Use a prebuilt client (tests point it at a mock backend)
    pub fn with_client(config: Config, client: BackendClient) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn page_sizes(&self, current: u64) -> Vec<u64> {
        self.config.listing.options_with(current)
    }

    pub fn default_page_size(&self) -> u64 {
        self.config.listing.default_page_size
    }
}
