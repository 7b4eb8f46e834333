//! List page size settings

use serde::Deserialize;

use crate::client::MAX_TAKE;

/// Page size settings shared by every list view
#[derive(Debug, Clone, PartialEq)]
pub struct ListingConfig {
    /// `take` used when the URL carries none
    pub default_page_size: u64,
    /// Choices offered by the page size selector, ascending
    pub page_size_options: Vec<u64>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}

/// Listing settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileListing {
    pub default_page_size: Option<u64>,
    pub page_size_options: Option<Vec<u64>>,
}

impl ListingConfig {
    /// Create from file config with defaults
    ///
    /// Sizes are clamped to `1..=MAX_TAKE`; an empty option list falls back
    /// to the defaults.
    pub fn from_file(file: Option<FileListing>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let mut options: Vec<u64> = file
            .page_size_options
            .unwrap_or_default()
            .into_iter()
            .map(|size| size.clamp(1, MAX_TAKE))
            .collect();
        options.sort_unstable();
        options.dedup();
        if options.is_empty() {
            options = defaults.page_size_options;
        }

        Self {
            default_page_size: file
                .default_page_size
                .unwrap_or(defaults.default_page_size)
                .clamp(1, MAX_TAKE),
            page_size_options: options,
        }
    }

    /// Options for the selector, always including `current`
    pub fn options_with(&self, current: u64) -> Vec<u64> {
        let mut options = self.page_size_options.clone();
        if !options.contains(&current) {
            options.push(current);
            options.sort_unstable();
        }
        options
    }
}
