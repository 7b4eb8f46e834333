//! Package tables offered by the git-link editor

use serde::Deserialize;

/// One distribution package table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableConfig {
    /// Backend table name, e.g. `arch_packages`
    pub name: String,
    /// Whether the table has a `link_confidence` column
    #[serde(default)]
    pub confidence: bool,
}

impl TableConfig {
    fn new(name: &str, confidence: bool) -> Self {
        Self {
            name: name.to_string(),
            confidence,
        }
    }
}

/// Git-link editor settings
#[derive(Debug, Clone, PartialEq)]
pub struct GitlinkConfig {
    pub tables: Vec<TableConfig>,
    /// Table shown when the URL names none
    pub default_table: String,
}

impl Default for GitlinkConfig {
    fn default() -> Self {
        Self {
            tables: vec![
                TableConfig::new("arch_packages", true),
                TableConfig::new("alpine_packages", true),
            ],
            default_table: "arch_packages".to_string(),
        }
    }
}

/// Git-link settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileGitlink {
    pub tables: Option<Vec<TableConfig>>,
    pub default_table: Option<String>,
}

impl GitlinkConfig {
    /// Create from file config with defaults
    ///
    /// An unknown `default_table` falls back to the first configured table.
    pub fn from_file(file: Option<FileGitlink>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let tables: Vec<TableConfig> = file
            .tables
            .unwrap_or_default()
            .into_iter()
            .filter(|t| !t.name.trim().is_empty())
            .collect();
        let tables = if tables.is_empty() {
            defaults.tables
        } else {
            tables
        };

        let default_table = file
            .default_table
            .filter(|name| tables.iter().any(|t| &t.name == name))
            .or_else(|| tables.first().map(|t| t.name.clone()))
            .unwrap_or(defaults.default_table);

        Self {
            tables,
            default_table,
        }
    }

    /// Look up a configured table by name
    pub fn table(&self, name: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// The named table, or the default one when `name` is empty or unknown
    pub fn resolve(&self, name: Option<&str>) -> Option<&TableConfig> {
        name.and_then(|n| self.table(n))
            .or_else(|| self.table(&self.default_table))
            .or_else(|| self.tables.first())
    }
}
