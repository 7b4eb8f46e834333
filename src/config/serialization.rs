//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize `[[gitlink.tables]]` entries
    fn tables_to_toml(&self) -> String {
        let mut output = String::new();
        for table in &self.gitlink.tables {
            output.push_str("\n[[gitlink.tables]]\n");
            output.push_str(&format!("name = \"{}\"\n", table.name));
            output.push_str(&format!("confidence = {}\n", table.confidence));
        }
        output
    }

    /// Render the full config file
    pub fn to_toml(&self) -> String {
        let api_base = match &self.backend.api_base {
            Some(base) => format!("api_base = \"{}\"\n", base),
            None => "# api_base = \"http://localhost:5000/api/v1\"  # defaults to {url}/api/v1\n"
                .to_string(),
        };

        format!(
            r#"# criticality-web configuration

# HTTP bind address (CRITICALITY_WEB_BIND env var overrides)
bind_addr = "{bind}"

# Scoring backend (BACKEND and PUBLIC_BACKEND_URL env vars override)
[backend]
url = "{backend_url}"
{api_base}timeout_secs = {timeout}

# List views: search results, histories, rankings, package tables
[listing]
default_page_size = {page_size}
page_size_options = {page_options:?}

# Git-link editor
[gitlink]
default_table = "{default_table}"
{tables}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            bind = self.bind_addr,
            backend_url = self.backend.url,
            api_base = api_base,
            timeout = self.backend.timeout_secs,
            page_size = self.listing.default_page_size,
            page_options = self.listing.page_size_options,
            default_table = self.gitlink.default_table,
            tables = self.tables_to_toml(),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
