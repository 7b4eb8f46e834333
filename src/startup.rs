// Startup module - banner and view summary
//
// Printed to stdout before the server starts, and mirrored into the log so a
// file-only deployment still records what was configured.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// One page group and whether it is served
pub struct ViewStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: String,
}

pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}Criticality Web{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Repository trust scores in the browser{RESET}");
    println!();

    println!("  {DIM}Config:{RESET} {}", config_source());
    println!("  {DIM}Backend:{RESET} {}", config.backend.url);
    println!("  {DIM}API base:{RESET} {}", config.backend.api_base());
    println!();

    println!("  {DIM}Views{RESET}");
    for view in view_status(config) {
        let (icon, style) = if view.enabled {
            (format!("{GREEN}✓{RESET}"), "")
        } else {
            (format!("{DIM}○{RESET}"), DIM)
        };
        println!(
            "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
            view.name, view.description
        );
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} Serving on {BOLD}http://{}{RESET}",
        config.bind_addr
    );
    println!();
}

pub fn log_startup(config: &Config) {
    tracing::info!("criticality-web v{}", VERSION);
    tracing::info!("Config: {}", config_source());
    tracing::info!(
        "Backend: {} (api {}, timeout {}s)",
        config.backend.url,
        config.backend.api_base(),
        config.backend.timeout_secs
    );
    for view in view_status(config) {
        let icon = if view.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, view.name, view.description);
    }
    tracing::info!("▸ Listening on {}", config.bind_addr);
}

fn config_source() -> String {
    match Config::config_path() {
        Some(path) if path.exists() => format!("✓ {}", path.display()),
        _ => "(using defaults)".to_string(),
    }
}

fn view_status(config: &Config) -> Vec<ViewStatus> {
    let tables: Vec<&str> = config
        .gitlink
        .tables
        .iter()
        .map(|t| t.name.as_str())
        .collect();

    vec![
        ViewStatus {
            name: "results",
            enabled: true,
            description: "Search, detail modal, histories drawer".to_string(),
        },
        ViewStatus {
            name: "detail",
            enabled: true,
            description: "Full score breakdown".to_string(),
        },
        ViewStatus {
            name: "rankings",
            enabled: true,
            description: "Global ranking".to_string(),
        },
        ViewStatus {
            name: "gitlink",
            enabled: !tables.is_empty(),
            description: if tables.is_empty() {
                "No package tables configured".to_string()
            } else {
                format!("Package tables: {}", tables.join(", "))
            },
        },
        ViewStatus {
            name: "api",
            enabled: true,
            description: format!("/api/* forwarded to {}", config.backend.url),
        },
    ]
}
