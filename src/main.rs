// Criticality Web - browser front end for repository trust scores
//
// Renders search results, score details, histories, rankings and the
// package/git-link editor over the scoring backend's HTTP API.
//
// Architecture:
// - Client (reqwest): typed calls to the backend's /api/v1 surface
// - Listing: one paginated list controller shared by every list view
// - Web (axum): page handlers, HTML rendering, /api forwarder
// - Config: env > ~/.config/criticality-web/config.toml > defaults

mod cli;
mod client;
mod config;
mod gitlink;
mod labels;
mod listing;
mod logging;
mod startup;
mod web;

use anyhow::Result;
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Config subcommands exit here
    let Some(overrides) = cli::handle_cli() else {
        return Ok(());
    };

    Config::ensure_config_exists();

    let mut config = Config::from_env()?;
    overrides.apply(&mut config)?;

    // Must stay alive so buffered file logs are flushed on exit
    let _file_guard = logging::init(&config.logging);

    startup::print_startup(&config);
    startup::log_startup(&config);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let mut server = tokio::spawn(web::start_server(config, shutdown_rx));

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("Shutting down...");
            let _ = shutdown_tx.send(());
            server.await??;
        }
        // Server stopped on its own (bind failure, fatal error)
        result = &mut server => {
            result??;
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}
