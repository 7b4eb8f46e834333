//! Router and HTTP server lifecycle

use anyhow::{Context, Result};
use axum::{
    routing::{any, get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::handlers::{self, detail, gitlink, histories, home, rankings, results};
use super::proxy;
use super::state::AppState;
use crate::config::Config;

/// All page routes, the `/api` forwarder and the 404 fallback
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/results", get(results::results))
        .route("/results/detail/:id", get(results::detail_overlay))
        .route("/results/histories", get(results::histories_overlay))
        .route("/detail/:id", get(detail::detail))
        .route("/histories", get(histories::histories))
        .route("/rankings", get(rankings::rankings))
        .route("/gitlink", get(gitlink::gitlink))
        .route("/gitlink/update", post(gitlink::update))
        .route("/api/*path", any(proxy::forward))
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until `shutdown_rx` fires
pub async fn start_server(config: Config, shutdown_rx: tokio::sync::oneshot::Receiver<()>) -> Result<()> {
    let bind_addr = config.bind_addr;
    let state = AppState::new(config)?;
    let app = router(state);

    tracing::info!("Starting web server on {}", bind_addr);

    let listener = TcpListener::bind(bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("Web server shut down gracefully");
    Ok(())
}
