//! HTTP server startup

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::ServiceConfig;
use crate::error::Result;
use crate::fetcher::ArticleFetcher;
use crate::handlers::{router_with_cors, AppState};

/// Bind and serve until Ctrl-C
#[instrument(skip(config), fields(addr = %config.addr))]
pub async fn serve(config: ServiceConfig) -> Result<()> {
    let fetcher = ArticleFetcher::new(config.router, config.browser, config.max_sessions);
    for route in fetcher.router().routes() {
        info!("Route {} -> {}", route.domain, route.scraper);
    }
    info!("Default scraper: {}", fetcher.router().default_scraper());

    let state = Arc::new(AppState::new(fetcher));
    let app = router_with_cors(state, config.cors);

    let listener = TcpListener::bind(config.addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
