//! HTTP handlers and router
//!
//! ```text
//! GET /get_article?url=... ──> article_handler ──> ArticleFetcher ──> JSON
//! GET /health, /status     ──> status handlers ──> ServiceMetrics
//! ```

pub mod article;
pub mod status;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::cors::{cors_layer_for, CorsPolicy};
use crate::fetcher::ArticleFetcher;

pub use article::{article_handler, article_url_from_path};
pub use status::{health_handler, status_handler, ServiceMetrics};

/// Shared state for every handler
pub struct AppState {
    /// Fetch pipeline
    pub fetcher: ArticleFetcher,
    /// Counters for `/status`
    pub metrics: ServiceMetrics,
}

impl AppState {
    /// Wrap a fetcher with fresh metrics
    pub fn new(fetcher: ArticleFetcher) -> Self {
        Self {
            fetcher,
            metrics: ServiceMetrics::new(),
        }
    }
}

/// Build the service router with the default CORS policy
pub fn router(state: Arc<AppState>) -> Router {
    router_with_cors(state, CorsPolicy::default())
}

/// Build the service router
pub fn router_with_cors(state: Arc<AppState>, cors: CorsPolicy) -> Router {
    Router::new()
        .route("/get_article", get(article_handler))
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .layer(cors_layer_for(cors))
        .with_state(state)
}
