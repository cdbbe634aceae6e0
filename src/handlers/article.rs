//! `GET /get_article`
//!
//! The article URL is taken raw from everything after the first `url=` in
//! the request target, so callers may pass URLs with their own `?` and `&`
//! unescaped. The remainder is then percent-decoded once.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::AppState;
use crate::model::ErrorBody;

const URL_MARKER: &str = "url=";

/// Message for a request without an article URL
pub const URL_REQUIRED: &str = "URL is required";

/// Message for any failure after the URL was accepted
pub const FETCH_FAILED: &str = "Failed to get article content";

/// Article URL carried by a request target such as `/get_article?url=...`
///
/// Returns `None` when there is no `url=` or nothing follows it.
pub fn article_url_from_path(path_and_query: &str) -> Option<String> {
    let (_, raw) = path_and_query.split_once(URL_MARKER)?;
    let decoded = urlencoding::decode_binary(raw.as_bytes());
    let url = String::from_utf8_lossy(&decoded).into_owned();
    (!url.is_empty()).then_some(url)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

/// Fetch and extract the article named in the query
#[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn article_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    let Some(url) = article_url_from_path(target) else {
        warn!("{}", URL_REQUIRED);
        state.metrics.record_failure();
        return error_response(StatusCode::BAD_REQUEST, URL_REQUIRED);
    };
    info!("Processing URL: {}", url);

    let _active = state.metrics.begin_fetch();
    let start = Instant::now();
    let result = state.fetcher.fetch(&url).await;
    let elapsed = start.elapsed();
    state.metrics.record_latency(elapsed);
    info!("Processing completed in {:.2} seconds", elapsed.as_secs_f64());

    match result {
        Ok(article) => {
            info!("Article content retrieved successfully");
            state.metrics.record_success();
            (StatusCode::OK, Json(article)).into_response()
        }
        Err(e) => {
            state.metrics.record_failure();
            match e.client_message() {
                Some(message) => {
                    warn!("Rejected URL: {}", message);
                    error_response(StatusCode::BAD_REQUEST, message)
                }
                None => {
                    error!("Failed to get article content: {}", e);
                    error_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
                }
            }
        }
    }
}
