//! Page navigation functionality
//!
//! This module handles URL validation and navigation with timeout handling.
//! A page whose `body` never shows up is not an error: client-rendered pages
//! often still carry usable markup, so we log and let the scraper decide.

use crate::error::{NavigationError, Result};
use chromiumoxide::Page;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Poll interval while waiting for the body element
const BODY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Maximum accepted URL length
const MAX_URL_LEN: usize = 2048;

/// Options for page navigation
#[derive(Debug, Clone)]
pub struct NavigationOptions {
    /// Timeout for the navigation itself in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// Timeout for the `body` element to appear in milliseconds (default: 10000)
    pub body_timeout_ms: u64,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            body_timeout_ms: 10000,
        }
    }
}

/// Result of a navigation operation
#[derive(Debug)]
pub struct NavigationResult {
    /// Final URL after any redirects
    pub final_url: String,
    /// Whether the body element appeared before the body timeout
    pub body_ready: bool,
    /// Navigation duration in milliseconds
    pub duration_ms: u64,
}

/// URL validation utilities
pub struct UrlValidator;

impl UrlValidator {
    /// Validate a URL for navigation and return it parsed
    pub fn validate(url: &str) -> std::result::Result<Url, NavigationError> {
        if url.is_empty() {
            return Err(NavigationError::InvalidUrl("URL cannot be empty".to_string()));
        }

        if url.len() > MAX_URL_LEN {
            return Err(NavigationError::InvalidUrl(format!(
                "URL exceeds maximum length of {MAX_URL_LEN} characters"
            )));
        }

        let parsed =
            Url::parse(url).map_err(|e| NavigationError::InvalidUrl(format!("{url}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NavigationError::InvalidUrl(format!(
                "URL must start with http:// or https://: {url}"
            )));
        }

        if parsed.host_str().is_none() {
            return Err(NavigationError::InvalidUrl(format!("URL has no host: {url}")));
        }

        Ok(parsed)
    }
}

/// Page navigator
pub struct PageNavigator;

impl PageNavigator {
    /// Navigate to a URL, then wait for the document body
    #[instrument(skip(page, opts))]
    pub async fn goto(page: &Page, url: &str, opts: &NavigationOptions) -> Result<NavigationResult> {
        let start = Instant::now();
        info!("Navigating to: {}", url);

        let timeout = Duration::from_millis(opts.timeout_ms);
        tokio::time::timeout(timeout, page.goto(url))
            .await
            .map_err(|_| NavigationError::Timeout(opts.timeout_ms))?
            .map_err(|e| NavigationError::LoadFailed(e.to_string()))?;

        let body_ready = Self::wait_for_body(page, opts.body_timeout_ms).await;
        if body_ready {
            info!("Page body ready");
        } else {
            warn!("Timed out after {}ms waiting for page body", opts.body_timeout_ms);
        }

        let final_url = page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());

        let duration_ms = start.elapsed().as_millis() as u64;
        debug!("Navigation complete: {} -> {}", url, final_url);

        Ok(NavigationResult {
            final_url,
            body_ready,
            duration_ms,
        })
    }

    /// Poll for a `body` element until it exists or the timeout elapses
    async fn wait_for_body(page: &Page, timeout_ms: u64) -> bool {
        let poll = async {
            loop {
                if page.find_element("body").await.is_ok() {
                    return;
                }
                tokio::time::sleep(BODY_POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(Duration::from_millis(timeout_ms), poll)
            .await
            .is_ok()
    }
}
