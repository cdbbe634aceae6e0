//! Article fetch pipeline
//!
//! `url -> route -> launch browser -> open page -> settle -> extract -> close`.
//! The browser is closed on every path once it has launched.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, error, info, instrument};

use crate::browser::{BrowserConfig, BrowserSession, UrlValidator};
use crate::error::{BrowserError, Result};
use crate::model::Article;
use crate::routing::DomainRouter;
use crate::scrapers::{scraper_for, ArticleScraper};

/// Fetches articles, one browser session per call
pub struct ArticleFetcher {
    router: DomainRouter,
    browser: BrowserConfig,
    sessions: Arc<Semaphore>,
}

impl ArticleFetcher {
    /// Create a fetcher allowing at most `max_sessions` concurrent browsers
    pub fn new(router: DomainRouter, browser: BrowserConfig, max_sessions: usize) -> Self {
        Self {
            router,
            browser,
            sessions: Arc::new(Semaphore::new(max_sessions.max(1))),
        }
    }

    /// The routing table in use
    pub fn router(&self) -> &DomainRouter {
        &self.router
    }

    /// Pick the scraper for a URL
    pub fn scraper_for_url(&self, url: &str) -> &'static dyn ArticleScraper {
        scraper_for(self.router.resolve_url(url))
    }

    /// Render `url` in a fresh browser and extract its article
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Article> {
        UrlValidator::validate(url)?;
        let scraper = self.scraper_for_url(url);
        info!("Processing {} with {} scraper", url, scraper.kind());

        let _permit = self.acquire_session().await?;

        let start = Instant::now();
        let session = BrowserSession::launch(&self.browser).await?;

        let outcome = Self::scrape(&session, url, scraper).await;

        if let Err(e) = session.close().await {
            error!("Error while closing browser: {}", e);
        }
        info!(
            "Finished {} in {:.2}s",
            url,
            start.elapsed().as_secs_f64()
        );

        outcome
    }

    /// Wait for a free browser slot; the slot is held until the permit drops
    async fn acquire_session(&self) -> Result<SemaphorePermit<'_>> {
        self.sessions
            .acquire()
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()).into())
    }

    async fn scrape(
        session: &BrowserSession,
        url: &str,
        scraper: &dyn ArticleScraper,
    ) -> Result<Article> {
        let page = session.open(url).await?;
        debug!("Page ready at {}", page.url());

        let delay = scraper.settle_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        scraper.extract(&page).await
    }
}
