//! Site-specific article scrapers
//!
//! Each scraper knows where one site keeps its title and body in the rendered
//! page. [`scraper_for`] maps a routed [`ScraperKind`] to its implementation.

pub mod weibo;
pub mod weibo_mobile;
pub mod weixin;

use std::time::Duration;

use async_trait::async_trait;

use crate::browser::RenderedPage;
use crate::error::Result;
use crate::model::Article;
use crate::routing::ScraperKind;

pub use weibo::WeiboScraper;
pub use weibo_mobile::WeiboMobileScraper;
pub use weixin::WeixinScraper;

/// Placeholder when a microblog post's author cannot be found
pub const UNKNOWN_PUBLISHER: &str = "未知用户";

/// Placeholder when a microblog post's timestamp cannot be found
pub const UNKNOWN_TIME: &str = "未知时间";

/// Title synthesized for microblog posts, which have no headline of their own
pub fn microblog_title(publisher: &str, published_at: &str) -> String {
    format!("{publisher}在{published_at}发布了一条微博")
}

/// Extraction routine for one site
#[async_trait]
pub trait ArticleScraper: Send + Sync {
    /// Which routing key this scraper serves
    fn kind(&self) -> ScraperKind;

    /// Extra wait after the page loads so client-side rendering can finish
    fn settle_delay(&self) -> Duration {
        Duration::ZERO
    }

    /// Extract the article from a page source snapshot
    fn parse(&self, html: &str) -> Result<Article>;

    /// Extract the article from a rendered page
    async fn extract(&self, page: &dyn RenderedPage) -> Result<Article> {
        let html = page.html().await?;
        self.parse(&html)
    }
}

static WEIBO: WeiboScraper = WeiboScraper;
static WEIBO_MOBILE: WeiboMobileScraper = WeiboMobileScraper;
static WEIXIN: WeixinScraper = WeixinScraper;

/// The scraper registered for `kind`
pub fn scraper_for(kind: ScraperKind) -> &'static dyn ArticleScraper {
    match kind {
        ScraperKind::Weibo => &WEIBO,
        ScraperKind::WeiboMobile => &WEIBO_MOBILE,
        ScraperKind::Weixin => &WEIXIN,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::ExtractionError;

    /// Canned page for driving scrapers without a browser
    pub struct StaticPage {
        pub html: String,
        pub live_text: Option<String>,
        pub live_fails: bool,
    }

    impl StaticPage {
        pub fn new(html: &str) -> Self {
            Self {
                html: html.to_string(),
                live_text: None,
                live_fails: false,
            }
        }
    }

    #[async_trait]
    impl RenderedPage for StaticPage {
        async fn html(&self) -> Result<String> {
            Ok(self.html.clone())
        }

        async fn inner_text_where_class_contains(
            &self,
            _tag: &str,
            _fragment: &str,
        ) -> Result<Option<String>> {
            if self.live_fails {
                return Err(ExtractionError::JsExecutionFailed("target closed".to_string()).into());
            }
            Ok(self.live_text.clone())
        }
    }
}
