//! Mobile microblog (m.weibo.cn) post scraper

use std::time::Duration;

use async_trait::async_trait;

use super::{microblog_title, ArticleScraper, UNKNOWN_PUBLISHER, UNKNOWN_TIME};
use crate::error::{ExtractionError, Result};
use crate::extraction::{element_text, first_match, normalize_whitespace, parse_document};
use crate::model::Article;
use crate::routing::ScraperKind;

const PUBLISHER_SELECTOR: &str = "h3.m-text-cut";
const TIME_SELECTOR: &str = "span.time";
const BODY_SELECTOR: &str = "div.lite-page-wrap";

/// Scraper for m.weibo.cn posts
#[derive(Debug, Default, Clone, Copy)]
pub struct WeiboMobileScraper;

#[async_trait]
impl ArticleScraper for WeiboMobileScraper {
    fn kind(&self) -> ScraperKind {
        ScraperKind::WeiboMobile
    }

    fn settle_delay(&self) -> Duration {
        Duration::from_secs(2)
    }

    fn parse(&self, html: &str) -> Result<Article> {
        let doc = parse_document(html);

        let publisher = first_match(&doc, PUBLISHER_SELECTOR)?
            .map(|el| element_text(&el))
            .unwrap_or_else(|| UNKNOWN_PUBLISHER.to_string());
        let published_at = first_match(&doc, TIME_SELECTOR)?
            .map(|el| element_text(&el))
            .unwrap_or_else(|| UNKNOWN_TIME.to_string());

        let body = first_match(&doc, BODY_SELECTOR)?
            .ok_or_else(|| ExtractionError::ElementNotFound(BODY_SELECTOR.to_string()))?;

        Ok(Article::new(
            microblog_title(&publisher, &published_at),
            normalize_whitespace(&element_text(&body)),
        ))
    }
}
