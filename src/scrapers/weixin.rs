//! Messaging-platform public article (mp.weixin.qq.com) scraper

use async_trait::async_trait;

use super::ArticleScraper;
use crate::error::{ExtractionError, Result};
use crate::extraction::{element_text, first_match, normalize_whitespace, parse_document};
use crate::model::Article;
use crate::routing::ScraperKind;

const TITLE_SELECTOR: &str = "h1.rich_media_title";
const BODY_SELECTOR: &str = "div.rich_media_area_primary";

/// Placeholder when the article headline cannot be found
pub const TITLE_NOT_FOUND: &str = "未找到标题";

/// Scraper for public account articles
#[derive(Debug, Default, Clone, Copy)]
pub struct WeixinScraper;

#[async_trait]
impl ArticleScraper for WeixinScraper {
    fn kind(&self) -> ScraperKind {
        ScraperKind::Weixin
    }

    fn parse(&self, html: &str) -> Result<Article> {
        let doc = parse_document(html);

        let title = first_match(&doc, TITLE_SELECTOR)?
            .map(|el| element_text(&el))
            .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());

        let body = first_match(&doc, BODY_SELECTOR)?
            .ok_or_else(|| ExtractionError::ElementNotFound(BODY_SELECTOR.to_string()))?;

        Ok(Article::new(title, normalize_whitespace(&element_text(&body))))
    }
}
