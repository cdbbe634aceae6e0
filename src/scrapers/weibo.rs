//! Desktop microblog (weibo.com) post scraper
//!
//! The desktop site is built with CSS modules, so the author block, the
//! timestamp link and the post body are found by class-name prefix. When the
//! body is not in the page source snapshot we ask the live DOM instead.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use tracing::{debug, warn};

use super::{microblog_title, ArticleScraper, UNKNOWN_PUBLISHER, UNKNOWN_TIME};
use crate::browser::RenderedPage;
use crate::error::{ExtractionError, Result};
use crate::extraction::dom::first_descendant;
use crate::extraction::{
    all_with_class_prefix, element_text, first_with_class_prefix, normalize_whitespace,
    parse_document, strip_patterns,
};
use crate::model::Article;
use crate::routing::ScraperKind;

const PUBLISHER_CLASS_PREFIX: &str = "head_main_";
const TIME_CLASS_PREFIX: &str = "head-info_time_";
const BODY_CLASS_PREFIX: &str = "Feed_body_";
const LIVE_BODY_CLASS_FRAGMENT: &str = "Main_full_";

/// Video player chrome that leaks into the text of posts with embedded video
fn video_noise_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?s)播放视频播放.*?分享这条博文",
            r"(?s)视频地址.*?正在小窗播放中",
            r"(?s)点击展开.*?分享这条博文",
            r"\d{2}:\d{2}\s*/\s*时长\s*\d{2}:\d{2}",
            r"(?s)\d+\.\d+万次观看.*?分享这条博文",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("video noise pattern is valid"))
        .collect()
    })
}

/// Remove video player text, then normalize whitespace
pub fn clean_post_text(raw: &str) -> String {
    normalize_whitespace(&strip_patterns(raw, video_noise_patterns()))
}

/// Scraper for weibo.com posts
#[derive(Debug, Default, Clone, Copy)]
pub struct WeiboScraper;

impl WeiboScraper {
    fn publisher(doc: &Html) -> Result<String> {
        for head in all_with_class_prefix(doc, "div", PUBLISHER_CLASS_PREFIX)? {
            let name = first_descendant(&head, "span")?
                .and_then(|span| span.value().attr("title"))
                .filter(|title| !title.is_empty());
            if let Some(name) = name {
                return Ok(name.to_string());
            }
        }
        Ok(UNKNOWN_PUBLISHER.to_string())
    }

    fn published_at(doc: &Html) -> Result<String> {
        let found = all_with_class_prefix(doc, "a", TIME_CLASS_PREFIX)?
            .iter()
            .map(element_text)
            .find(|text| !text.is_empty());
        Ok(found.unwrap_or_else(|| UNKNOWN_TIME.to_string()))
    }

    /// Title and, if present in the snapshot, the raw body text
    fn parse_snapshot(html: &str) -> Result<(String, Option<String>)> {
        let doc = parse_document(html);
        let title = microblog_title(&Self::publisher(&doc)?, &Self::published_at(&doc)?);
        let body = first_with_class_prefix(&doc, "div", BODY_CLASS_PREFIX)?
            .map(|el| element_text(&el));
        Ok((title, body))
    }

    fn body_not_found() -> crate::error::Error {
        ExtractionError::ElementNotFound(format!("div.{BODY_CLASS_PREFIX}*")).into()
    }
}

#[async_trait]
impl ArticleScraper for WeiboScraper {
    fn kind(&self) -> ScraperKind {
        ScraperKind::Weibo
    }

    fn settle_delay(&self) -> Duration {
        Duration::from_secs(2)
    }

    fn parse(&self, html: &str) -> Result<Article> {
        let (title, body) = Self::parse_snapshot(html)?;
        let body = body.ok_or_else(Self::body_not_found)?;
        Ok(Article::new(title, clean_post_text(&body)))
    }

    async fn extract(&self, page: &dyn RenderedPage) -> Result<Article> {
        let html = page.html().await?;
        let (title, body) = Self::parse_snapshot(&html)?;

        let body = match body {
            Some(body) => body,
            None => {
                debug!("Post body not in page source, querying live DOM");
                match page
                    .inner_text_where_class_contains("div", LIVE_BODY_CLASS_FRAGMENT)
                    .await
                {
                    Ok(Some(text)) => text,
                    Ok(None) => {
                        warn!("Post body not found");
                        return Err(Self::body_not_found());
                    }
                    Err(e) => {
                        warn!("Live DOM lookup for post body failed: {}", e);
                        return Err(Self::body_not_found());
                    }
                }
            }
        };

        Ok(Article::new(title, clean_post_text(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::StaticPage;
    use pretty_assertions::assert_eq;

    const POST: &str = r#"
        <html><body>
          <div class="woo-box-flex head_main_1a2B">
            <span>no title attr</span>
          </div>
          <div class="head_main_3c4D">
            <a href="/u/1"><span title="人民日报">人民日报</span></a>
          </div>
          <div class="head-info_info_x">
            <a class="head-info_time_9z8Y" href="/1/2">  </a>
            <a class="head-info_time_9z8Y" href="/1/2"> 10-16 08:00 </a>
          </div>
          <div class="wbpro-feed Feed_body_3R0rO">
            <div class="detail_text">今天
              天气很好。</div>
            <div>播放视频播放
            视频加载中 分享这条博文</div>
            <div>00:15 / 时长 01:30</div>
            <div>1.2万次观看 转发 分享这条博文</div>
            <div>结束</div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_full_post() {
        let article = WeiboScraper.parse(POST).unwrap();
        assert_eq!(article.title, "人民日报在10-16 08:00发布了一条微博");
        assert_eq!(article.content, "今天 天气很好。 结束");
    }

    #[test]
    fn test_parse_defaults_when_header_missing() {
        let html = r#"<div class="Feed_body_x">正文</div>"#;
        let article = WeiboScraper.parse(html).unwrap();
        assert_eq!(article.title, "未知用户在未知时间发布了一条微博");
        assert_eq!(article.content, "正文");
    }

    #[test]
    fn test_parse_without_body_is_error() {
        let err = WeiboScraper.parse("<div class=\"head_main_1\"></div>").unwrap_err();
        assert!(err.to_string().contains("Feed_body_"));
    }

    #[test]
    fn test_clean_post_text_strips_video_noise() {
        assert_eq!(
            clean_post_text("开头 视频地址 https://v.example\n正在小窗播放中 结尾"),
            "开头 结尾"
        );
        assert_eq!(
            clean_post_text("A 点击展开全文\n\n分享这条博文 B"),
            "A B"
        );
    }

    #[tokio::test]
    async fn test_extract_prefers_snapshot() {
        let mut page = StaticPage::new(POST);
        page.live_text = Some("should not be used".to_string());
        let article = WeiboScraper.extract(&page).await.unwrap();
        assert_eq!(article.content, "今天 天气很好。 结束");
    }

    #[tokio::test]
    async fn test_extract_falls_back_to_live_dom() {
        let mut page = StaticPage::new(r#"<div class="head_main_a"><span title="作者"></span></div>"#);
        page.live_text = Some("实时\n渲染的 正文\n00:01 / 时长 00:30".to_string());
        let article = WeiboScraper.extract(&page).await.unwrap();
        assert_eq!(article.title, "作者在未知时间发布了一条微博");
        assert_eq!(article.content, "实时 渲染的 正文");
    }

    #[tokio::test]
    async fn test_extract_live_dom_miss_is_error() {
        let page = StaticPage::new("<body></body>");
        assert!(WeiboScraper.extract(&page).await.is_err());
    }

    #[tokio::test]
    async fn test_extract_live_dom_failure_is_not_found() {
        let mut page = StaticPage::new("<body></body>");
        page.live_fails = true;
        let err = WeiboScraper.extract(&page).await.unwrap_err();
        assert!(err.to_string().contains("Element not found"));
    }
}
