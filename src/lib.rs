//! article-fetch - article title and text extraction behind a browser
//!
//! Given an article URL, the service picks a site-specific scraper from the
//! URL's domain, renders the page in a headless browser over CDP, and returns
//! the extracted title and body text as JSON.
//!
//! # Architecture
//!
//! ```text
//! GET /get_article?url=... ──▶ DomainRouter ──▶ ArticleScraper
//!                                                   │
//!                              BrowserSession ◀─────┘
//!                              (launch, open, close)
//!                                   │
//!                                   ▼
//!                           rendered page source ──▶ {"title", "content"}
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use article_fetch::browser::BrowserConfig;
//! use article_fetch::fetcher::ArticleFetcher;
//! use article_fetch::routing::DomainRouter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = ArticleFetcher::new(DomainRouter::default(), BrowserConfig::default(), 1);
//!     let article = fetcher.fetch("https://mp.weixin.qq.com/s/abc").await?;
//!     println!("{}: {}", article.title, article.content);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod config;
pub mod cors;
pub mod error;
pub mod extraction;
pub mod fetcher;
pub mod handlers;
pub mod model;
pub mod routing;
pub mod scrapers;
pub mod server;

// Re-exports for convenience
pub use error::{Error, Result};
pub use fetcher::ArticleFetcher;
pub use model::{Article, ErrorBody};
pub use routing::{DomainRouter, ScraperKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
