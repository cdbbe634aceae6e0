//! Domain to scraper routing
//!
//! A URL's host is matched against an ordered table of domains. An entry
//! matches when the host equals the domain or is one of its subdomains; the
//! first match wins, and hosts nothing matches go to the default scraper.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// The site-specific extraction routines available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScraperKind {
    /// Desktop microblog post page
    Weibo,
    /// Mobile microblog post page
    #[serde(alias = "weibocn")]
    WeiboMobile,
    /// Messaging-platform public article page
    #[serde(alias = "wx")]
    Weixin,
}

impl ScraperKind {
    /// Stable name used in config files and logs
    pub fn name(self) -> &'static str {
        match self {
            ScraperKind::Weibo => "weibo",
            ScraperKind::WeiboMobile => "weibo_mobile",
            ScraperKind::Weixin => "weixin",
        }
    }
}

impl fmt::Display for ScraperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the routing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRoute {
    /// Registrable domain, e.g. `weibo.com`
    pub domain: String,
    /// Scraper handling that domain and its subdomains
    pub scraper: ScraperKind,
}

impl DomainRoute {
    /// Create a route, normalizing the domain to lowercase
    pub fn new(domain: impl Into<String>, scraper: ScraperKind) -> Self {
        Self {
            domain: domain.into().to_ascii_lowercase(),
            scraper,
        }
    }

    /// Whether `host` is this domain or a subdomain of it
    pub fn matches(&self, host: &str) -> bool {
        host == self.domain
            || host
                .strip_suffix(self.domain.as_str())
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

/// Ordered domain table with a fallback scraper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRouter {
    routes: Vec<DomainRoute>,
    default: ScraperKind,
}

impl Default for DomainRouter {
    fn default() -> Self {
        Self::new(
            vec![
                DomainRoute::new("weibo.com", ScraperKind::Weibo),
                DomainRoute::new("weixin.qq.com", ScraperKind::Weixin),
                DomainRoute::new("m.weibo.cn", ScraperKind::WeiboMobile),
            ],
            ScraperKind::Weixin,
        )
    }
}

impl DomainRouter {
    /// Create a router from routes in priority order
    pub fn new(routes: Vec<DomainRoute>, default: ScraperKind) -> Self {
        Self { routes, default }
    }

    /// The routes in priority order
    pub fn routes(&self) -> &[DomainRoute] {
        &self.routes
    }

    /// Scraper used when no route matches
    pub fn default_scraper(&self) -> ScraperKind {
        self.default
    }

    /// Pick the scraper for a bare host name
    pub fn resolve(&self, host: &str) -> ScraperKind {
        let host = host.to_ascii_lowercase();
        self.routes
            .iter()
            .find(|route| route.matches(&host))
            .map(|route| route.scraper)
            .unwrap_or(self.default)
    }

    /// Pick the scraper for a full URL; URLs without a host get the default
    pub fn resolve_url(&self, url: &str) -> ScraperKind {
        match Url::parse(url).ok().as_ref().and_then(Url::host_str) {
            Some(host) => self.resolve(host),
            None => self.default,
        }
    }
}
