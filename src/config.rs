//! Service configuration
//!
//! Settings come from the command line (each flag also reads an
//! `ARTICLE_FETCH_*` environment variable). The domain routing table can be
//! replaced with a TOML file:
//!
//! ```toml
//! default = "weixin"
//!
//! [[route]]
//! domain = "weibo.com"
//! scraper = "weibo"
//!
//! [[route]]
//! domain = "m.weibo.cn"
//! scraper = "weibo_mobile"
//! ```
//!
//! Routes are tried in file order.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::browser::BrowserConfig;
use crate::cors::CorsPolicy;
use crate::error::{ConfigError, Result};
use crate::routing::{DomainRoute, DomainRouter, ScraperKind};

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "article-fetch")]
#[command(version)]
#[command(about = "Render article pages in a headless browser and serve their title and text as JSON")]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "ARTICLE_FETCH_PORT", default_value = "5000")]
    pub port: u16,

    /// IP address to bind to
    #[arg(short = 'H', long, env = "ARTICLE_FETCH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to Chrome/Chromium/Edge executable
    #[arg(long, env = "ARTICLE_FETCH_CHROME_PATH")]
    pub chrome_path: Option<String>,

    /// Run the browser in headless mode
    #[arg(long, env = "ARTICLE_FETCH_HEADLESS", default_value_t = true, action = clap::ArgAction::Set)]
    pub headless: bool,

    /// Navigation timeout in milliseconds
    #[arg(long, env = "ARTICLE_FETCH_NAV_TIMEOUT_MS", default_value = "30000")]
    pub nav_timeout_ms: u64,

    /// How long to wait for the page body after navigation, in milliseconds
    #[arg(long, env = "ARTICLE_FETCH_BODY_TIMEOUT_MS", default_value = "10000")]
    pub body_timeout_ms: u64,

    /// Maximum number of browsers running at once
    #[arg(long, env = "ARTICLE_FETCH_MAX_SESSIONS", default_value = "2")]
    pub max_sessions: usize,

    /// TOML file replacing the built-in domain routing table
    #[arg(long, env = "ARTICLE_FETCH_ROUTES")]
    pub routes: Option<PathBuf>,

    /// Which browser origins may read responses
    #[arg(long, value_enum, env = "ARTICLE_FETCH_CORS", default_value = "localhost")]
    pub cors: CorsPolicy,

    /// User agent override for the browser
    #[arg(long, env = "ARTICLE_FETCH_USER_AGENT")]
    pub user_agent: Option<String>,
}

/// Routing table as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutesFile {
    /// Scraper for hosts no route matches
    #[serde(default = "default_scraper")]
    pub default: ScraperKind,

    /// Routes in priority order
    #[serde(default, rename = "route")]
    pub routes: Vec<DomainRoute>,
}

fn default_scraper() -> ScraperKind {
    DomainRouter::default().default_scraper()
}

impl RoutesFile {
    /// Load and validate a routing file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Unreadable {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate routing TOML
    pub fn parse(content: &str) -> Result<Self> {
        let file: RoutesFile = toml::from_str(content).map_err(ConfigError::from)?;
        file.validate()?;
        Ok(file)
    }

    /// Reject domains that are really URLs or empty
    pub fn validate(&self) -> Result<()> {
        for route in &self.routes {
            let domain = route.domain.trim();
            if domain.is_empty() {
                return Err(ConfigError::Invalid("route domain cannot be empty".to_string()).into());
            }
            if domain.contains("://") || domain.contains('/') || domain.starts_with('.') {
                return Err(ConfigError::Invalid(format!(
                    "route domain must be a bare host name: {domain}"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Turn into a router
    pub fn into_router(self) -> DomainRouter {
        let routes = self
            .routes
            .into_iter()
            .map(|route| DomainRoute::new(route.domain.trim(), route.scraper))
            .collect();
        DomainRouter::new(routes, self.default)
    }
}

/// Fully resolved service settings
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to bind
    pub addr: SocketAddr,
    /// Browser launch settings
    pub browser: BrowserConfig,
    /// Domain routing table
    pub router: DomainRouter,
    /// Concurrent browser limit
    pub max_sessions: usize,
    /// CORS policy
    pub cors: CorsPolicy,
}

impl ServiceConfig {
    /// Resolve arguments into settings, loading the routing file if given
    pub fn from_args(args: &Args) -> Result<Self> {
        let ip: IpAddr = args
            .host
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("bad listen address {}: {e}", args.host)))?;
        let addr = SocketAddr::new(ip, args.port);

        if args.max_sessions == 0 {
            return Err(ConfigError::Invalid("max_sessions must be at least 1".to_string()).into());
        }
        if args.nav_timeout_ms == 0 {
            return Err(ConfigError::Invalid("nav_timeout_ms must be positive".to_string()).into());
        }

        let mut browser = BrowserConfig::builder()
            .headless(args.headless)
            .timeout_ms(args.nav_timeout_ms)
            .body_timeout_ms(args.body_timeout_ms);
        if let Some(ref path) = args.chrome_path {
            browser = browser.chrome_path(path);
        }
        if let Some(ref ua) = args.user_agent {
            browser = browser.user_agent(ua);
        }

        let router = match args.routes {
            Some(ref path) => RoutesFile::load(path)?.into_router(),
            None => DomainRouter::default(),
        };

        Ok(Self {
            addr,
            browser: browser.build(),
            router,
            max_sessions: args.max_sessions,
            cors: args.cors,
        })
    }
}
