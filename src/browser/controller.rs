//! Browser lifecycle management
//!
//! Every article fetch gets its own browser process. A session is launched,
//! used for exactly one page and then closed.

use crate::error::{BrowserError, Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

use super::navigation::{NavigationOptions, PageNavigator};
use super::page::PageHandle;

/// Configuration for browser launch
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode (default: true)
    pub headless: bool,
    /// Browser window width (default: 1920)
    pub width: u32,
    /// Browser window height (default: 1080)
    pub height: u32,
    /// Enable sandbox (default: false, container hosts rarely support it)
    pub sandbox: bool,
    /// User agent string (None = use default)
    pub user_agent: Option<String>,
    /// Navigation timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// How long to wait for a `body` element after navigation (default: 10000)
    pub body_timeout_ms: u64,
    /// Path to Chrome/Chromium/Edge executable (None = auto-detect)
    pub chrome_path: Option<String>,
    /// Additional Chrome arguments
    pub extra_args: Vec<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            width: 1920,
            height: 1080,
            sandbox: false,
            user_agent: None,
            timeout_ms: 30000,
            body_timeout_ms: 10000,
            chrome_path: None,
            extra_args: Vec::new(),
        }
    }
}

impl BrowserConfig {
    /// Create a new config builder
    pub fn builder() -> BrowserConfigBuilder {
        BrowserConfigBuilder::default()
    }

    /// Navigation options derived from this config
    pub fn navigation_options(&self) -> NavigationOptions {
        NavigationOptions {
            timeout_ms: self.timeout_ms,
            body_timeout_ms: self.body_timeout_ms,
        }
    }

    /// Chrome flags passed on launch, besides the ones chromiumoxide adds itself
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = vec![
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
        ];
        if let Some(ref ua) = self.user_agent {
            args.push(format!("--user-agent={ua}"));
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

/// Builder for BrowserConfig
#[derive(Default)]
pub struct BrowserConfigBuilder {
    config: BrowserConfig,
}

impl BrowserConfigBuilder {
    /// Set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// Set viewport dimensions
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Enable/disable sandbox
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.config.sandbox = sandbox;
        self
    }

    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = Some(ua.into());
        self
    }

    /// Set navigation timeout
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set how long to wait for the page body
    pub fn body_timeout_ms(mut self, ms: u64) -> Self {
        self.config.body_timeout_ms = ms;
        self
    }

    /// Set Chrome path
    pub fn chrome_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Add extra Chrome argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.config.extra_args.push(arg.into());
        self
    }

    /// Build the config
    pub fn build(self) -> BrowserConfig {
        self.config
    }
}

/// One launched browser process and its CDP event loop
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    config: BrowserConfig,
}

impl BrowserSession {
    /// Launch a browser with the given config
    #[instrument(skip(config))]
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        info!("Launching browser: headless={}", config.headless);

        let mut builder = CdpBrowserConfig::builder();

        builder = builder.viewport(chromiumoxide::handler::viewport::Viewport {
            width: config.width,
            height: config.height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: true,
            has_touch: false,
        });

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        for arg in config.launch_args() {
            builder = builder.arg(arg);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| BrowserError::ConfigError(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
            debug!("Browser handler finished");
        });

        debug!("Browser launched");

        Ok(Self {
            browser,
            handler: handler_task,
            config: config.clone(),
        })
    }

    /// Open a new tab and navigate it to `url`
    #[instrument(skip(self))]
    pub async fn open(&self, url: &str) -> Result<PageHandle> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?;

        let result =
            PageNavigator::goto(&page, url, &self.config.navigation_options()).await?;
        debug!(
            "Opened {} in {}ms (body ready: {})",
            result.final_url, result.duration_ms, result.body_ready
        );

        Ok(PageHandle::new(page, result.final_url))
    }

    /// Close the browser and wait for its event loop to drain
    #[instrument(skip(self))]
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| Error::cdp(e.to_string()))?;

        let _ = self.browser.wait().await;
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handler).await;

        debug!("Browser closed");
        Ok(())
    }
}
