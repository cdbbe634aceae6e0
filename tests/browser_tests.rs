//! Browser module tests
//!
//! These cover configuration and URL validation only. Launching a real
//! browser needs a Chrome/Chromium install and is left to manual runs.

use article_fetch::browser::{BrowserConfig, NavigationOptions, UrlValidator};
use article_fetch::error::NavigationError;

#[test]
fn test_browser_config_default() {
    let config = BrowserConfig::default();
    assert!(config.headless);
    assert_eq!(config.width, 1920);
    assert_eq!(config.height, 1080);
    assert!(!config.sandbox);
    assert_eq!(config.timeout_ms, 30000);
    assert_eq!(config.body_timeout_ms, 10000);
    assert!(config.user_agent.is_none());
    assert!(config.chrome_path.is_none());
    assert!(config.extra_args.is_empty());
}

#[test]
fn test_browser_config_builder() {
    let config = BrowserConfig::builder()
        .headless(false)
        .viewport(1280, 720)
        .sandbox(true)
        .user_agent("article-fetch-test")
        .timeout_ms(5000)
        .body_timeout_ms(1500)
        .chrome_path("/usr/bin/chromium")
        .arg("--lang=zh-CN")
        .build();

    assert!(!config.headless);
    assert_eq!((config.width, config.height), (1280, 720));
    assert!(config.sandbox);
    assert_eq!(config.chrome_path.as_deref(), Some("/usr/bin/chromium"));

    let opts = config.navigation_options();
    assert_eq!(opts.timeout_ms, 5000);
    assert_eq!(opts.body_timeout_ms, 1500);

    let args = config.launch_args();
    assert!(args.contains(&"--user-agent=article-fetch-test".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("--lang=zh-CN"));
}

#[test]
fn test_navigation_options_default() {
    let opts = NavigationOptions::default();
    assert_eq!(opts.timeout_ms, 30000);
    assert_eq!(opts.body_timeout_ms, 10000);
}

#[test]
fn test_url_validator_accepts_article_urls() {
    for url in [
        "https://weibo.com/2803301701/O9xyz",
        "https://m.weibo.cn/detail/5000000000000000",
        "http://mp.weixin.qq.com/s?__biz=MzA&mid=1",
    ] {
        let parsed = UrlValidator::validate(url).unwrap();
        assert!(parsed.host_str().is_some(), "{url}");
    }
}

#[test]
fn test_url_validator_rejects() {
    let long = format!("https://weibo.com/{}", "a".repeat(3000));
    for url in ["", "weibo.com/1", "ftp://weibo.com/1", "file:///etc/passwd", &long] {
        assert!(
            matches!(UrlValidator::validate(url), Err(NavigationError::InvalidUrl(_))),
            "{url:?} should be rejected"
        );
    }
}
