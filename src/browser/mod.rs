//! Browser automation module
//!
//! This module provides browser control through ChromiumOxide: per-request
//! session lifecycle, navigation, and read access to the rendered page.

pub mod controller;
pub mod navigation;
pub mod page;

pub use controller::{BrowserConfig, BrowserConfigBuilder, BrowserSession};
pub use navigation::{NavigationOptions, NavigationResult, PageNavigator, UrlValidator};
pub use page::{PageHandle, RenderedPage};
