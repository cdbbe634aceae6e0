//! Access to a rendered page
//!
//! Scrapers only see [`RenderedPage`], so they can be driven by a live
//! browser tab or by canned HTML in tests.

use async_trait::async_trait;
use chromiumoxide::Page;
use tracing::instrument;

use crate::error::{BrowserError, ExtractionError, Result};

/// A page after the browser has rendered it
#[async_trait]
pub trait RenderedPage: Send + Sync {
    /// The serialized DOM of the page
    async fn html(&self) -> Result<String>;

    /// Rendered `innerText` of the first `tag` element in the live DOM whose
    /// `class` attribute contains `fragment`
    async fn inner_text_where_class_contains(
        &self,
        tag: &str,
        fragment: &str,
    ) -> Result<Option<String>>;
}

/// Handle to an open browser tab
#[derive(Clone)]
pub struct PageHandle {
    page: Page,
    url: String,
}

impl PageHandle {
    pub(crate) fn new(page: Page, url: String) -> Self {
        Self { page, url }
    }

    /// URL the tab ended up on
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Script body for the live class lookup; arguments are JSON string literals
fn class_contains_script(tag: &str, fragment: &str) -> String {
    let tag = serde_json::Value::from(tag).to_string();
    let fragment = serde_json::Value::from(fragment).to_string();
    format!(
        r#"
        (() => {{
            for (const el of document.getElementsByTagName({tag})) {{
                const cls = el.getAttribute('class');
                if (cls && cls.includes({fragment})) {{
                    return el.innerText;
                }}
            }}
            return null;
        }})()
        "#
    )
}

/// A script result of JS `null` or `undefined` carries no value at all
fn evaluated_text(value: Option<&serde_json::Value>) -> Result<Option<String>> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| ExtractionError::JsExecutionFailed(e.to_string()).into()),
    }
}

#[async_trait]
impl RenderedPage for PageHandle {
    #[instrument(skip(self))]
    async fn html(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::PageSourceFailed(e.to_string()).into())
    }

    #[instrument(skip(self))]
    async fn inner_text_where_class_contains(
        &self,
        tag: &str,
        fragment: &str,
    ) -> Result<Option<String>> {
        let script = class_contains_script(tag, fragment);
        let result = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| ExtractionError::JsExecutionFailed(e.to_string()))?;
        evaluated_text(result.value())
    }
}
