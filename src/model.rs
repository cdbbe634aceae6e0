//! Response payloads served by the HTTP endpoint

use serde::{Deserialize, Serialize};

/// An extracted article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article headline, or a synthesized "who posted when" line for microblog posts
    pub title: String,
    /// Whitespace-normalized body text
    pub content: String,
}

impl Article {
    /// Create an article from its two parts
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// JSON error body: `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

impl ErrorBody {
    /// Create an error body
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_json_shape() {
        let article = Article::new("标题", "正文");
        let json = serde_json::to_string(&article).unwrap();
        assert_eq!(json, r#"{"title":"标题","content":"正文"}"#);
    }

    #[test]
    fn test_error_body_json_shape() {
        let json = serde_json::to_string(&ErrorBody::new("URL is required")).unwrap();
        assert_eq!(json, r#"{"error":"URL is required"}"#);
    }
}
