//! CORS policy for the HTTP server
//!
//! The service is read-only (GET), so the only question is which origins may
//! read responses from a browser: local pages only (default), or anyone.

use std::time::Duration;

use clap::ValueEnum;
use http::{header::HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use url::Url;

/// Methods a browser may use cross-origin
pub const ALLOWED_METHODS: [Method; 2] = [Method::GET, Method::OPTIONS];

/// Preflight cache lifetime (1 hour)
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

/// Which origins may read responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CorsPolicy {
    /// `localhost`, `127.0.0.1` and `[::1]` on any port
    #[default]
    Localhost,
    /// Every origin
    Any,
}

/// CORS layer for the given policy
pub fn cors_layer_for(policy: CorsPolicy) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .max_age(Duration::from_secs(DEFAULT_MAX_AGE_SECS));

    match policy {
        CorsPolicy::Localhost => {
            layer.allow_origin(AllowOrigin::predicate(|origin, _| is_localhost_origin(origin)))
        }
        CorsPolicy::Any => layer.allow_origin(Any),
    }
}

/// Whether an `Origin` header names a loopback host over http(s)
pub fn is_localhost_origin(origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    let Ok(url) = Url::parse(origin) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") || url.port() == Some(0) {
        return false;
    }
    matches!(
        url.host_str(),
        Some("localhost") | Some("127.0.0.1") | Some("[::1]")
    )
}
