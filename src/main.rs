//! article-fetch server
//!
//! Renders article pages in a headless browser and serves their title and
//! body text as JSON.

use anyhow::Context;
use clap::Parser;

use article_fetch::config::{Args, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServiceConfig::from_args(&args).context("invalid configuration")?;

    tracing::info!(
        "{} {} starting on {}",
        article_fetch::NAME,
        article_fetch::VERSION,
        config.addr
    );

    article_fetch::server::serve(config)
        .await
        .context("server failed")?;

    Ok(())
}
