use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use deck_proxy::{AppState, Args, Config, DeckService, ReqwestTransport};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args(Args::parse()).context("invalid configuration")?;
    let log_file = deck_proxy::logging::init(config.log_dir.as_deref())
        .context("failed to open log file")?;

    let transport = ReqwestTransport::new(config.upstream_timeout)
        .context("failed to build upstream HTTP client")?;
    let service = DeckService::new(
        config.upstream.clone(),
        Arc::new(transport),
        config.upstream_timeout,
    );
    let state = AppState::new(service)
        .with_log_dir(config.log_dir.clone())
        .with_observability(config.observability);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        addr = %config.bind,
        upstream = %config.upstream.base_url(),
        timeout_secs = config.upstream_timeout.as_secs(),
        observability = config.observability,
        log_file = ?log_file,
        "deck proxy listening"
    );

    deck_proxy::run(listener, state).await.context("server error")
}
