//! Command-line and environment configuration.

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use clap::Parser;
use deck_core::{BaseUrlError, UpstreamClient};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Proxy for the deck-of-cards API", long_about = None)]
pub struct Args {
    /// Host interface to bind.
    #[arg(long, env = "DECK_PROXY_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(short, long, env = "DECK_PROXY_PORT", default_value_t = 5040)]
    pub port: u16,

    /// Base URL of the upstream deck API.
    #[arg(
        long,
        env = "DECK_API_BASE_URL",
        default_value = "https://deckofcardsapi.com/api/"
    )]
    pub upstream_base_url: String,

    /// Per-request upstream timeout in seconds (0 selects the default).
    #[arg(long, env = "DECK_API_TIMEOUT_SECONDS", default_value_t = 30)]
    pub upstream_timeout_secs: u64,

    /// Directory for log files; an empty value disables file logging.
    #[arg(long, env = "DECK_PROXY_LOG_DIR", default_value = "logs")]
    pub log_dir: String,

    /// Expose the /status health report and log tail endpoints.
    #[arg(long, env = "FEATURE_OBSERVABILITY")]
    pub observability: bool,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub upstream: UpstreamClient,
    pub upstream_timeout: Duration,
    pub log_dir: Option<PathBuf>,
    pub observability: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, BaseUrlError> {
        let upstream = UpstreamClient::new(&args.upstream_base_url)?;
        let upstream_timeout = match args.upstream_timeout_secs {
            0 => DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        };
        let log_dir = (!args.log_dir.trim().is_empty()).then(|| PathBuf::from(args.log_dir));

        Ok(Self {
            bind: SocketAddr::new(args.host, args.port),
            upstream,
            upstream_timeout,
            log_dir,
            observability: args.observability,
        })
    }
}
