use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(about = "In-memory deck-of-cards API for local runs and tests")]
struct Args {
    #[arg(long, env = "MOCK_UPSTREAM_HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(short, long, env = "MOCK_UPSTREAM_PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let args = Args::parse();
    let addr = SocketAddr::new(args.host, args.port);
    let listener = TcpListener::bind(addr).await?;
    eprintln!("mock deck API on http://{addr}/api/ (point DECK_API_BASE_URL here)");
    mock_upstream::run(listener).await
}
