//! `gif-server` entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gif_axum::{Cli, ServerConfig, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?.with_address(cli.host, cli.port);

    start_server(config).await
}
