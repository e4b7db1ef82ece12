use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

mod client;
mod config;
mod mcp;
mod server;
mod tools;

#[cfg(test)]
mod testing;

use client::ChatPptClient;
use config::Config;

#[derive(Parser)]
#[command(name = "chatppt-mcp")]
#[command(
    version,
    about = "MCP server exposing the ChatPPT generation API as tools"
)]
struct Cli {
    /// Transport used to talk to the MCP host
    #[arg(short, long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Stdio,
    Sse,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.transport)?;

    let config = Arc::new(Config::from_env()?);
    if config.api_key.as_deref().is_none_or(str::is_empty) {
        warn!("API_KEY is not set; build_ppt will fail until it is configured");
    }
    info!(api_base = %config.api_base, "starting {}", env!("CARGO_PKG_NAME"));

    let client = Arc::new(
        ChatPptClient::new(config.clone()).context("failed to build HTTP client")?,
    );
    match cli.transport {
        Transport::Stdio => server::stdio::run(client).await,
        Transport::Sse => server::sse::run(client, config.sse_addr).await,
    }
}

/// Logs go to stderr; stdout is reserved for protocol frames in stdio mode.
fn init_tracing(transport: Transport) -> Result<()> {
    let level = match transport {
        Transport::Stdio => Level::WARN,
        Transport::Sse => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
