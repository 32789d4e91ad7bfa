//! MyIndex RPC Server - JSON-RPC backend for the home page.
//!
//! This binary provides a JSON-RPC 2.0 server that wraps the myindex-core
//! library so the page shell can read state and trigger refreshes over HTTP.

mod handlers;
mod server;
mod wrapper;

use anyhow::{Context, Result};
use clap::Parser;
use myindex_core::config::AppConfig;
use myindex_core::MyIndexApi;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "myindex-rpc")]
#[command(about = "JSON-RPC server for MyIndex")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "0")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Data directory (defaults to the platform data dir + /myindex)
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Site profile JSON (defaults to <data-root>/site.json)
    #[arg(long)]
    site_config: Option<PathBuf>,

    /// Persist fetched content and refresh timestamps, not only preferences
    #[arg(long)]
    persist_content: bool,
}

fn default_data_root() -> Result<PathBuf> {
    match dirs::data_dir() {
        Some(dir) => Ok(dir.join("myindex")),
        None => Ok(std::env::current_dir()?.join(".myindex")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting {} RPC Server", AppConfig::APP_NAME);

    let data_root = match args.data_root {
        Some(path) => path,
        None => default_data_root()?,
    };
    info!("Data root: {}", data_root.display());

    // Create the API instance
    let mut builder = MyIndexApi::builder(&data_root)
        .auto_create_dirs(true)
        .persist_content(args.persist_content);
    if let Some(path) = args.site_config {
        builder = builder.site_config_path(path);
    }
    let api = builder
        .build()
        .await
        .with_context(|| format!("failed to initialize MyIndex at {}", data_root.display()))?;

    // Start the server
    let addr = server::start_server(api, &args.host, args.port).await?;

    // Print port for the page shell to read (intentional stdout for IPC)
    println!("RPC_PORT={}", addr.port());

    info!("RPC server running on {}", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
