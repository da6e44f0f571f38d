use anyhow::Result;
use clap::Parser;
use shared::Config;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use api::{router, AppState};

/// Serve the StockLens dashboard
#[derive(Parser, Debug)]
#[command(name = "api", version)]
struct Args {
    /// Host to bind (default: 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (default: 5001)
    #[arg(long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    info!(
        "Starting StockLens API server (git {} on {}, built {})...",
        env!("GIT_HASH"),
        env!("GIT_BRANCH"),
        env!("BUILD_TIME")
    );

    let config = Config::from_env()?;
    let host = args.host.unwrap_or_else(|| config.host.clone());
    let port = args.port.unwrap_or(config.port);

    let state = AppState::new(&config).await?;

    info!("Serving plots from: {:?}", config.plots_dir);
    if let Err(e) = std::fs::create_dir_all(&config.plots_dir) {
        error!("Failed to create plots directory: {}", e);
    }

    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
