//! logsonic - self-hosted log ingestion, indexing, and search.
//!
//! Runs the full engine in one process: the HTTP ingest/search API, the
//! Grok pattern catalog, and the day-sharded storage under a local
//! directory.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use logsonic_grok::PatternCatalog;
use logsonic_ingest::{run_expiry_sweeper, SessionRegistry};
use logsonic_server::{config, create_router, AppState, ServerConfig};
use logsonic_storage::Storage;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "logsonic")]
#[command(about = "Desktop log ingestion and analysis server. Simple, minimal and fast.")]
#[command(version)]
struct Cli {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "localhost")]
    host: String,

    /// Port to listen on (accepts `8080` or `:8080`)
    #[arg(long, env = "PORT", default_value = "8080")]
    port: String,

    /// Path to the storage directory
    #[arg(long, env = "STORAGE_PATH")]
    storage: Option<PathBuf>,

    /// Per-request deadline in seconds
    #[arg(long, default_value_t = 60)]
    request_timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("logsonic=info".parse()?))
        .init();

    let cli = Cli::parse();

    let port = match config::parse_port(&cli.port) {
        Ok(port) => port,
        Err(reason) => {
            error!(port = %cli.port, "invalid port: {reason}");
            anyhow::bail!("invalid port: {reason}");
        }
    };

    let server_config = ServerConfig {
        host: cli.host,
        port,
        storage_path: cli.storage.unwrap_or_else(config::default_storage_path),
        request_timeout: Duration::from_secs(cli.request_timeout),
    };

    info!(
        addr = %server_config.bind_addr(),
        storage = %server_config.storage_path.display(),
        "starting logsonic"
    );

    let storage = Arc::new(Storage::open(&server_config.storage_path)?);

    let catalog = Arc::new(PatternCatalog::new(&server_config.storage_path));
    if let Err(e) = catalog.load() {
        // A malformed catalog file is a startup failure, not a silent
        // fallback to defaults.
        error!(error = %e, "failed to load pattern catalog");
        return Err(e.into());
    }

    let sessions = Arc::new(SessionRegistry::new());
    tokio::spawn(run_expiry_sweeper(sessions.clone()));

    let bind_addr = server_config.bind_addr();
    let state = Arc::new(AppState::new(server_config, storage, catalog, sessions));
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %bind_addr, error = %e, "failed to bind; is the port already in use?");
            std::process::exit(1);
        }
    };

    println!("Please open the following URL in your browser: http://{bind_addr}");
    info!(addr = %bind_addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
