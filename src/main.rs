//! response-signal demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ trace → request id → timeout → catch-all → dispatch → routes
//!                                                                             │
//!                                                     helper → helper → raise ┘
//!                                                                             │
//!     Client Response                                                         │
//!     ◀────────────── ResponseWriter (terminal action) ◀── DispatchInterceptor ◀┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use response_signal::config::{load_config, ServerConfig};
use response_signal::demo::demo_routes;
use response_signal::observability::{logging, metrics};
use response_signal::{DispatchInterceptor, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "response-signal")]
#[command(about = "Demo server for response signals", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_filter);
    tracing::info!("response-signal v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        expose_error_details = config.errors.expose_details,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, demo_routes(), DispatchInterceptor::new());
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
