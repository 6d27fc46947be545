//! Server entry point for the disk-scan service.
//!
//! # Usage
//!
//! ```bash
//! ds-server [OPTIONS]
//!
//! # Serve two disks on the default port
//! DISKS_JSON='{"media": {"path": "/mnt/media"}, "backup": {"path": "/mnt/backup"}}' ds-server
//!
//! # Explicit flags
//! ds-server --host nas-01 --listen 0.0.0.0:5000 --disks-json '{"media": {"path": "/mnt/media"}}'
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::sync::Arc;

use axum::Router;
use clap::Parser;
use ds_core::{DEFAULT_HOST, DEFAULT_LISTEN_ADDR, ServerConfig};
use ds_scanner::DiskWalker;
use ds_server::{AppContext, router};
use tokio::net::TcpListener;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// HTTP service reporting and triggering directory-tree scans across
/// configured disks.
///
/// Disk listings are cached in memory; at most one scan runs at a time.
#[derive(Parser)]
#[command(name = "ds-server", version, about, long_about = None)]
struct Cli {
    /// Host name reported in every response.
    #[arg(long, env = "HOST_NAME", default_value = DEFAULT_HOST)]
    host: String,

    /// JSON object mapping disk names to their root paths.
    ///
    /// Example: `{"media": {"path": "/mnt/media"}}`. Malformed input is
    /// logged and the server starts with no disks.
    #[arg(long, env = "DISKS_JSON", default_value = "{}")]
    disks_json: String,

    /// Address the HTTP server binds to.
    #[arg(long, env = "LISTEN_ADDR", default_value = DEFAULT_LISTEN_ADDR)]
    listen: String,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
/// Noisy crates like `hyper` and `mio` are filtered to `warn` level.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},hyper=warn,mio=warn,tower=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Serves the router until the listener fails or SIGTERM arrives.
#[cfg(unix)]
async fn serve(listener: TcpListener, app: Router) -> color_eyre::Result<()> {
    use std::future::IntoFuture;

    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = axum::serve(listener, app).into_future() => result?,
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    Ok(())
}

#[cfg(not(unix))]
async fn serve(listener: TcpListener, app: Router) -> color_eyre::Result<()> {
    axum::serve(listener, app).await?;
    Ok(())
}

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    debug!(disks_json = %cli.disks_json, "raw disk configuration");
    let config = ServerConfig::from_raw(&cli.host, &cli.listen, &cli.disks_json)?;
    info!(
        host = %config.host,
        disk_count = config.disks.len(),
        "starting disk-scan server"
    );
    for (name, disk) in config.disks.iter() {
        info!(disk = name, path = %disk.path, "disk configured");
    }

    let context = AppContext::new(&config, Arc::new(DiskWalker::new()));
    let app = router(context);

    let listener = TcpListener::bind(config.listen).await?;
    info!(addr = %config.listen, "listening");

    serve(listener, app).await
}
