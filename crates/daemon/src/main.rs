// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transfer Retry Daemon (xrd)
//!
//! Receives transfer-run failure notifications over HTTP push and requests
//! bounded retries from the job-control API.
//!
//! Architecture:
//! - Listener: axum server, one spawned task per delivery
//! - Controller: stateless pipeline shared by every delivery

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod env;
mod envelope;
mod lifecycle;
mod listener;

use std::future::Future;
use std::path::Path;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::lifecycle::{Config, LifecycleError, LogFormat, StartupResult};
use crate::listener::Listener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before any config loading
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("xrd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("xrd {}", env!("CARGO_PKG_VERSION"));
                println!("Transfer Retry Daemon - retries failed scheduled transfer runs");
                println!();
                println!("USAGE:");
                println!("    xrd");
                println!();
                println!("Listens for failure notifications on POST / and serves");
                println!("health checks on GET /healthz.");
                println!();
                println!("ENVIRONMENT:");
                println!("    XR_CONFIG              Settings file (default: xfer-retry.toml)");
                println!("    PORT, XR_PORT          Listen port (default: 8080)");
                println!("    XR_POLL_ATTEMPTS       Override [controller] poll_attempts");
                println!("    XR_POLL_DELAY_MS       Override [controller] poll_delay_ms");
                println!("    XR_HISTORY_PAGE_SIZE   Override [controller] history_page_size");
                println!("    XR_DTS_ENDPOINT        Override [job_control] endpoint");
                println!("    XR_LOG_FORMAT          pretty | json");
                println!("    XR_LOG_PATH            Log file (default: stderr)");
                println!("    RUST_LOG               Log filter (default: info)");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: xrd [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;

    // Guard flushes buffered log lines on drop
    let _log_guard = setup_logging(&config)?;

    info!(
        settings = %config.settings_path.display(),
        managed = config.managed.len(),
        "Starting transfer retry daemon"
    );

    let StartupResult {
        controller,
        listener,
    } = match lifecycle::startup(&config).await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to start daemon: {}", e);
            return Err(e.into());
        }
    };

    let listener = Listener::new(listener, controller);
    let shutdown = shutdown_signal()?;

    info!("Daemon ready, listening on {}", listener.local_addr()?);

    // Signal ready for parent process
    println!("READY");

    listener.run(shutdown).await?;

    info!("Daemon stopped");
    Ok(())
}

/// Resolves on SIGTERM or SIGINT.
fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static, LifecycleError> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    Ok(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
            _ = sigint.recv() => info!("Received SIGINT, shutting down..."),
        }
    })
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, LifecycleError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (writer, guard) = match &config.log_path {
        Some(path) => {
            let (dir, file) = split_log_path(path)?;
            std::fs::create_dir_all(dir)?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(writer))
            .init(),
    }

    Ok(guard)
}

/// Split a log file path into its directory (`.` when bare) and file name.
fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr), LifecycleError> {
    let file = path
        .file_name()
        .ok_or_else(|| LifecycleError::InvalidLogPath(path.to_path_buf()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Ok((dir, file))
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
