//! # Guest-WiFi Runtime
//!
//! Entry point of the credential issuing service.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults + `GW_*` environment overrides)
//! 2. Install logging
//! 3. Lock and load the credential pool, wire the subsystems
//! 4. Serve console events until stdin closes or Ctrl+C

use std::sync::Arc;

use anyhow::{Context, Result};
use gw_runtime::adapters::ConsoleReplyChannel;
use gw_runtime::container::LoggingConfig;
use gw_runtime::{GuestWifiRuntime, RuntimeConfig, ServiceContainer};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("Invalid log level")?;

    // Logs go to stderr; stdout carries replies.
    if config.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .context("Failed to install JSON logger")?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_ansi(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to install logger")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env().context("Failed to read configuration")?;
    init_tracing(&config.logging)?;

    info!("===========================================");
    info!("  Guest-WiFi Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let container = ServiceContainer::open(config).context("Failed to start services")?;
    let runtime = Arc::new(GuestWifiRuntime::new(
        container.controller(),
        Arc::new(ConsoleReplyChannel::stdout()),
    ));

    let ctrl_c = {
        let runtime = Arc::clone(&runtime);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl+C received");
                runtime.shutdown();
            }
        })
    };

    info!("Ready. One event per line: <requester_id>[ (<name>)]: <text>");
    let summary = runtime
        .run(BufReader::new(tokio::io::stdin()))
        .await
        .context("Event loop failed")?;
    ctrl_c.abort();

    info!(events = summary.events, "Shutdown complete");
    Ok(())
}
