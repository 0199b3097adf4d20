//! Termux Bridge - Main Entry Point
//! JSON-RPC server in front of the RUN_COMMAND dispatch bridge

mod config;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{DaemonConfig, LogFormat};
use termux_bridge_api_rpc::{RpcServer, RpcServerConfig};
use termux_bridge_core::port::id_provider::UuidProvider;
use termux_bridge_core::DispatchBridge;
use termux_bridge_infra_system::constants::default_env_allowlist;
use termux_bridge_infra_system::{AmIntentSubmitter, PackageManagerProbe};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("termux_bridge=info"))
        .context("Failed to create env filter")?;

    match format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration (invalid values abort startup)
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging
    init_logging(config.log_format)?;
    info!("Termux Bridge v{} starting...", VERSION);
    info!(
        am_path = %config.am_path,
        pm_path = %config.pm_path,
        user = ?config.user,
        submit_timeout_ms = config.submit_timeout.as_millis() as u64,
        probe_timeout_ms = config.probe_timeout.as_millis() as u64,
        "Configuration loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let mut submitter = AmIntentSubmitter::new(config.am_path.clone(), default_env_allowlist())
        .with_timeout(config.submit_timeout);
    if let Some(user) = config.user {
        submitter = submitter.with_user(user);
    }
    let probe = PackageManagerProbe::new(config.pm_path.clone()).with_timeout(config.probe_timeout);

    let bridge = Arc::new(DispatchBridge::new(
        Arc::new(submitter),
        Arc::new(UuidProvider),
    ));

    // 4. Start JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: config.rpc_host.clone(),
        port: config.rpc_port,
    };
    let (addr, rpc_handle) = RpcServer::new(rpc_config, bridge, Arc::new(probe))
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    info!(addr = %addr, "System ready. Press Ctrl+C to shutdown");

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received. Exiting gracefully...");

    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    info!("Shutdown complete.");
    Ok(())
}
