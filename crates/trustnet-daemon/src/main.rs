// crates/trustnet-daemon/src/main.rs
//
// Binary entrypoint for the TrustNet scoring daemon.
//
// Loads configuration, initialises tracing, builds the collaborator handles,
// and serves the JSON-RPC API until ctrl-c.

mod config;
mod handles;
mod http;
mod inference;
mod ledger;
mod profiles;

use std::time::Instant;

use clap::Parser;
use config::DaemonConfig;

use trustnet_rpc::{RpcConfig, TrustRpcServer};
use trustnet_scoring::TrustEngine;

/// TrustNet daemon: serves trust-score requests over JSON-RPC.
#[derive(Parser, Debug)]
#[command(name = "trustnet-daemon", version, about = "TrustNet scoring daemon")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "~/.trustnet/config.toml")]
    config: String,

    /// Override the configured RPC port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let args = Args::parse();

    // Config is read before tracing so its log level can seed the filter.
    let loaded = DaemonConfig::load(&args.config);
    let mut daemon_config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => DaemonConfig::default(),
    };
    if let Some(port) = args.port {
        daemon_config.rpc_port = port;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&daemon_config.log_level)),
        )
        .init();

    match &loaded {
        Ok(_) => tracing::info!("Loaded configuration from {}", args.config),
        Err(e) => {
            tracing::warn!("Could not load config from {}: {}. Using defaults.", args.config, e)
        }
    }

    tracing::info!("TrustNet daemon v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("RPC endpoint: {}:{}", daemon_config.rpc_host, daemon_config.rpc_port);
    tracing::info!(
        financial = daemon_config.scoring.domain_weights.financial,
        social = daemon_config.scoring.domain_weights.social,
        document = daemon_config.scoring.domain_weights.document,
        reference = daemon_config.scoring.domain_weights.reference,
        timeout_ms = daemon_config.scoring.collaborator_timeout_ms,
        "Scoring configuration"
    );

    let handles = handles::init(&daemon_config);
    let engine = TrustEngine::new(handles.scoring.clone(), daemon_config.scoring.clone());
    let rpc_config = RpcConfig {
        host: daemon_config.rpc_host.clone(),
        port: daemon_config.rpc_port,
    };
    let server = TrustRpcServer::new(rpc_config, engine).with_start_time(start_time);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
    };
    let served = server.serve_with_shutdown(shutdown).await;

    handles.shutdown();
    match served {
        Ok(()) => {
            tracing::info!("TrustNet daemon shut down gracefully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("RPC server error: {}", e);
            Err(e)
        }
    }
}
