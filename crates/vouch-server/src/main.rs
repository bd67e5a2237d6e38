//! # Vouch Server
//!
//! The main entry point for the testimonial service.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (level from `VOUCH_LOG`, default info)
//! 2. Load configuration from `VOUCH_*` environment variables
//! 3. Select the storage backend (`VOUCH_DATA_DIR` set → file-backed,
//!    unset → in-memory with a loud warning)
//! 4. Start the gateway
//! 5. Run until Ctrl+C, then shut down gracefully
//!
//! ## Environment Variables
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `VOUCH_HTTP_HOST` | bind address | `127.0.0.1` |
//! | `VOUCH_HTTP_PORT` | bind port | `8787` |
//! | `VOUCH_ADMIN_TOKEN` | moderation secret | unset (admin disabled) |
//! | `VOUCH_DATA_DIR` | blob store directory | unset (in-memory) |
//! | `VOUCH_ALLOWED_ORIGINS` | comma-separated CORS origins | `*` |
//! | `VOUCH_LOG` | log level filter | `info` |

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use vouch_gateway::{GatewayConfig, TestimonialGateway};
use vouch_store::{BlobStore, FileBlobStore, MemoryBlobStore};

/// Server configuration: gateway settings plus storage selection.
struct ServerConfig {
    gateway: GatewayConfig,
    data_dir: Option<PathBuf>,
}

/// Load configuration from environment variables over defaults.
fn load_config() -> Result<ServerConfig> {
    let mut gateway = GatewayConfig::default();

    if let Ok(host) = std::env::var("VOUCH_HTTP_HOST") {
        gateway.http.host = host
            .parse()
            .with_context(|| format!("invalid VOUCH_HTTP_HOST: {host}"))?;
    }
    if let Ok(port) = std::env::var("VOUCH_HTTP_PORT") {
        gateway.http.port = port
            .parse()
            .with_context(|| format!("invalid VOUCH_HTTP_PORT: {port}"))?;
    }
    if let Ok(token) = std::env::var("VOUCH_ADMIN_TOKEN") {
        gateway.admin.token = Some(token);
    }
    if let Ok(origins) = std::env::var("VOUCH_ALLOWED_ORIGINS") {
        gateway.cors.allowed_origins = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }

    let data_dir = std::env::var("VOUCH_DATA_DIR").ok().map(PathBuf::from);

    Ok(ServerConfig { gateway, data_dir })
}

fn log_level() -> Level {
    std::env::var("VOUCH_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(Level::INFO)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level())
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = load_config()?;

    info!("===========================================");
    info!("  Vouch Testimonial Service v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    // Select storage backend
    let store: Arc<dyn BlobStore> = match &config.data_dir {
        Some(dir) => {
            info!(data_dir = %dir.display(), "using file-backed blob store");
            Arc::new(FileBlobStore::new(dir))
        }
        None => {
            warn!("VOUCH_DATA_DIR not set; submissions will not survive a restart");
            Arc::new(MemoryBlobStore::new())
        }
    };

    if config.gateway.admin.token.is_none() {
        warn!("VOUCH_ADMIN_TOKEN not set; moderation endpoints will refuse all requests");
    }

    // Start the gateway
    let mut gateway = TestimonialGateway::new(config.gateway, store)
        .context("failed to create gateway")?;
    let addr = gateway.start().await.context("failed to start gateway")?;
    info!(addr = %addr, "service is running, press Ctrl+C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("received shutdown signal");
    gateway.shutdown().await;

    Ok(())
}
