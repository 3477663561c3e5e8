//! Freight pricing HTTP server.
//!
//! Reads configuration from `FREIGHT_CONFIG` or
//! `~/.config/freight-pricing/config.toml`.

use tracing::{error, info};

use freight_pricing::config::{config_path_from_env, AppConfig};
use freight_pricing::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path_from_env();
    let config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let fallback = AppConfig::default();
            init_tracing(&fallback);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            fallback
        }
    };

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: true,
    })
    .await?;
    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
