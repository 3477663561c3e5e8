//! Freight pricing server runtime.
//!
//! [`ServerHandle`] owns the server lifecycle: metrics recorder, database
//! connection and migrations, pricing engine, REST API and graceful
//! shutdown.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::PricingEngine;
use crate::config::AppConfig;
use crate::domain::TariffRepository;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, SeaOrmTariffRepository};
use crate::interfaces::create_api_router;
use crate::support::errors::{AppError, InfraError};
use crate::support::shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Options for starting the server.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

/// Global Prometheus recorder. Installed at most once per process so a
/// stop/start cycle reuses it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();
    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
                None
            }
        })
        .clone()
}

/// Build a [`PricingEngine`] over the configured tariff database.
///
/// Pricing settings are checked before the database is opened. Also used
/// by the CLI for one-shot quotes.
pub async fn connect_engine(
    config: &AppConfig,
    auto_migrate: bool,
) -> Result<(PricingEngine, DatabaseConnection), AppError> {
    let policy = config.pricing.to_policy()?;
    info!(
        gross_up = ?policy.gross_up,
        ad_valorem_scale = policy.ad_valorem_scale,
        rounding = %policy.rounding,
        "Pricing policy loaded"
    );

    let db = init_database(&config.database.to_database_config())
        .await
        .map_err(InfraError::from)?;

    if auto_migrate {
        info!("Running database migrations...");
        Migrator::up(&db, None).await.map_err(InfraError::from)?;
        info!("Migrations completed");
    }

    let tariffs: Arc<dyn TariffRepository> = Arc::new(SeaOrmTariffRepository::new(db.clone()));
    Ok((PricingEngine::new(tariffs, policy), db))
}

/// Handle to a running freight pricing server.
///
/// ```rust,no_run
/// use freight_pricing::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub engine: Arc<PricingEngine>,
    pub config: AppConfig,
    /// Address the REST API is bound to
    pub local_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect, migrate, build the pricing engine and start serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, AppError> {
        let app_cfg = opts.config;
        info!("Starting freight pricing service...");

        let prometheus = prometheus_handle();

        let (engine, db) = connect_engine(&app_cfg, opts.auto_migrate).await?;
        let engine = Arc::new(engine);

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();

        let router = create_api_router(engine.clone(), Some(db.clone()), prometheus);

        let addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(InfraError::from)?;
        let local_addr = listener.local_addr().map_err(InfraError::from)?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            engine,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Trigger shutdown on SIGINT / SIGTERM.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the API task to drain (bounded by the shutdown timeout),
    /// then close the database.
    pub async fn wait(self) {
        info!("Waiting for in-flight requests...");
        match tokio::time::timeout(self.shutdown.timeout(), self.api_task).await {
            Ok(Ok(())) => info!("REST API stopped"),
            Ok(Err(e)) => error!("REST API task panicked: {}", e),
            Err(_) => warn!(
                "REST API did not stop within {:?}, abandoning",
                self.shutdown.timeout()
            ),
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
        info!("Freight pricing service shutdown complete");
    }

    pub async fn shutdown(self) {
        info!("Shutting down freight pricing service...");
        self.trigger_shutdown();
        self.wait().await;
    }
}

/// Initialize tracing from the logging section.
///
/// `RUST_LOG` takes precedence over `logging.level`. Call once at startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
