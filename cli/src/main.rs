//! Freight pricing command-line tool
//!
//! ```sh
//! # Serve the REST API (default config: ~/.config/freight-pricing/config.toml)
//! freight-cli serve --port 8080
//!
//! # One-shot quote against the configured tariff database
//! freight-cli quote --origin-region MG --origin-class METROPOLITANA \
//!     --destination-region SP --destination-class CAPITAL \
//!     --weight 580 --value 17500 --hazardous
//!
//! # Route lookups
//! freight-cli regions
//! freight-cli classifications MG
//!
//! # Validate config without doing anything else
//! freight-cli --check
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

use freight_pricing::config::AppConfig;
use freight_pricing::domain::{PricingBreakdown, PricingRequest, RouteKey};
use freight_pricing::server::{connect_engine, init_tracing, ServerHandle, ServerOptions};
use freight_pricing::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "freight-cli",
    version,
    about = "Freight quotes from a route tariff table",
    long_about = "Computes itemized freight quotes (weight, ad valorem, dispatch, toll, \
                  hazardous and difficult-delivery surcharges) and serves them over REST.\n\n\
                  Default config: ~/.config/freight-pricing/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "FREIGHT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the REST API server.
    Serve {
        /// Override the listen port.
        #[arg(long)]
        port: Option<u16>,
        /// Skip database migrations on startup.
        #[arg(long)]
        no_migrate: bool,
    },
    /// Price a shipment and print the breakdown.
    Quote(QuoteArgs),
    /// List region codes present in the tariff table.
    Regions,
    /// List classification labels for a region.
    Classifications {
        /// Two-letter region code
        region: String,
    },
}

#[derive(Args, Debug)]
struct QuoteArgs {
    #[arg(long)]
    origin_region: String,
    #[arg(long)]
    origin_class: String,
    #[arg(long)]
    destination_region: String,
    #[arg(long)]
    destination_class: String,
    /// Weight in kg
    #[arg(long)]
    weight: Decimal,
    /// Merchandise value in major currency units
    #[arg(long)]
    value: Decimal,
    #[arg(long)]
    hazardous: bool,
    #[arg(long)]
    difficult_delivery: bool,
}

impl From<QuoteArgs> for PricingRequest {
    fn from(args: QuoteArgs) -> Self {
        let route = RouteKey::new(
            args.origin_region,
            args.origin_class,
            args.destination_region,
            args.destination_class,
        );
        PricingRequest::new(route, args.weight, args.value)
            .with_hazardous(args.hazardous)
            .with_difficult_delivery(args.difficult_delivery)
    }
}

fn print_breakdown(breakdown: &PricingBreakdown) {
    for (label, amount) in breakdown.components() {
        println!("{:<16}{:>12}", label, format!("{:.2}", amount));
    }
    println!("{:<16}{:>12}", "total", breakdown.format_total());
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .unwrap_or_else(freight_pricing::default_config_path)
}

/// Strict load for `--check`: no fallback to defaults.
fn check_config(path: &Path) -> ExitCode {
    let config = match AppConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration is invalid: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let policy = match config.pricing.to_policy() {
        Ok(policy) => policy,
        Err(e) => {
            eprintln!("Configuration is invalid: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Configuration is valid");
    println!("   Config file : {}", path.display());
    println!("   API address : {}", config.server.address());
    println!("   Database    : {}", config.database.connection_url());
    println!("   Log level   : {}", config.logging.level);
    println!("   Gross-up    : {:?}", policy.gross_up);
    println!("   Ad valorem  : 1/{}", policy.ad_valorem_scale);
    println!("   Rounding    : {}", policy.rounding);
    ExitCode::SUCCESS
}

fn load_config(cli: &Cli) -> AppConfig {
    let config_path = config_path(cli);

    // One-shot commands keep stdout for their own output.
    let quiet = !matches!(cli.command, None | Some(Command::Serve { .. }));

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            apply_log_level(&mut cfg, cli.log_level.as_deref(), quiet);
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            apply_log_level(&mut cfg, cli.log_level.as_deref(), quiet);
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    if let Some(Command::Serve { port: Some(port), .. }) = &cli.command {
        info!("CLI override: port = {}", port);
        config.server.port = *port;
    }
    config
}

fn apply_log_level(config: &mut AppConfig, level: Option<&str>, quiet: bool) {
    match level {
        Some(level) => config.logging.level = level.to_string(),
        None if quiet => config.logging.level = "warn".to_string(),
        None => {}
    }
}

async fn serve(config: AppConfig, auto_migrate: bool) -> Result<(), AppError> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate,
    })
    .await?;
    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}

async fn run(command: Option<Command>, config: AppConfig) -> Result<(), AppError> {
    match command {
        None => serve(config, true).await?,
        Some(Command::Serve { no_migrate, .. }) => serve(config, !no_migrate).await?,
        Some(Command::Quote(args)) => {
            let request = PricingRequest::from(args);
            request.validate()?;
            let (engine, _db) = connect_engine(&config, true).await?;
            let breakdown = engine.compute(&request).await?;
            println!("{}", request.route);
            print_breakdown(&breakdown);
        }
        Some(Command::Regions) => {
            let (engine, _db) = connect_engine(&config, true).await?;
            for region in engine.regions().await? {
                println!("{}", region);
            }
        }
        Some(Command::Classifications { region }) => {
            let (engine, _db) = connect_engine(&config, true).await?;
            for label in engine.classifications(&region).await? {
                println!("{}", label);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.check {
        return check_config(&config_path(&cli));
    }

    let config = load_config(&cli);
    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
