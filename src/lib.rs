//! # Freight Pricing Service
//!
//! Itemized freight quotes computed from a route tariff table: weight
//! charge, ad valorem, dispatch fee, toll and optional hazardous-cargo and
//! difficult-delivery surcharges.
//!
//! ## Architecture
//!
//! - **domain**: tariff rows, pricing policy and the pure pricing math
//! - **application**: `PricingEngine` (lookup + pricing + telemetry)
//! - **infrastructure**: SeaORM tariff table and an in-memory repository
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: runtime lifecycle and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use application::PricingEngine;
pub use config::{default_config_path, AppConfig};
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryTariffRepository, SeaOrmTariffRepository,
};
pub use interfaces::create_api_router;
pub use support::errors::{AppError, DomainError, DomainResult, InfraError};
