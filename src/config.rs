//! Application configuration
//!
//! Loaded from a TOML file (default: `~/.config/freight-pricing/config.toml`).
//! Every section and field is optional; missing values take the defaults
//! below.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! url = "sqlite://./freight.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [pricing]
//! gross_up_divisor = 0.88
//! ad_valorem_scale = 10000
//! rounding = "half_up"
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{DomainResult, GrossUpPolicy, PricingPolicy, RoundingMode};
use crate::infrastructure::DatabaseConfig;
use crate::support::errors::InfraError;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "FREIGHT_CONFIG";

/// Default config location: `<config dir>/freight-pricing/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("freight-pricing").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Config path from `FREIGHT_CONFIG`, else the default location.
pub fn config_path_from_env() -> PathBuf {
    std::env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub pricing: PricingSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerSection {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Full connection URL; takes precedence over `path`
    pub url: Option<String>,
    /// SQLite file path
    pub path: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            path: "./freight.db".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        self.url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}?mode=rwc", self.path))
    }

    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.connection_url(),
            max_connections: self.max_connections,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// trace, debug, info, warn, error (or a full EnvFilter directive)
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingSection {
    /// Tax gross-up divisor; absent means no gross-up
    pub gross_up_divisor: Option<Decimal>,
    /// Denominator of the stored ad valorem rate
    pub ad_valorem_scale: u32,
    pub rounding: RoundingMode,
}

impl Default for PricingSection {
    fn default() -> Self {
        let policy = PricingPolicy::default();
        Self {
            gross_up_divisor: None,
            ad_valorem_scale: policy.ad_valorem_scale,
            rounding: policy.rounding,
        }
    }
}

impl PricingSection {
    pub fn to_policy(&self) -> DomainResult<PricingPolicy> {
        let gross_up = match self.gross_up_divisor {
            Some(divisor) => GrossUpPolicy::divisor(divisor)?,
            None => GrossUpPolicy::None,
        };
        PricingPolicy::new(gross_up, self.ad_valorem_scale, self.rounding)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, InfraError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would only fail later at request time.
    pub fn validate(&self) -> Result<(), InfraError> {
        self.pricing
            .to_policy()
            .map_err(|e| InfraError::Config(format!("[pricing] {}", e)))?;
        if !matches!(self.logging.format.to_lowercase().as_str(), "text" | "json") {
            return Err(InfraError::Config(format!(
                "[logging] unknown format '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }
}
