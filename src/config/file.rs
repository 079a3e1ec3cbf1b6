//! File-based configuration loading
//!
//! Loads provider endpoints, credentials and defaults from a JSON file,
//! layered with `MILECOUNT__*` environment overrides.

use crate::models::{MaintenancePolicy, RegionFuelGrade};
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file name searched for in the default locations
pub const CONFIG_FILE_NAME: &str = "milecount.json";

/// Environment prefix for overrides, e.g. `MILECOUNT__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "MILECOUNT";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host (default: "127.0.0.1" - localhost only)
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Application configuration loaded from file and environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration (optional, defaults to localhost:8080)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream data providers
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Default maintenance (oil change) policy
    #[serde(default)]
    pub maintenance: MaintenanceConfig,

    /// Optional persistence
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Default region and fuel grade when a request omits them
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Upstream provider configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub fuel_economy: FuelEconomyProviderConfig,

    #[serde(default)]
    pub fuel_price: FuelPriceProviderConfig,
}

/// Vehicle specs provider (CarAPI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelEconomyProviderConfig {
    /// Base URL, without the `/api/mileages/v2` path
    #[serde(default = "default_carapi_url")]
    pub base_url: String,

    /// Optional bearer token; the free tier works without one
    #[serde(default)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,
}

fn default_carapi_url() -> String {
    "https://carapi.app".to_string()
}

fn default_provider_timeout() -> u64 {
    10
}

impl Default for FuelEconomyProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_carapi_url(),
            api_token: None,
            timeout_secs: default_provider_timeout(),
        }
    }
}

/// Fuel price provider (EIA v2 petroleum prices)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelPriceProviderConfig {
    /// Full data endpoint URL
    #[serde(default = "default_eia_url")]
    pub base_url: String,

    /// API key (can be empty if using env var)
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,

    /// Maximum observations requested per lookup
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_eia_url() -> String {
    "https://api.eia.gov/v2/petroleum/pri/gnd/data/".to_string()
}

fn default_page_size() -> u32 {
    100
}

impl Default for FuelPriceProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_eia_url(),
            api_key: String::new(),
            timeout_secs: default_provider_timeout(),
            page_size: default_page_size(),
        }
    }
}

/// Maintenance defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    #[serde(default = "default_oil_change_cost")]
    pub oil_change_cost: f64,

    #[serde(default = "default_miles_per_oil_change")]
    pub miles_per_oil_change: i64,
}

fn default_oil_change_cost() -> f64 {
    MaintenancePolicy::DEFAULT_OIL_CHANGE_COST
}

fn default_miles_per_oil_change() -> i64 {
    MaintenancePolicy::DEFAULT_MILES_PER_OIL_CHANGE
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            oil_change_cost: default_oil_change_cost(),
            miles_per_oil_change: default_miles_per_oil_change(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. "sqlite:milecount.db". Persistence is off when unset.
    #[serde(default)]
    pub url: Option<String>,
}

/// Request defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// EIA duoarea code
    #[serde(default = "default_region")]
    pub region: String,

    /// EIA product code
    #[serde(default = "default_fuel_grade")]
    pub fuel_grade: String,
}

fn default_region() -> String {
    "NUS".to_string()
}

fn default_fuel_grade() -> String {
    "EPMR".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            fuel_grade: default_fuel_grade(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file plus environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(true));

        let config = Self::finish(builder)
            .with_context(|| format!("Failed to load config file: {:?}", path))?;

        debug!(
            "Fuel economy provider: {}, fuel price provider: {}",
            config.providers.fuel_economy.base_url, config.providers.fuel_price.base_url
        );
        Ok(config)
    }

    /// Load configuration from default locations
    /// Searches in order:
    /// 1. ~/.config/milecount/milecount.json
    /// 2. ./milecount.json
    ///
    /// Falls back to built-in defaults plus environment overrides when no
    /// file exists.
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::default_path() {
            return Self::load(&path);
        }

        info!("No {} found, using built-in defaults", CONFIG_FILE_NAME);
        Self::finish(Config::builder()).context("Failed to load configuration from environment")
    }

    /// Load from an explicit path when given, otherwise from default locations
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load_default(),
        }
    }

    /// First existing config file in the search order
    pub fn default_path() -> Option<PathBuf> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".config").join("milecount").join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        let local_path = PathBuf::from(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Some(local_path);
        }

        None
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let mut config: AppConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.resolve_credentials();
        config.validate()?;
        Ok(config)
    }

    /// Fill missing credentials from well-known environment variables
    ///
    /// Runs once at startup; lookups receive the resolved values.
    pub fn resolve_credentials(&mut self) {
        let price = &mut self.providers.fuel_price;
        price.api_key = sanitize_secret(&price.api_key);
        if price.api_key.is_empty() {
            if let Ok(key) = std::env::var("EIA_API_KEY") {
                price.api_key = sanitize_secret(&key);
            }
        }

        let economy = &mut self.providers.fuel_economy;
        let token = economy
            .api_token
            .as_deref()
            .map(sanitize_secret)
            .filter(|t| !t.is_empty())
            .or_else(|| {
                std::env::var("CARAPI_TOKEN")
                    .ok()
                    .map(|t| sanitize_secret(&t))
                    .filter(|t| !t.is_empty())
            });
        economy.api_token = token;
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let economy = &self.providers.fuel_economy;
        if !economy.base_url.starts_with("http") {
            anyhow::bail!("Invalid base URL for fuel economy provider: {}", economy.base_url);
        }
        if economy.timeout_secs == 0 {
            anyhow::bail!("Fuel economy provider timeout cannot be 0");
        }

        let price = &self.providers.fuel_price;
        if !price.base_url.starts_with("http") {
            anyhow::bail!("Invalid base URL for fuel price provider: {}", price.base_url);
        }
        if price.timeout_secs == 0 {
            anyhow::bail!("Fuel price provider timeout cannot be 0");
        }
        if price.page_size == 0 {
            anyhow::bail!("Fuel price page size cannot be 0");
        }

        if self.maintenance.oil_change_cost < 0.0 || !self.maintenance.oil_change_cost.is_finite() {
            anyhow::bail!("Oil change cost must be a non-negative number");
        }

        if self.defaults.region.trim().is_empty() || self.defaults.fuel_grade.trim().is_empty() {
            anyhow::bail!("Default region and fuel grade cannot be empty");
        }

        Ok(())
    }

    /// Maintenance policy built from the configured defaults
    pub fn maintenance_policy(&self) -> MaintenancePolicy {
        MaintenancePolicy::new(
            self.maintenance.oil_change_cost,
            self.maintenance.miles_per_oil_change,
        )
    }

    /// Region and fuel grade used when a request omits them
    pub fn default_area(&self) -> RegionFuelGrade {
        RegionFuelGrade::new(&self.defaults.region, &self.defaults.fuel_grade)
    }

    /// Whether a fuel price API key is available
    pub fn has_fuel_price_key(&self) -> bool {
        !self.providers.fuel_price.api_key.is_empty()
    }
}

/// Strip quotes and whitespace that creep in from properties/env files
fn sanitize_secret(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}
