//! Configuration management module
//!
//! `Settings` comes from environment variables; `AppConfig` from the JSON
//! config file layered with `MILECOUNT__*` overrides.

pub mod file;
pub mod settings;

pub use file::{
    AppConfig, DatabaseConfig, DefaultsConfig, FuelEconomyProviderConfig, FuelPriceProviderConfig,
    MaintenanceConfig, ProvidersConfig, ServerConfig,
};
pub use settings::{LoggingConfig, RequestConfig, SecurityConfig, Settings};
