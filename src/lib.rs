//! Make Every Mile Count
//!
//! Computes a vehicle's per-mile driving cost from a fuel economy rating
//! (CarAPI) and a regional fuel price (EIA), optionally adding amortized
//! maintenance cost.

pub mod cli;
pub mod commands;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export common types
pub use config::{AppConfig, Settings};
pub use handlers::{create_router, AppState};
pub use models::{CostBreakdown, CostReport, MaintenancePolicy, RegionFuelGrade, VehicleQuery};
pub use providers::{FuelEconomyLookup, FuelPriceLookup};
pub use services::{CalculationError, MileageCalculator};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
