//! Data models module
//!
//! Request-scoped domain types plus the wire schemas of the two upstream
//! providers.

pub mod account;
pub mod carapi;
pub mod cost;
pub mod eia;
pub mod region;
pub mod vehicle;

pub use account::{NewVehicle, SavedVehicle, User};
pub use carapi::{FuelEconomyResult, MileagesResponse, TrimRecord};
pub use cost::{CostBreakdown, CostReport, MaintenancePolicy};
pub use eia::{EiaResponse, PriceObservation};
pub use region::{FuelGrade, Region};
pub use vehicle::{RegionFuelGrade, VehicleQuery};

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable numeric field that providers sometimes send as a
/// string ("3.129") instead of a number. Anything unparseable becomes `None`.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

/// Deserialize an optional label that providers occasionally send as a number
/// (`"submodel": 2500`). Numbers and booleans become their text; arrays,
/// objects and null become `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// Case-insensitive name comparison shared by every submodel/make/model match
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// A reading that can be used as mpg or price: finite and strictly positive
pub(crate) fn usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
