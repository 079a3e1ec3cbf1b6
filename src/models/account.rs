//! Persisted users and vehicles

use super::VehicleQuery;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored user account. The password hash never leaves the storage layer
/// in API responses.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Vehicle saved under a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedVehicle {
    pub id: i64,
    pub owner_id: i64,
    pub make: String,
    pub model: String,
    pub year: String,
    pub submodel: Option<String>,
    /// Mileage recorded when the vehicle was saved; 0 or absent means unknown
    pub city_mpg: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl SavedVehicle {
    pub fn query(&self) -> VehicleQuery {
        VehicleQuery {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year.clone(),
            submodel: self.submodel.clone(),
        }
    }

    /// Stored mileage when it can stand in for a fresh lookup
    pub fn known_mpg(&self) -> Option<f64> {
        self.city_mpg.filter(|v| super::usable(*v))
    }

    /// Same vehicle: make/model/submodel ignore case, year is exact
    pub fn matches(&self, query: &VehicleQuery) -> bool {
        let same_submodel = match (
            self.submodel.as_deref().map(str::trim).filter(|s| !s.is_empty()),
            query.requested_submodel(),
        ) {
            (None, None) => true,
            (Some(a), Some(b)) => super::same_name(a, b),
            _ => false,
        };

        super::same_name(&self.make, &query.make)
            && super::same_name(&self.model, &query.model)
            && self.year.trim() == query.year.trim()
            && same_submodel
    }
}

/// Vehicle to be saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
    #[serde(flatten)]
    pub vehicle: VehicleQuery,
    #[serde(default)]
    pub city_mpg: Option<f64>,
}
