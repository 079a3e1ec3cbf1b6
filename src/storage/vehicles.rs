//! Vehicles saved under a user

use crate::models::{NewVehicle, SavedVehicle, VehicleQuery};
use crate::utils::error::AppResult;
use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use tracing::info;

#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn save_vehicle(&self, owner_id: i64, vehicle: &NewVehicle) -> AppResult<SavedVehicle> {
        let query = &vehicle.vehicle;
        let saved = sqlx::query_as::<_, SavedVehicle>(
            "INSERT INTO vehicles (owner_id, make, model, year, submodel, city_mpg, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING id, owner_id, make, model, year, submodel, city_mpg, created_at",
        )
        .bind(owner_id)
        .bind(query.make.trim())
        .bind(query.model.trim())
        .bind(query.year.trim())
        .bind(query.requested_submodel())
        .bind(vehicle.city_mpg.filter(|v| crate::models::usable(*v)))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        info!("Saved vehicle {} ({}) for user {}", saved.id, query, owner_id);
        Ok(saved)
    }

    /// Vehicles of one owner, oldest first
    pub async fn list_by_owner(&self, owner_id: i64) -> AppResult<Vec<SavedVehicle>> {
        let vehicles = sqlx::query_as::<_, SavedVehicle>(
            "SELECT id, owner_id, make, model, year, submodel, city_mpg, created_at
             FROM vehicles WHERE owner_id = ? ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    /// First saved vehicle of the owner matching the query
    pub async fn find_matching(
        &self,
        owner_id: i64,
        query: &VehicleQuery,
    ) -> AppResult<Option<SavedVehicle>> {
        let vehicles = self.list_by_owner(owner_id).await?;
        Ok(vehicles.into_iter().find(|v| v.matches(query)))
    }
}
