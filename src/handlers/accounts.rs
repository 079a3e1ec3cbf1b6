//! Account and saved vehicle endpoints

use crate::handlers::AppState;
use crate::models::{NewVehicle, SavedVehicle, User};
use crate::utils::error::{helpers, AppError, AppResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn validate(&self) -> AppResult<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(helpers::validation_error("a valid email address is required"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(helpers::validation_error(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }
}

/// POST /users
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> AppResult<(StatusCode, Json<User>)> {
    let store = state.store()?;
    credentials.validate()?;

    let user = store
        .users
        .create_user(&credentials.email, &credentials.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /users/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<User>> {
    let store = state.store()?;

    store
        .users
        .verify(&credentials.email, &credentials.password)
        .await?
        .map(Json)
        .ok_or_else(|| helpers::auth_error("invalid email or password"))
}

/// GET /users/:id/vehicles
pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<SavedVehicle>>> {
    let store = state.store()?;
    ensure_user(&state, user_id).await?;

    let vehicles = store.vehicles.list_by_owner(user_id).await?;
    Ok(Json(vehicles))
}

/// POST /users/:id/vehicles
pub async fn save_vehicle(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(vehicle): Json<NewVehicle>,
) -> AppResult<(StatusCode, Json<SavedVehicle>)> {
    let store = state.store()?;
    vehicle.vehicle.validate().map_err(helpers::validation_error)?;
    ensure_user(&state, user_id).await?;

    let saved = store.vehicles.save_vehicle(user_id, &vehicle).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn ensure_user(state: &AppState, user_id: i64) -> AppResult<User> {
    state
        .store()?
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_credentials_validation() {
        assert!(creds("driver@example.com", "longenough").validate().is_ok());
        assert!(creds("no-at-sign", "longenough").validate().is_err());
        assert!(creds("driver@example.com", "short").validate().is_err());
        assert!(creds("  ", "longenough").validate().is_err());
    }
}
