//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::debug;

const SERVICE_NAME: &str = "milecount";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Fuel economy provider name
    pub fuel_economy: String,
    /// Fuel price provider state
    pub fuel_price: String,
    /// "enabled" or "disabled"
    pub database: String,
    pub uptime_seconds: u64,
}

/// Basic health check
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");
    Json(build_response("healthy", &state))
}

/// Readiness check
///
/// GET /health/ready
/// Not ready until a fuel price API key is configured
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    debug!("Executing readiness check");

    if state.config.has_fuel_price_key() {
        Ok(Json(build_response("ready", &state)))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(build_response("not_ready", &state)),
        ))
    }
}

/// Liveness check
///
/// GET /health/live
/// Does not check external dependencies
pub async fn liveness_check(State(_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing liveness check");

    Json(HealthResponse {
        status: "alive".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: None,
    })
}

fn build_response(status: &str, state: &AppState) -> HealthResponse {
    let fuel_price = if state.config.has_fuel_price_key() {
        state.fuel_price.name().to_string()
    } else {
        format!("{} (api key missing)", state.fuel_price.name())
    };

    HealthResponse {
        status: status.to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            fuel_economy: state.fuel_economy.name().to_string(),
            fuel_price,
            database: if state.store.is_some() { "enabled" } else { "disabled" }.to_string(),
            uptime_seconds: get_uptime_seconds(),
        }),
    }
}

/// Seconds since the first health request
fn get_uptime_seconds() -> u64 {
    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_calculation() {
        let uptime1 = get_uptime_seconds();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let uptime2 = get_uptime_seconds();
        assert!(uptime2 >= uptime1);
    }
}
