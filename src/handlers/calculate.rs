//! GET /calculate

use crate::handlers::lookup::{AreaParams, VehicleParams};
use crate::handlers::AppState;
use crate::models::{CostReport, MaintenancePolicy};
use crate::utils::error::{helpers, AppResult};
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters.
///
/// Maintenance is added when `includeMaintenance=true` or when either
/// maintenance override is given; missing overrides use the configured values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateParams {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: String,
    #[serde(default, alias = "submodel")]
    pub sub_model: Option<String>,
    pub region: Option<String>,
    #[serde(alias = "fuel_type")]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub include_maintenance: bool,
    pub oil_change_cost: Option<f64>,
    pub miles_per_oil_change: Option<i64>,
}

impl CalculateParams {
    fn vehicle(&self) -> VehicleParams {
        VehicleParams {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year.clone(),
            sub_model: self.sub_model.clone(),
        }
    }

    fn area(&self) -> AreaParams {
        AreaParams {
            region: self.region.clone(),
            fuel_type: self.fuel_type.clone(),
        }
    }

    fn maintenance(&self, defaults: MaintenancePolicy) -> AppResult<Option<MaintenancePolicy>> {
        if !self.include_maintenance
            && self.oil_change_cost.is_none()
            && self.miles_per_oil_change.is_none()
        {
            return Ok(None);
        }

        let policy = MaintenancePolicy::new(
            self.oil_change_cost.unwrap_or(defaults.flat_cost()),
            self.miles_per_oil_change.unwrap_or(defaults.interval_miles()),
        );
        if policy.validate().is_err() {
            return Err(helpers::validation_error(
                "oilChangeCost must be a non-negative number",
            ));
        }
        Ok(Some(policy))
    }
}

/// GET /calculate
///
/// 404 when either lookup yields no data
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CalculateParams>,
) -> AppResult<Json<CostReport>> {
    let vehicle = params.vehicle().into_query()?;
    let area = params.area().resolve(&state);
    let maintenance = params.maintenance(state.config.maintenance_policy())?;

    let report = state
        .calculator
        .evaluate(&vehicle, &area, maintenance.as_ref())
        .await?;

    Ok(Json(report))
}
