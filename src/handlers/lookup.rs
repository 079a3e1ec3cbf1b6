//! Single lookups: mileage, trims, fuel price and reference data

use crate::handlers::AppState;
use crate::models::{FuelGrade, Region, RegionFuelGrade, VehicleQuery};
use crate::utils::error::{helpers, AppResult};
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Vehicle query parameters (`make`, `model`, `year`, `subModel`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleParams {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: String,
    #[serde(default, alias = "submodel")]
    pub sub_model: Option<String>,
}

impl VehicleParams {
    /// Validated query
    pub fn into_query(self) -> AppResult<VehicleQuery> {
        let mut query = VehicleQuery::new(self.make.trim(), self.model.trim(), self.year.trim());
        query.submodel = self.sub_model;
        query.validate().map_err(helpers::validation_error)?;
        Ok(query)
    }
}

/// Region and fuel grade parameters; missing values fall back to configured defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaParams {
    pub region: Option<String>,
    #[serde(alias = "fuel_type")]
    pub fuel_type: Option<String>,
}

impl AreaParams {
    pub fn resolve(&self, state: &AppState) -> RegionFuelGrade {
        let defaults = &state.config.defaults;
        let pick = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        RegionFuelGrade::new(
            pick(&self.region, &defaults.region),
            pick(&self.fuel_type, &defaults.fuel_grade),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MpgResponse {
    pub make: String,
    pub model: String,
    pub year: String,
    pub submodel: Option<String>,
    pub mpg: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrimSummary {
    pub submodel: Option<String>,
    pub trim: Option<String>,
    pub mpg: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrimsResponse {
    pub make: String,
    pub model: String,
    pub year: String,
    pub trims: Vec<TrimSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceResponse {
    pub region: String,
    pub region_name: String,
    pub fuel_type: String,
    pub fuel_type_name: String,
    pub price_per_gallon: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub name: String,
}

/// GET /mpg
pub async fn get_mpg(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VehicleParams>,
) -> AppResult<Json<MpgResponse>> {
    let query = params.into_query()?;
    debug!("Looking up mpg for {}", query);

    let mpg = state
        .bounded(state.fuel_economy.lookup_mpg(&query))
        .await?
        .ok_or_else(|| helpers::no_data_error(format!("no fuel economy data for {}", query)))?;

    Ok(Json(MpgResponse {
        submodel: query.requested_submodel().map(str::to_string),
        make: query.make,
        model: query.model,
        year: query.year,
        mpg,
    }))
}

/// GET /mpg/trims
pub async fn get_trims(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VehicleParams>,
) -> AppResult<Json<TrimsResponse>> {
    let query = params.into_query()?;

    let result = state
        .bounded(state.fuel_economy.trims(&query))
        .await?
        .ok_or_else(|| helpers::no_data_error(format!("no trims found for {}", query)))?;

    let trims = result
        .records()
        .iter()
        .map(|record| TrimSummary {
            submodel: record.submodel.clone(),
            trim: record.trim.clone(),
            mpg: record.mileage(),
        })
        .collect();

    Ok(Json(TrimsResponse {
        make: query.make,
        model: query.model,
        year: query.year,
        trims,
    }))
}

/// GET /price
pub async fn get_price(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AreaParams>,
) -> AppResult<Json<PriceResponse>> {
    let area = params.resolve(&state);

    let price = state
        .bounded(state.fuel_price.latest_price(&area))
        .await?
        .ok_or_else(|| {
            helpers::no_data_error(format!(
                "no fuel price for region {} and grade {}",
                area.region_code(),
                area.fuel_grade_code()
            ))
        })?;

    Ok(Json(PriceResponse {
        region: area.region_code().to_string(),
        region_name: Region::from_code(area.region_code()).display_name().to_string(),
        fuel_type: area.fuel_grade_code().to_string(),
        fuel_type_name: FuelGrade::display_name_for(area.fuel_grade_code()),
        price_per_gallon: price,
    }))
}

/// GET /regions
pub async fn list_regions() -> Json<Vec<CodeEntry>> {
    Json(
        Region::ALL
            .iter()
            .map(|r| CodeEntry {
                code: r.code().to_string(),
                name: r.display_name().to_string(),
            })
            .collect(),
    )
}

/// GET /fuel-grades
pub async fn list_fuel_grades() -> Json<Vec<CodeEntry>> {
    Json(
        FuelGrade::ALL
            .iter()
            .map(|g| CodeEntry {
                code: g.code().to_string(),
                name: g.display_name().to_string(),
            })
            .collect(),
    )
}
