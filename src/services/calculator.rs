//! Mileage calculator
//!
//! Chains the fuel economy lookup, the fuel price lookup and the cost model.
//! The price lookup is skipped when no mileage is available.

use crate::models::{CostBreakdown, CostReport, MaintenancePolicy, RegionFuelGrade, VehicleQuery};
use crate::providers::{FuelEconomyLookup, FuelPriceLookup};
use crate::services::cost_model;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default bound on each lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);

/// Why a calculation produced no result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("no fuel economy data for {0}")]
    FuelEconomyUnavailable(String),

    #[error("no fuel price for region {region} and grade {fuel_grade}")]
    FuelPriceUnavailable { region: String, fuel_grade: String },
}

/// Per-mile cost calculator
#[derive(Clone)]
pub struct MileageCalculator {
    fuel_economy: Arc<dyn FuelEconomyLookup>,
    fuel_price: Arc<dyn FuelPriceLookup>,
    lookup_timeout: Duration,
}

impl MileageCalculator {
    pub fn new(
        fuel_economy: Arc<dyn FuelEconomyLookup>,
        fuel_price: Arc<dyn FuelPriceLookup>,
    ) -> Self {
        Self {
            fuel_economy,
            fuel_price,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Cost breakdown, all zeros when either lookup fails
    pub async fn calculate(
        &self,
        vehicle: &VehicleQuery,
        area: &RegionFuelGrade,
        maintenance: Option<&MaintenancePolicy>,
    ) -> CostBreakdown {
        self.evaluate(vehicle, area, maintenance)
            .await
            .map(|report| report.breakdown)
            .unwrap_or_default()
    }

    /// Full report, or the first lookup that came back empty
    pub async fn evaluate(
        &self,
        vehicle: &VehicleQuery,
        area: &RegionFuelGrade,
        maintenance: Option<&MaintenancePolicy>,
    ) -> Result<CostReport, CalculationError> {
        let mpg = self
            .bounded("fuel economy", self.fuel_economy.lookup_mpg(vehicle))
            .await
            .filter(|v| crate::models::usable(*v))
            .ok_or_else(|| {
                warn!("Fuel economy lookup failed for {}", vehicle);
                CalculationError::FuelEconomyUnavailable(vehicle.to_string())
            })?;

        self.evaluate_with_mpg(mpg, vehicle, area, maintenance).await
    }

    /// Same as `evaluate` with a mileage already known (e.g. a saved vehicle)
    pub async fn evaluate_with_mpg(
        &self,
        mpg: f64,
        vehicle: &VehicleQuery,
        area: &RegionFuelGrade,
        maintenance: Option<&MaintenancePolicy>,
    ) -> Result<CostReport, CalculationError> {
        if !crate::models::usable(mpg) {
            return Err(CalculationError::FuelEconomyUnavailable(vehicle.to_string()));
        }

        let price = self
            .bounded("fuel price", self.fuel_price.latest_price(area))
            .await
            .filter(|v| crate::models::usable(*v))
            .ok_or_else(|| {
                warn!(
                    "Fuel price lookup failed for {}/{}",
                    area.region_code(),
                    area.fuel_grade_code()
                );
                CalculationError::FuelPriceUnavailable {
                    region: area.region_code().to_string(),
                    fuel_grade: area.fuel_grade_code().to_string(),
                }
            })?;

        let fuel = cost_model::fuel_cost_per_mile(price, mpg);
        let maintenance_share = maintenance.map_or(0.0, MaintenancePolicy::cost_per_mile);
        let breakdown = CostBreakdown::new(fuel, maintenance_share);

        info!(
            "{}: {:.1} mpg at ${:.3}/gal -> ${:.4}/mile",
            vehicle,
            mpg,
            price,
            breakdown.total_cost_per_mile()
        );

        Ok(CostReport::new(
            vehicle.clone(),
            area,
            mpg,
            price,
            maintenance.copied(),
            breakdown,
        ))
    }

    /// Run a lookup under the timeout; elapsed counts as no data
    async fn bounded<F>(&self, what: &str, lookup: F) -> Option<f64>
    where
        F: Future<Output = Option<f64>>,
    {
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(value) => value,
            Err(_) => {
                debug!("{} lookup exceeded {:?}", what, self.lookup_timeout);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FuelEconomyResult;
    use async_trait::async_trait;

    struct FixedEconomy(Option<f64>);

    #[async_trait]
    impl FuelEconomyLookup for FixedEconomy {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn trims(&self, _query: &VehicleQuery) -> Option<FuelEconomyResult> {
            None
        }

        async fn lookup_mpg(&self, _query: &VehicleQuery) -> Option<f64> {
            self.0
        }
    }

    struct FixedPrice(Option<f64>);

    #[async_trait]
    impl FuelPriceLookup for FixedPrice {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn latest_price(&self, _area: &RegionFuelGrade) -> Option<f64> {
            self.0
        }
    }

    fn calculator(mpg: Option<f64>, price: Option<f64>) -> MileageCalculator {
        MileageCalculator::new(Arc::new(FixedEconomy(mpg)), Arc::new(FixedPrice(price)))
    }

    #[tokio::test]
    async fn test_negative_mpg_is_no_data() {
        let result = calculator(Some(-3.0), Some(3.5))
            .evaluate(
                &VehicleQuery::new("Ford", "Fusion", "2016"),
                &RegionFuelGrade::new("NUS", "EPMR"),
                None,
            )
            .await;
        assert!(matches!(result, Err(CalculationError::FuelEconomyUnavailable(_))));
    }

    #[tokio::test]
    async fn test_evaluate_with_mpg_rejects_zero() {
        let result = calculator(None, Some(3.5))
            .evaluate_with_mpg(
                0.0,
                &VehicleQuery::new("Ford", "Fusion", "2016"),
                &RegionFuelGrade::new("NUS", "EPMR"),
                None,
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_report_fields() {
        let report = calculator(Some(25.0), Some(3.5))
            .evaluate(
                &VehicleQuery::new("Ford", "Fusion", "2016"),
                &RegionFuelGrade::new("SCA", "EPMP"),
                None,
            )
            .await
            .unwrap();
        assert_eq!(report.region, "SCA");
        assert_eq!(report.fuel_type, "EPMP");
        assert!((report.cost_per_100_miles - 14.0).abs() < 1e-9);
        assert!(report.maintenance.is_none());
    }
}
