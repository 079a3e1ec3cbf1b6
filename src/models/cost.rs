//! Cost results and maintenance policy

use super::{RegionFuelGrade, VehicleQuery};
use crate::services::cost_model;
use serde::{Deserialize, Serialize};

/// Flat maintenance cost amortized over a mileage interval (oil changes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaintenancePolicy {
    flat_cost: f64,
    interval_miles: i64,
}

impl MaintenancePolicy {
    pub const DEFAULT_OIL_CHANGE_COST: f64 = 50.00;
    pub const DEFAULT_MILES_PER_OIL_CHANGE: i64 = 5000;

    pub fn new(flat_cost: f64, interval_miles: i64) -> Self {
        Self {
            flat_cost,
            interval_miles,
        }
    }

    pub fn flat_cost(&self) -> f64 {
        self.flat_cost
    }

    pub fn interval_miles(&self) -> i64 {
        self.interval_miles
    }

    /// Oil change cost must be a finite, non-negative amount
    pub fn validate(&self) -> Result<(), String> {
        if !self.flat_cost.is_finite() || self.flat_cost < 0.0 {
            return Err(format!(
                "oil change cost must be a non-negative number, got {}",
                self.flat_cost
            ));
        }
        Ok(())
    }

    /// 0.0 when the interval is not positive
    pub fn cost_per_mile(&self) -> f64 {
        cost_model::maintenance_cost_per_mile(self.flat_cost, self.interval_miles)
    }

    /// Maintenance cost accrued over `miles`
    pub fn cost_for_miles(&self, miles: i64) -> f64 {
        cost_model::cost_for_miles(self.cost_per_mile(), miles)
    }
}

impl Default for MaintenancePolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_OIL_CHANGE_COST, Self::DEFAULT_MILES_PER_OIL_CHANGE)
    }
}

/// Per-mile cost split. All zeros means no usable data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    fuel_cost_per_mile: f64,
    maintenance_cost_per_mile: f64,
    total_cost_per_mile: f64,
}

impl CostBreakdown {
    pub fn new(fuel_cost_per_mile: f64, maintenance_cost_per_mile: f64) -> Self {
        Self {
            fuel_cost_per_mile,
            maintenance_cost_per_mile,
            total_cost_per_mile: cost_model::total_cost_per_mile(
                fuel_cost_per_mile,
                maintenance_cost_per_mile,
            ),
        }
    }

    pub fn fuel_only(fuel_cost_per_mile: f64) -> Self {
        Self::new(fuel_cost_per_mile, 0.0)
    }

    pub fn fuel_cost_per_mile(&self) -> f64 {
        self.fuel_cost_per_mile
    }

    pub fn maintenance_cost_per_mile(&self) -> f64 {
        self.maintenance_cost_per_mile
    }

    pub fn total_cost_per_mile(&self) -> f64 {
        self.total_cost_per_mile
    }

    pub fn is_zero(&self) -> bool {
        self.total_cost_per_mile == 0.0
    }

    /// Total cost for a distance
    pub fn cost_for_miles(&self, miles: i64) -> f64 {
        cost_model::cost_for_miles(self.total_cost_per_mile, miles)
    }
}

/// Outcome of a successful calculation with the inputs that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub vehicle: VehicleQuery,
    pub region: String,
    pub fuel_type: String,
    /// Mileage used (city, or combined as fallback)
    pub city_mpg: f64,
    /// Latest price per gallon
    pub gas_price: f64,
    /// Total cost per mile
    pub cost_per_mile: f64,
    pub cost_per_100_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<MaintenancePolicy>,
    pub breakdown: CostBreakdown,
}

impl CostReport {
    pub fn new(
        vehicle: VehicleQuery,
        area: &RegionFuelGrade,
        mpg: f64,
        price_per_gallon: f64,
        maintenance: Option<MaintenancePolicy>,
        breakdown: CostBreakdown,
    ) -> Self {
        Self {
            vehicle,
            region: area.region_code().to_string(),
            fuel_type: area.fuel_grade_code().to_string(),
            city_mpg: mpg,
            gas_price: price_per_gallon,
            cost_per_mile: breakdown.total_cost_per_mile(),
            cost_per_100_miles: breakdown.cost_for_miles(100),
            maintenance,
            breakdown,
        }
    }
}
