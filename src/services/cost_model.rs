//! Per-mile cost arithmetic
//!
//! Pure functions; every degenerate input resolves to 0.0.

/// Fuel cost per mile. 0.0 when mpg is zero.
pub fn fuel_cost_per_mile(price_per_gallon: f64, mpg: f64) -> f64 {
    if mpg == 0.0 {
        return 0.0;
    }
    price_per_gallon / mpg
}

/// Flat maintenance cost spread over its interval. 0.0 when the interval is not positive.
pub fn maintenance_cost_per_mile(flat_cost: f64, interval_miles: i64) -> f64 {
    if interval_miles <= 0 {
        return 0.0;
    }
    flat_cost / interval_miles as f64
}

pub fn total_cost_per_mile(fuel: f64, maintenance: f64) -> f64 {
    fuel + maintenance
}

/// Cost accrued over a distance. 0.0 for non-positive distances.
pub fn cost_for_miles(cost_per_mile: f64, miles: i64) -> f64 {
    if miles <= 0 {
        return 0.0;
    }
    cost_per_mile * miles as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_cost_per_mile() {
        assert!((fuel_cost_per_mile(3.50, 25.0) - 0.14).abs() < 1e-12);
        assert_eq!(fuel_cost_per_mile(3.50, 0.0), 0.0);
        assert_eq!(fuel_cost_per_mile(0.0, 30.0), 0.0);
    }

    #[test]
    fn test_maintenance_cost_per_mile() {
        assert!((maintenance_cost_per_mile(40.0, 5000) - 0.008).abs() < 1e-12);
        assert_eq!(maintenance_cost_per_mile(40.0, 0), 0.0);
        assert_eq!(maintenance_cost_per_mile(40.0, -1), 0.0);
    }

    #[test]
    fn test_cost_for_miles() {
        assert!((cost_for_miles(0.01, 100) - 1.0).abs() < 1e-12);
        assert_eq!(cost_for_miles(0.01, 0), 0.0);
        assert_eq!(cost_for_miles(0.01, -5), 0.0);
    }
}
