//! Lookup request types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a fuel economy lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleQuery {
    pub make: String,
    pub model: String,
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submodel: Option<String>,
}

impl VehicleQuery {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year: year.into(),
            submodel: None,
        }
    }

    pub fn with_submodel(mut self, submodel: impl Into<String>) -> Self {
        self.submodel = Some(submodel.into());
        self
    }

    /// The submodel to match against, if one was actually requested.
    ///
    /// Blank strings count as "not requested".
    pub fn requested_submodel(&self) -> Option<&str> {
        self.submodel
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Check the query is well formed before spending a network call on it
    pub fn validate(&self) -> Result<(), String> {
        if self.make.trim().is_empty() {
            return Err("make cannot be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }

        let year = self.year.trim();
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("year must be a 4-digit number, got '{}'", self.year));
        }

        Ok(())
    }
}

impl fmt::Display for VehicleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.make, self.model)?;
        if let Some(submodel) = self.requested_submodel() {
            write!(f, " {}", submodel)?;
        }
        Ok(())
    }
}

/// Provider-specific region and fuel grade codes (e.g. "NUS" / "EPMR").
///
/// Opaque to the calculator; only the price provider interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFuelGrade {
    region_code: String,
    fuel_grade_code: String,
}

impl RegionFuelGrade {
    pub fn new(region_code: impl Into<String>, fuel_grade_code: impl Into<String>) -> Self {
        Self {
            region_code: region_code.into(),
            fuel_grade_code: fuel_grade_code.into(),
        }
    }

    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    pub fn fuel_grade_code(&self) -> &str {
        &self.fuel_grade_code
    }
}
