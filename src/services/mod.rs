//! Service layer module
//!
//! Contains the cost arithmetic and the calculator that orchestrates lookups

pub mod calculator;
pub mod cost_model;

pub use calculator::{CalculationError, MileageCalculator, DEFAULT_LOOKUP_TIMEOUT};
