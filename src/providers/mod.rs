//! Provider module
//!
//! Lookup traits the calculator depends on, plus the CarAPI and EIA
//! implementations. Providers classify their failures as `ProviderError`,
//! log them, and hand the calculator `None`.

pub mod carapi;
pub mod eia;

use crate::models::{FuelEconomyResult, RegionFuelGrade, VehicleQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub use carapi::CarApiProvider;
pub use eia::EiaProvider;

/// User agent sent to upstream APIs
pub const USER_AGENT: &str = concat!("milecount/", env!("CARGO_PKG_VERSION"));

/// Vehicle specs lookup
#[async_trait]
pub trait FuelEconomyLookup: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// All trim records for (make, model, year); `None` when nothing usable came back
    async fn trims(&self, query: &VehicleQuery) -> Option<FuelEconomyResult>;

    /// Mileage for the query, applying submodel selection
    async fn lookup_mpg(&self, query: &VehicleQuery) -> Option<f64> {
        let trims = self.trims(query).await?;
        let mpg = trims.mileage(query.requested_submodel());
        if mpg.is_none() {
            debug!("{}: selected trim for {} has no usable mpg", self.name(), query);
        }
        mpg
    }
}

/// Regional fuel price lookup
#[async_trait]
pub trait FuelPriceLookup: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Latest price per gallon for the region and grade
    async fn latest_price(&self, area: &RegionFuelGrade) -> Option<f64>;
}

/// Why an upstream lookup produced no data
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0} API key not configured")]
    MissingApiKey(&'static str),

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("no data in response")]
    Empty,

    #[error("latest observation has no usable value")]
    MissingValue,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout
        } else if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else {
            ProviderError::Transport(e)
        }
    }
}

/// Build an HTTP client with the given timeout
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}
