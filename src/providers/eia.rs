//! EIA provider
//!
//! Reads the latest weekly retail price for a duoarea/product facet from the
//! EIA v2 petroleum endpoint.

use super::{build_client, FuelPriceLookup, ProviderError};
use crate::config::FuelPriceProviderConfig;
use crate::models::{EiaResponse, RegionFuelGrade};
use crate::utils::logging::{redact_query_param, truncate_content};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, error, warn};

/// EIA gasoline price provider
pub struct EiaProvider {
    client: Client,
    config: FuelPriceProviderConfig,
}

impl EiaProvider {
    pub fn new(config: FuelPriceProviderConfig) -> Result<Self> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    /// Query parameters: weekly series for one facet, newest first, capped page
    fn query_params(&self, area: &RegionFuelGrade) -> Vec<(&'static str, String)> {
        vec![
            ("frequency", "weekly".to_string()),
            ("data[0]", "value".to_string()),
            ("facets[duoarea][0]", area.region_code().trim().to_string()),
            ("facets[product][0]", area.fuel_grade_code().trim().to_string()),
            ("sort[0][column]", "period".to_string()),
            ("sort[0][direction]", "desc".to_string()),
            ("length", self.config.page_size.to_string()),
            ("api_key", self.config.api_key.clone()),
        ]
    }

    /// Fetch the latest price, classifying every failure
    pub async fn fetch_latest_price(&self, area: &RegionFuelGrade) -> Result<f64, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::MissingApiKey("EIA"));
        }

        let request = self
            .client
            .get(&self.config.base_url)
            .query(&self.query_params(area))
            .header(ACCEPT, "application/json")
            .build()?;

        debug!(
            "Calling EIA API: {}",
            redact_query_param(request.url().as_str(), "api_key")
        );

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_content(&body, 200),
            });
        }

        let parsed: EiaResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        let latest = parsed.latest().ok_or(ProviderError::Empty)?;
        let price = parsed.latest_price().ok_or(ProviderError::MissingValue)?;

        debug!(
            "Latest {} price in {} for period {}: ${:.3}",
            area.fuel_grade_code(),
            area.region_code(),
            latest.period.as_deref().unwrap_or("unknown"),
            price
        );
        Ok(price)
    }
}

#[async_trait]
impl FuelPriceLookup for EiaProvider {
    fn name(&self) -> &str {
        "eia"
    }

    async fn latest_price(&self, area: &RegionFuelGrade) -> Option<f64> {
        match self.fetch_latest_price(area).await {
            Ok(price) => Some(price),
            Err(e @ ProviderError::MissingApiKey(_)) => {
                error!("Cannot fetch fuel price: {} (set EIA_API_KEY)", e);
                None
            }
            Err(e) => {
                warn!(
                    "No fuel price for {}/{}: {}",
                    area.region_code(),
                    area.fuel_grade_code(),
                    e
                );
                None
            }
        }
    }
}
