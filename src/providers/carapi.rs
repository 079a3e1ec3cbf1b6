//! CarAPI provider
//!
//! Fetches trim-level mileage records from `/api/mileages/v2`.

use super::{build_client, FuelEconomyLookup, ProviderError};
use crate::config::FuelEconomyProviderConfig;
use crate::models::{FuelEconomyResult, MileagesResponse, VehicleQuery};
use crate::utils::logging::truncate_content;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, warn};

/// CarAPI mileage provider
pub struct CarApiProvider {
    client: Client,
    config: FuelEconomyProviderConfig,
}

impl CarApiProvider {
    pub fn new(config: FuelEconomyProviderConfig) -> Result<Self> {
        let client = build_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    /// Build the request URL
    fn build_url(&self) -> String {
        let base_url = self.config.base_url.trim_end_matches('/');
        format!("{}/api/mileages/v2", base_url)
    }

    /// Fetch and parse the trim records for a vehicle
    pub async fn fetch_trims(&self, query: &VehicleQuery) -> Result<FuelEconomyResult, ProviderError> {
        debug!("Requesting mileages for {}", query);

        let mut request = self
            .client
            .get(self.build_url())
            .query(&[
                ("year", query.year.trim()),
                ("make", query.make.trim()),
                ("model", query.model.trim()),
            ])
            .header(ACCEPT, "application/json");

        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_content(&body, 200),
            });
        }

        let parsed: MileagesResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))?;

        let result = FuelEconomyResult::from(parsed);
        if result.is_empty() {
            return Err(ProviderError::Empty);
        }

        debug!("Received {} trim records for {}", result.len(), query);
        Ok(result)
    }
}

#[async_trait]
impl FuelEconomyLookup for CarApiProvider {
    fn name(&self) -> &str {
        "carapi"
    }

    async fn trims(&self, query: &VehicleQuery) -> Option<FuelEconomyResult> {
        match self.fetch_trims(query).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("No fuel economy data for {}: {}", query, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let provider = CarApiProvider::new(FuelEconomyProviderConfig {
            base_url: "https://carapi.example.com/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(provider.build_url(), "https://carapi.example.com/api/mileages/v2");
    }
}
