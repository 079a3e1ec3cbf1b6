//! EIA v2 petroleum price schema
//!
//! Only the fields the price lookup reads are modelled; everything else in
//! the payload is ignored.

use super::{lenient_f64, usable};
use serde::{Deserialize, Serialize};

/// Top-level EIA response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EiaResponse {
    #[serde(default)]
    pub response: Option<EiaResponseBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EiaResponseBody {
    #[serde(default)]
    pub total: Option<serde_json::Value>,

    #[serde(default)]
    pub data: Vec<PriceObservation>,
}

/// One weekly observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    #[serde(default)]
    pub period: Option<String>,

    #[serde(default)]
    pub duoarea: Option<String>,

    #[serde(default)]
    pub product: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,

    #[serde(default)]
    pub units: Option<String>,
}

impl EiaResponse {
    /// Observations as returned (descending by period when sorted server-side)
    pub fn observations(&self) -> &[PriceObservation] {
        self.response
            .as_ref()
            .map(|body| body.data.as_slice())
            .unwrap_or(&[])
    }

    /// The first observation, i.e. the latest one
    pub fn latest(&self) -> Option<&PriceObservation> {
        self.observations().first()
    }

    /// Price of the latest observation, when it carries a usable value
    pub fn latest_price(&self) -> Option<f64> {
        self.latest()?.value.filter(|v| usable(*v))
    }
}
