//! CarAPI mileage schema and trim selection
//!
//! `GET /api/mileages/v2?year=&make=&model=` returns one record per trim.
//! Record order matters: the first record is the default choice.

use super::{lenient_f64, lenient_string, same_name, usable};
use serde::{Deserialize, Serialize};

/// One trim/submodel record.
///
/// Field names follow the wire. The provider sends `epa_city_mpg`; some
/// payloads carry a plain `city_mpg` as well (or instead), so both are kept.
/// A malformed field degrades to `None` rather than rejecting the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrimRecord {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub submodel: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub trim: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub epa_city_mpg: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub city_mpg: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub combined_mpg: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub epa_highway_mpg: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub highway_mpg: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub fuel_tank_capacity: Option<f64>,
}

impl TrimRecord {
    /// City rating as sent, `epa_city_mpg` first
    pub fn city(&self) -> Option<f64> {
        self.epa_city_mpg.or(self.city_mpg)
    }

    /// Highway rating as sent, `epa_highway_mpg` first
    pub fn highway(&self) -> Option<f64> {
        self.epa_highway_mpg.or(self.highway_mpg)
    }

    /// Mileage used for costing.
    ///
    /// Combined mpg stands in only when the record has no city rating at all.
    /// A city rating of 0 or below means the record has no usable mileage.
    pub fn mileage(&self) -> Option<f64> {
        match self.city() {
            Some(city) => Some(city).filter(|v| usable(*v)),
            None => self.combined_mpg.filter(|v| usable(*v)),
        }
    }

    fn matches_submodel(&self, wanted: &str) -> bool {
        self.submodel
            .as_deref()
            .map(|s| same_name(s, wanted))
            .unwrap_or(false)
    }
}

/// Response envelope: `{"data": [...], "collection": {...}}` or a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MileagesResponse {
    Wrapped { data: Vec<TrimRecord> },
    Bare(Vec<TrimRecord>),
}

impl MileagesResponse {
    pub fn into_records(self) -> Vec<TrimRecord> {
        match self {
            MileagesResponse::Wrapped { data } => data,
            MileagesResponse::Bare(records) => records,
        }
    }
}

impl From<MileagesResponse> for FuelEconomyResult {
    fn from(response: MileagesResponse) -> Self {
        FuelEconomyResult::new(response.into_records())
    }
}

/// Trim records for one (make, model, year), in provider order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuelEconomyResult {
    records: Vec<TrimRecord>,
}

impl FuelEconomyResult {
    pub fn new(records: Vec<TrimRecord>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[TrimRecord] {
        &self.records
    }

    /// Pick the record for a requested submodel.
    ///
    /// The first case-insensitive submodel match wins. With no request, or no
    /// match, the first record is used. `None` only when there are no records.
    pub fn select(&self, submodel: Option<&str>) -> Option<&TrimRecord> {
        let first = self.records.first()?;

        let wanted = submodel.map(str::trim).filter(|s| !s.is_empty());
        if let Some(wanted) = wanted {
            if let Some(hit) = self.records.iter().find(|r| r.matches_submodel(wanted)) {
                return Some(hit);
            }
        }

        Some(first)
    }

    /// Mileage of the selected record
    pub fn mileage(&self, submodel: Option<&str>) -> Option<f64> {
        self.select(submodel)?.mileage()
    }

    /// Submodel name to mileage, first occurrence of each name, provider order
    pub fn mileage_by_submodel(&self) -> Vec<(String, Option<f64>)> {
        let mut seen: Vec<(String, Option<f64>)> = Vec::new();
        for record in &self.records {
            let Some(name) = record.submodel.as_deref().map(str::trim) else {
                continue;
            };
            if seen.iter().any(|(n, _)| same_name(n, name)) {
                continue;
            }
            seen.push((name.to_string(), record.mileage()));
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trim(submodel: &str, city: Option<f64>, combined: Option<f64>) -> TrimRecord {
        TrimRecord {
            submodel: Some(submodel.to_string()),
            epa_city_mpg: city,
            combined_mpg: combined,
            ..Default::default()
        }
    }

    fn se_and_hybrid() -> FuelEconomyResult {
        FuelEconomyResult::new(vec![
            trim("SE", Some(22.0), None),
            trim("Hybrid", Some(40.0), None),
        ])
    }

    #[test]
    fn test_select_matching_submodel_any_case() {
        let result = se_and_hybrid();
        assert_eq!(result.mileage(Some("hybrid")), Some(40.0));
        assert_eq!(result.mileage(Some("HYBRID")), Some(40.0));
    }

    #[test]
    fn test_select_defaults_to_first() {
        let result = se_and_hybrid();
        assert_eq!(result.mileage(None), Some(22.0));
        assert_eq!(result.mileage(Some("")), Some(22.0));
        assert_eq!(result.mileage(Some("XYZ")), Some(22.0));
    }

    #[test]
    fn test_first_match_wins_on_duplicates() {
        let result = FuelEconomyResult::new(vec![
            trim("LX", Some(30.0), None),
            trim("Sport", Some(25.0), None),
            trim("sport", Some(24.0), None),
        ]);
        assert_eq!(result.mileage(Some("SPORT")), Some(25.0));
    }

    #[test]
    fn test_combined_fallback() {
        let record = trim("SE", None, Some(28.0));
        assert_eq!(record.mileage(), Some(28.0));

        let record = trim("SE", None, None);
        assert_eq!(record.mileage(), None);

        let record = trim("SE", None, Some(0.0));
        assert_eq!(record.mileage(), None);
    }

    #[test]
    fn test_unusable_city_rating_is_not_replaced() {
        let record = trim("SE", Some(0.0), Some(28.0));
        assert_eq!(record.mileage(), None);

        let record = trim("SE", Some(-3.0), Some(28.0));
        assert_eq!(record.mileage(), None);

        let result = FuelEconomyResult::new(vec![
            trim("SE", Some(0.0), Some(25.0)),
            trim("Hybrid", Some(40.0), None),
        ]);
        assert_eq!(result.mileage(None), None);
        assert_eq!(result.mileage(Some("Hybrid")), Some(40.0));
    }

    #[test]
    fn test_both_city_keys_in_one_record() {
        let response: MileagesResponse = serde_json::from_str(
            r#"{"data": [
                {"submodel": "SE", "epa_city_mpg": 22, "city_mpg": 21, "combined_mpg": 25,
                 "epa_highway_mpg": 30, "highway_mpg": 29}
            ]}"#,
        )
        .unwrap();
        let result = FuelEconomyResult::from(response);
        let record = &result.records()[0];
        assert_eq!(record.city(), Some(22.0));
        assert_eq!(record.highway(), Some(30.0));
        assert_eq!(result.mileage(None), Some(22.0));
    }

    #[test]
    fn test_odd_label_types_keep_the_list() {
        let response: MileagesResponse = serde_json::from_str(
            r#"{"data": [
                {"submodel": 2500, "trim": ["x"], "epa_city_mpg": 15},
                {"submodel": "HD", "trim": 3, "epa_city_mpg": 14}
            ]}"#,
        )
        .unwrap();
        let result = FuelEconomyResult::from(response);
        assert_eq!(result.len(), 2);
        assert_eq!(result.records()[0].submodel.as_deref(), Some("2500"));
        assert_eq!(result.records()[0].trim, None);
        assert_eq!(result.records()[1].trim.as_deref(), Some("3"));
        assert_eq!(result.mileage(Some("2500")), Some(15.0));
        assert_eq!(result.mileage(Some("hd")), Some(14.0));
    }

    #[test]
    fn test_selection_and_listing_agree_on_case() {
        let result = FuelEconomyResult::new(vec![
            trim("Éco", Some(50.0), None),
            trim("éco", Some(49.0), None),
        ]);
        assert_eq!(result.mileage(Some("ÉCO")), Some(50.0));
        assert_eq!(
            result.mileage_by_submodel(),
            vec![("Éco".to_string(), Some(50.0))]
        );
    }

    #[test]
    fn test_empty_result() {
        let result = FuelEconomyResult::default();
        assert!(result.select(Some("SE")).is_none());
        assert_eq!(result.mileage(None), None);
    }

    #[test]
    fn test_parse_wrapped_and_bare() {
        let wrapped: MileagesResponse = serde_json::from_str(
            r#"{"collection": {"count": 1}, "data": [{"submodel": "SE", "epa_city_mpg": 22, "combined_mpg": null}]}"#,
        )
        .unwrap();
        let result = FuelEconomyResult::from(wrapped);
        assert_eq!(result.len(), 1);
        assert_eq!(result.mileage(None), Some(22.0));

        let bare: MileagesResponse =
            serde_json::from_str(r#"[{"submodel": "SE", "city_mpg": "31", "combined_mpg": 33}]"#).unwrap();
        let result = FuelEconomyResult::from(bare);
        assert_eq!(result.mileage(None), Some(31.0));
    }

    #[test]
    fn test_mileage_by_submodel() {
        let result = FuelEconomyResult::new(vec![
            trim("SE", Some(22.0), None),
            trim("Hybrid", None, Some(44.0)),
            trim("se", Some(21.0), None),
        ]);
        let map = result.mileage_by_submodel();
        assert_eq!(
            map,
            vec![("SE".to_string(), Some(22.0)), ("Hybrid".to_string(), Some(44.0))]
        );
    }
}
