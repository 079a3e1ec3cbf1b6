//! Trim selection, payload parsing and cost calculation benchmarks

use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use milecount::models::*;
use milecount::providers::{FuelEconomyLookup, FuelPriceLookup};
use milecount::services::cost_model;
use milecount::services::MileageCalculator;
use serde_json::json;
use std::sync::Arc;

/// Build `count` trims; the last one is the "Hybrid" submodel
fn create_trims(count: usize) -> Vec<TrimRecord> {
    (0..count)
        .map(|i| TrimRecord {
            submodel: Some(if i + 1 == count {
                "Hybrid".to_string()
            } else {
                format!("Trim {}", i)
            }),
            trim: Some(format!("Trim {} FWD", i)),
            epa_city_mpg: if i % 3 == 0 { None } else { Some(20.0 + i as f64 % 15.0) },
            combined_mpg: Some(24.0 + i as f64 % 10.0),
            ..Default::default()
        })
        .collect()
}

fn create_mileages_payload(count: usize) -> String {
    let data: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "submodel": format!("Trim {}", i),
                "trim": format!("Trim {} FWD", i),
                "epa_city_mpg": if i % 2 == 0 { json!(22 + i % 10) } else { json!(format!("{}", 22 + i % 10)) },
                "combined_mpg": 25,
                "epa_highway_mpg": 31,
                "fuel_tank_capacity": "14.5"
            })
        })
        .collect();
    json!({"collection": {"count": count}, "data": data}).to_string()
}

struct FixedEconomy(FuelEconomyResult);

#[async_trait]
impl FuelEconomyLookup for FixedEconomy {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn trims(&self, _query: &VehicleQuery) -> Option<FuelEconomyResult> {
        Some(self.0.clone())
    }
}

struct FixedPrice(f64);

#[async_trait]
impl FuelPriceLookup for FixedPrice {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn latest_price(&self, _area: &RegionFuelGrade) -> Option<f64> {
        Some(self.0)
    }
}

/// Benchmark submodel selection against result size
fn bench_trim_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("trim_selection");

    for count in [1, 10, 100, 1000].iter() {
        let result = FuelEconomyResult::new(create_trims(*count));

        group.bench_with_input(BenchmarkId::new("default", count), &result, |b, result| {
            b.iter(|| black_box(result.mileage(black_box(None))))
        });

        group.bench_with_input(BenchmarkId::new("last_match", count), &result, |b, result| {
            b.iter(|| black_box(result.mileage(black_box(Some("hybrid")))))
        });

        group.bench_with_input(BenchmarkId::new("no_match", count), &result, |b, result| {
            b.iter(|| black_box(result.mileage(black_box(Some("XYZ")))))
        });

        group.bench_with_input(BenchmarkId::new("by_submodel", count), &result, |b, result| {
            b.iter(|| black_box(result.mileage_by_submodel()))
        });
    }

    group.finish();
}

/// Benchmark provider payload parsing
fn bench_payload_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_parsing");

    for count in [1, 10, 100].iter() {
        let payload = create_mileages_payload(*count);
        group.bench_with_input(BenchmarkId::new("mileages", count), &payload, |b, payload| {
            b.iter(|| {
                let response: MileagesResponse = serde_json::from_str(black_box(payload)).unwrap();
                black_box(FuelEconomyResult::from(response))
            })
        });
    }

    let eia = json!({
        "response": {
            "total": "1",
            "data": [{"period": "2024-06-03", "duoarea": "NUS", "product": "EPMR", "value": "3.481", "units": "$/GAL"}]
        }
    })
    .to_string();
    group.bench_function("eia_latest_price", |b| {
        b.iter(|| {
            let response: EiaResponse = serde_json::from_str(black_box(&eia)).unwrap();
            black_box(response.latest_price())
        })
    });

    group.finish();
}

/// Benchmark the arithmetic on its own
fn bench_cost_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_model");
    let policy = MaintenancePolicy::new(40.0, 5000);

    group.bench_function("fuel_only", |b| {
        b.iter(|| black_box(cost_model::fuel_cost_per_mile(black_box(3.5), black_box(25.0))))
    });

    group.bench_function("with_maintenance", |b| {
        b.iter(|| {
            let breakdown = CostBreakdown::new(
                cost_model::fuel_cost_per_mile(black_box(3.5), black_box(25.0)),
                black_box(&policy).cost_per_mile(),
            );
            black_box(breakdown.cost_for_miles(100))
        })
    });

    group.finish();
}

/// Benchmark a full evaluation with in-process lookups
fn bench_calculator(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let calculator = MileageCalculator::new(
        Arc::new(FixedEconomy(FuelEconomyResult::new(create_trims(20)))),
        Arc::new(FixedPrice(3.5)),
    );
    let query = VehicleQuery::new("Ford", "Fusion", "2016").with_submodel("Hybrid");
    let area = RegionFuelGrade::new("NUS", "EPMR");
    let policy = MaintenancePolicy::default();

    c.bench_function("calculator_evaluate", |b| {
        b.iter(|| {
            rt.block_on(async {
                black_box(
                    calculator
                        .evaluate(black_box(&query), black_box(&area), Some(&policy))
                        .await,
                )
            })
        })
    });
}

criterion_group!(
    benches,
    bench_trim_selection,
    bench_payload_parsing,
    bench_cost_model,
    bench_calculator
);

criterion_main!(benches);
