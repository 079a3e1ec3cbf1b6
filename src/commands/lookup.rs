use crate::cli::{AreaArgs, MpgArgs};
use crate::config::AppConfig;
use crate::models::{FuelGrade, Region};
use crate::providers::{CarApiProvider, EiaProvider};
use anyhow::{anyhow, Context, Result};
use colored::Colorize;

/// Execute the mpg command
pub async fn mpg(args: MpgArgs, config: AppConfig) -> Result<()> {
    let query = args.vehicle.query();
    query.validate().map_err(|e| anyhow!(e))?;

    let provider = CarApiProvider::new(config.providers.fuel_economy.clone())?;
    let result = provider
        .fetch_trims(&query)
        .await
        .with_context(|| format!("No fuel economy data for {}", query))?;

    if args.trims {
        println!("{} {}", "Trims for".bold(), query);
        for (submodel, mpg) in result.mileage_by_submodel() {
            let mpg = mpg
                .map(|v| format!("{:.1} mpg", v))
                .unwrap_or_else(|| "n/a".dimmed().to_string());
            println!("  {:<24} {}", submodel, mpg);
        }
        return Ok(());
    }

    let mpg = result
        .mileage(query.requested_submodel())
        .with_context(|| format!("Selected trim for {} has no usable mileage", query))?;

    println!("{}: {:.1} mpg", query, mpg);
    Ok(())
}

/// Execute the price command
pub async fn price(args: AreaArgs, config: AppConfig) -> Result<()> {
    let area = args.resolve(&config);

    let provider = EiaProvider::new(config.providers.fuel_price.clone())?;
    let price = provider.fetch_latest_price(&area).await.with_context(|| {
        format!(
            "No fuel price for region {} and grade {}",
            area.region_code(),
            area.fuel_grade_code()
        )
    })?;

    println!(
        "{} ({}): ${:.3}/gal",
        Region::from_code(area.region_code()).display_name(),
        FuelGrade::display_name_for(area.fuel_grade_code()),
        price
    );
    Ok(())
}

/// Execute the regions command
pub fn regions() -> Result<()> {
    println!("{}", "Regions:".bold());
    for region in Region::ALL {
        println!("  {:<6} {}", region.code().cyan(), region.display_name());
    }
    println!();

    println!("{}", "Fuel grades:".bold());
    for grade in FuelGrade::ALL {
        println!("  {:<6} {}", grade.code().cyan(), grade.display_name());
    }
    Ok(())
}
