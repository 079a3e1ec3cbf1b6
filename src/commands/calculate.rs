use super::{authenticate, build_calculator, open_store};
use crate::cli::CalculateArgs;
use crate::config::{AppConfig, Settings};
use crate::models::{CostReport, FuelGrade, NewVehicle, Region};
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use tracing::{debug, info};

/// Execute the calculate command
pub async fn execute(args: CalculateArgs, settings: Settings, config: AppConfig) -> Result<()> {
    let vehicle = args.vehicle.query();
    vehicle.validate().map_err(|e| anyhow!(e))?;

    let area = args.area.resolve(&config);
    let maintenance = args
        .maintenance_policy(config.maintenance_policy())
        .map_err(|e| anyhow!(e))?;
    let calculator = build_calculator(&settings, &config)?;

    let report = match (&args.email, &args.password) {
        (Some(email), Some(password)) => {
            let store = open_store(&config).await?;
            let user = authenticate(&store, email, password).await?;

            let saved = store
                .vehicles
                .find_matching(user.id, &vehicle)
                .await
                .context("Failed to read saved vehicles")?;

            let known_mpg = saved.as_ref().and_then(|v| v.known_mpg());
            let report = match known_mpg {
                Some(mpg) => {
                    info!("Using saved mileage {:.1} for {}", mpg, vehicle);
                    calculator
                        .evaluate_with_mpg(mpg, &vehicle, &area, maintenance.as_ref())
                        .await
                }
                None => calculator.evaluate(&vehicle, &area, maintenance.as_ref()).await,
            }?;

            if args.save && saved.is_none() {
                let new_vehicle = NewVehicle {
                    vehicle: vehicle.clone(),
                    city_mpg: Some(report.city_mpg),
                };
                store
                    .vehicles
                    .save_vehicle(user.id, &new_vehicle)
                    .await
                    .context("Failed to save vehicle")?;
                println!("{} {}", "Saved".green(), vehicle);
            } else if args.save {
                debug!("{} already saved for user {}", vehicle, user.id);
            }

            report
        }
        _ => calculator.evaluate(&vehicle, &area, maintenance.as_ref()).await?,
    };

    println!("{}", "Results".bold());
    print!("{}", render_report(&report));
    Ok(())
}

/// Plain-text results block
pub fn render_report(report: &CostReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("  Vehicle:        {}\n", report.vehicle));
    out.push_str(&format!("  MPG:            {:.1}\n", report.city_mpg));
    out.push_str(&format!(
        "  Gas price:      ${:.3}/gal ({})\n",
        report.gas_price,
        FuelGrade::display_name_for(&report.fuel_type)
    ));
    out.push_str(&format!(
        "  Region:         {}\n",
        Region::from_code(&report.region).display_name()
    ));
    if let Some(policy) = &report.maintenance {
        out.push_str(&format!(
            "  Maintenance:    ${:.2} every {} mi (${:.4}/mi)\n",
            policy.flat_cost(),
            policy.interval_miles(),
            report.breakdown.maintenance_cost_per_mile()
        ));
    }
    out.push_str(&format!("  Cost per mile:  ${:.4}\n", report.cost_per_mile));
    out.push_str(&format!("  Cost / 100 mi:  ${:.2}\n", report.cost_per_100_miles));
    out
}
