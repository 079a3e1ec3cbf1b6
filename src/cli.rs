use crate::config::AppConfig;
use crate::models::{MaintenancePolicy, RegionFuelGrade, VehicleQuery};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "milecount",
    version,
    about = "Per-mile driving cost from fuel economy and regional fuel prices"
)]
pub struct Cli {
    /// Configuration file path (defaults to ~/.config/milecount/milecount.json, then ./milecount.json)
    #[arg(short, long, global = true, env = "MILECOUNT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the web API (default)
    Serve,

    /// Calculate the per-mile cost of driving a vehicle
    Calculate(CalculateArgs),

    /// Look up a vehicle's mileage
    Mpg(MpgArgs),

    /// Look up the latest fuel price
    Price(AreaArgs),

    /// List known region and fuel grade codes
    Regions,

    /// Manage accounts and saved vehicles
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AccountCommands {
    /// Create an account
    Register(CredentialArgs),

    /// List the vehicles saved under an account
    Vehicles(CredentialArgs),
}

#[derive(Args, Debug, Clone)]
pub struct VehicleArgs {
    /// Vehicle make (e.g. Toyota)
    #[arg(long)]
    pub make: String,

    /// Vehicle model (e.g. Camry)
    #[arg(long)]
    pub model: String,

    /// Model year
    #[arg(long)]
    pub year: String,

    /// Submodel or trim to prefer (e.g. Hybrid)
    #[arg(long)]
    pub submodel: Option<String>,
}

impl VehicleArgs {
    pub fn query(&self) -> VehicleQuery {
        let mut query = VehicleQuery::new(self.make.trim(), self.model.trim(), self.year.trim());
        query.submodel = self.submodel.clone();
        query
    }
}

#[derive(Args, Debug, Clone)]
pub struct AreaArgs {
    /// EIA duoarea code (see `milecount regions`)
    #[arg(long)]
    pub region: Option<String>,

    /// EIA product code: EPMR, EPMM, EPMP or EPD2D
    #[arg(long = "fuel-grade")]
    pub fuel_grade: Option<String>,
}

impl AreaArgs {
    /// Region and grade, falling back to the configured defaults
    pub fn resolve(&self, config: &AppConfig) -> RegionFuelGrade {
        let region = self
            .region
            .clone()
            .unwrap_or_else(|| config.defaults.region.clone());
        let grade = self
            .fuel_grade
            .clone()
            .unwrap_or_else(|| config.defaults.fuel_grade.clone());
        RegionFuelGrade::new(region.trim().to_uppercase(), grade.trim().to_uppercase())
    }
}

#[derive(Args, Debug, Clone)]
pub struct MpgArgs {
    #[command(flatten)]
    pub vehicle: VehicleArgs,

    /// List every trim instead of the selected mileage
    #[arg(long)]
    pub trims: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub vehicle: VehicleArgs,

    #[command(flatten)]
    pub area: AreaArgs,

    /// Add amortized oil change cost
    #[arg(long)]
    pub maintenance: bool,

    /// Cost of one oil change (implies --maintenance)
    #[arg(long)]
    pub oil_change_cost: Option<f64>,

    /// Miles between oil changes (implies --maintenance)
    #[arg(long)]
    pub miles_per_oil_change: Option<i64>,

    /// Account email; a saved matching vehicle reuses its stored mileage
    #[arg(long, requires = "password")]
    pub email: Option<String>,

    /// Account password
    #[arg(long, env = "MILECOUNT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Save the vehicle to the account when it is not saved yet
    #[arg(long, requires = "email")]
    pub save: bool,
}

impl CalculateArgs {
    /// Maintenance policy when requested; overrides fall back to `defaults`
    pub fn maintenance_policy(
        &self,
        defaults: MaintenancePolicy,
    ) -> Result<Option<MaintenancePolicy>, String> {
        if !self.maintenance && self.oil_change_cost.is_none() && self.miles_per_oil_change.is_none()
        {
            return Ok(None);
        }

        let policy = MaintenancePolicy::new(
            self.oil_change_cost.unwrap_or(defaults.flat_cost()),
            self.miles_per_oil_change.unwrap_or(defaults.interval_miles()),
        );
        policy.validate()?;
        Ok(Some(policy))
    }
}

#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "MILECOUNT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
