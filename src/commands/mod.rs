//! Command implementations for the CLI
//!
//! - serve: start the web API
//! - calculate: per-mile cost for one vehicle
//! - lookup: mileage, fuel price and reference codes
//! - account: registration and saved vehicles

pub mod account;
pub mod calculate;
pub mod lookup;
pub mod serve;

use crate::config::{AppConfig, Settings};
use crate::models::User;
use crate::providers::{CarApiProvider, EiaProvider};
use crate::services::MileageCalculator;
use crate::storage::Store;
use anyhow::{anyhow, bail, Context, Result};
use std::sync::Arc;

/// Calculator over the configured CarAPI and EIA providers
pub fn build_calculator(settings: &Settings, config: &AppConfig) -> Result<MileageCalculator> {
    let fuel_economy = CarApiProvider::new(config.providers.fuel_economy.clone())?;
    let fuel_price = EiaProvider::new(config.providers.fuel_price.clone())?;

    Ok(MileageCalculator::new(Arc::new(fuel_economy), Arc::new(fuel_price))
        .with_timeout(settings.lookup_timeout()))
}

/// Open the configured database
pub async fn open_store(config: &AppConfig) -> Result<Store> {
    let url = config
        .database
        .url
        .as_deref()
        .context("No database configured; set database.url or MILECOUNT__DATABASE__URL")?;
    Store::open(url).await
}

/// Verified account for the given credentials
pub async fn authenticate(store: &Store, email: &str, password: &str) -> Result<User> {
    match store.users.verify(email, password).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => bail!("Invalid email or password"),
        Err(e) => Err(anyhow!(e).context("Failed to verify credentials")),
    }
}
