use super::{authenticate, open_store};
use crate::cli::CredentialArgs;
use crate::config::AppConfig;
use crate::handlers::accounts::Credentials;
use anyhow::{anyhow, Result};
use colored::Colorize;

/// Execute `account register`
pub async fn register(args: CredentialArgs, config: AppConfig) -> Result<()> {
    let credentials = Credentials {
        email: args.email,
        password: args.password,
    };
    credentials.validate().map_err(|e| anyhow!(e))?;

    let store = open_store(&config).await?;
    let user = store
        .users
        .create_user(&credentials.email, &credentials.password)
        .await?;

    println!("{} {} (id {})", "Registered".green(), user.email, user.id);
    Ok(())
}

/// Execute `account vehicles`
pub async fn vehicles(args: CredentialArgs, config: AppConfig) -> Result<()> {
    let store = open_store(&config).await?;
    let user = authenticate(&store, &args.email, &args.password).await?;

    let vehicles = store.vehicles.list_by_owner(user.id).await?;
    if vehicles.is_empty() {
        println!("No saved vehicles for {}", user.email);
        return Ok(());
    }

    println!("{} {}", "Saved vehicles for".bold(), user.email);
    for vehicle in vehicles {
        let mpg = vehicle
            .known_mpg()
            .map(|v| format!("{:.1} mpg", v))
            .unwrap_or_else(|| "mpg unknown".dimmed().to_string());
        println!("  {:>4}  {:<32} {}", vehicle.id, vehicle.query().to_string(), mpg);
    }
    Ok(())
}
