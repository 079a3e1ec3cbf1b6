//! SQLite persistence for accounts and saved vehicles
//!
//! Tables are created by the migrations in `./migrations` on connect.

pub mod password;
pub mod users;
pub mod vehicles;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub use users::UserRepository;
pub use vehicles::VehicleRepository;

/// Database handle
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and migrate.
    ///
    /// `database_url` is e.g. `sqlite:milecount.db` or `sqlite::memory:`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid database URL: {}", database_url))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        // Each in-memory connection is its own database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;

        info!("Database ready at {}", database_url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Repositories over one pool
#[derive(Debug, Clone)]
pub struct Store {
    pub users: UserRepository,
    pub vehicles: VehicleRepository,
}

impl Store {
    pub fn new(db: &Database) -> Self {
        Self {
            users: UserRepository::new(db.pool().clone()),
            vehicles: VehicleRepository::new(db.pool().clone()),
        }
    }

    /// Connect to `database_url` and build the repositories
    pub async fn open(database_url: &str) -> Result<Self> {
        let db = Database::connect(database_url).await?;
        Ok(Self::new(&db))
    }
}
