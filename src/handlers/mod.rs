//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod accounts;
pub mod calculate;
pub mod health;
pub mod lookup;

use crate::config::{AppConfig, Settings};
use crate::middleware::{error_logging_middleware, request_logging_middleware};
use crate::providers::{CarApiProvider, EiaProvider, FuelEconomyLookup, FuelPriceLookup};
use crate::services::MileageCalculator;
use crate::storage::Store;
use crate::utils::error::{AppError, AppResult};
use anyhow::Result;
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub config: AppConfig,
    pub fuel_economy: Arc<dyn FuelEconomyLookup>,
    pub fuel_price: Arc<dyn FuelPriceLookup>,
    pub calculator: MileageCalculator,
    /// Present only when a database URL is configured
    pub store: Option<Store>,
}

impl AppState {
    /// Build the state from configuration: CarAPI, EIA and the optional database
    pub async fn from_config(settings: Settings, config: AppConfig) -> Result<Self> {
        let fuel_economy: Arc<dyn FuelEconomyLookup> =
            Arc::new(CarApiProvider::new(config.providers.fuel_economy.clone())?);
        let fuel_price: Arc<dyn FuelPriceLookup> =
            Arc::new(EiaProvider::new(config.providers.fuel_price.clone())?);

        if !config.has_fuel_price_key() {
            warn!("EIA API key not configured; price lookups will return no data");
        }

        let store = match &config.database.url {
            Some(url) => Some(Store::open(url).await?),
            None => {
                info!("No database configured; account endpoints disabled");
                None
            }
        };

        Ok(Self::with_lookups(settings, config, fuel_economy, fuel_price, store))
    }

    /// Build the state around given lookups
    pub fn with_lookups(
        settings: Settings,
        config: AppConfig,
        fuel_economy: Arc<dyn FuelEconomyLookup>,
        fuel_price: Arc<dyn FuelPriceLookup>,
        store: Option<Store>,
    ) -> Self {
        let calculator = MileageCalculator::new(fuel_economy.clone(), fuel_price.clone())
            .with_timeout(settings.lookup_timeout());

        Self {
            settings,
            config,
            fuel_economy,
            fuel_price,
            calculator,
            store,
        }
    }

    /// The store, or 503 when persistence is disabled
    pub fn store(&self) -> AppResult<&Store> {
        self.store.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable("No database configured".to_string())
        })
    }

    /// Run a single lookup under the request timeout
    pub async fn bounded<T, F>(&self, lookup: F) -> AppResult<T>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout(self.settings.lookup_timeout(), lookup)
            .await
            .map_err(|_| AppError::Timeout)
    }
}

/// Create application router
pub async fn create_router(settings: Settings, config: AppConfig) -> Result<Router> {
    let state = AppState::from_config(settings, config).await?;
    Ok(router_with_state(Arc::new(state)))
}

/// Routes and middleware over an existing state
pub fn router_with_state(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/mpg", get(lookup::get_mpg))
        .route("/mpg/trims", get(lookup::get_trims))
        .route("/price", get(lookup::get_price))
        .route("/regions", get(lookup::list_regions))
        .route("/fuel-grades", get(lookup::list_fuel_grades))
        .route("/calculate", get(calculate::calculate))
        .route("/users", post(accounts::register))
        .route("/users/login", post(accounts::login))
        .route(
            "/users/:id/vehicles",
            get(accounts::list_vehicles).post(accounts::save_vehicle),
        )
        .with_state(state.clone());

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(middleware::from_fn(error_logging_middleware));

    let router = router.layer(middleware_stack);

    if state.settings.security.cors_enabled {
        router.layer(cors_layer(&state.settings.security.allowed_origins))
    } else {
        router
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
