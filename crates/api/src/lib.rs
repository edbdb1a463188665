//! # Bakeshop API
//!
//! The API crate provides the web server for the Bakeshop storefront. It
//! serves slot availability, the catalog, order placement and tracking,
//! customer profiles and loyalty progress.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Error mapping and the maintenance gate
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.
//! All slot computations use the bakery's local wall-clock time.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling and maintenance mode
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, StatusCode},
};
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use eyre::Result;
use serde_json::json;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::maintenance::{MAINTENANCE_PIN_HEADER, MaintenanceConfig, maintenance_gate};

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(ApiState {
///     db_pool,
///     timezone: chrono_tz::Europe::London,
///     maintenance: MaintenanceConfig::default(),
/// });
/// let app = build_router(state);
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,

    /// Timezone the bakery trades in
    pub timezone: Tz,

    pub maintenance: MaintenanceConfig,
}

impl ApiState {
    /// The current wall-clock time at the bakery.
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.timezone).naive_local()
    }
}

/// Builds the application router
///
/// Everything under `/api` sits behind the maintenance gate; `/health` and
/// `/version` are always reachable.
pub fn build_router(state: Arc<ApiState>) -> Router {
    let api = Router::new()
        // Slot availability endpoints
        .merge(routes::slots::routes())
        // Catalog endpoints
        .merge(routes::catalog::routes())
        // Order placement and tracking endpoints
        .merge(routes::orders::routes())
        // Per-customer profile, order history and loyalty endpoints
        .merge(routes::customers::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            maintenance_gate,
        ));

    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        .merge(api)
        .layer(TraceLayer::new_for_http())
        // Attach shared state to all routes
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static(MAINTENANCE_PIN_HEADER),
        ])
        .allow_origin(allowed)
        .allow_credentials(true)
}

async fn handle_timeout(err: BoxError) -> (StatusCode, Json<serde_json::Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        error!("Unhandled internal error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
    }
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port, timezone and maintenance settings
/// * `db_pool` - PostgreSQL connection pool for database operations
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let db_pool = bakeshop_db::create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if config.maintenance.enabled {
        warn!(
            pin_configured = config.maintenance.pin_hash.is_some(),
            "Maintenance mode is on; /api routes will answer 503"
        );
    }

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        timezone: config.timezone,
        maintenance: config.maintenance.clone(),
    });

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(timezone = %config.timezone, "Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
