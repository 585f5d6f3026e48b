//! Geo-RMS API Server
//!
//! Order management backend for a multi-branch restaurant: geofenced
//! delivery-coverage resolution, order lifecycle, and dashboard analytics.
//! Uses hexagonal (ports & adapters) architecture for clean separation of
//! concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    PostgresBranchRepository, PostgresCustomerAddressRepository, PostgresOrderRepository,
};
use app::{AnalyticsService, CoverageService, OrderService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub coverage_service: Arc<CoverageService<PostgresBranchRepository>>,
    pub order_service: Arc<
        OrderService<
            PostgresOrderRepository,
            PostgresBranchRepository,
            PostgresCustomerAddressRepository,
        >,
    >,
    pub analytics_service:
        Arc<AnalyticsService<PostgresOrderRepository, PostgresBranchRepository>>,
    pub branch_repo: Arc<PostgresBranchRepository>,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,geo_rms_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Geo-RMS API...");

    // Load configuration
    let config = Config::from_env();

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connected");

    // Create adapters
    let branch_repo = Arc::new(PostgresBranchRepository::new(db.clone()));
    let order_repo = Arc::new(PostgresOrderRepository::new(db.clone()));
    let address_repo = Arc::new(PostgresCustomerAddressRepository::new(db.clone()));

    // Create application services
    let coverage_service = Arc::new(CoverageService::new(branch_repo.clone()));
    let order_service = Arc::new(OrderService::new(
        order_repo.clone(),
        branch_repo.clone(),
        address_repo.clone(),
    ));
    let analytics_service = Arc::new(AnalyticsService::new(
        order_repo.clone(),
        branch_repo.clone(),
    ));

    // Create app state
    let state = AppState {
        coverage_service,
        order_service,
        analytics_service,
        branch_repo: branch_repo.clone(),
        config: config.clone(),
    };

    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    // (SmartIpKeyExtractor requires X-Forwarded-For headers from reverse proxy)
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .expect("Failed to build governor config"),
    );

    // Bot-facing routes: X-API-Key gated and rate limited
    let bot_routes = Router::new()
        .route("/api/check-coverage", post(handlers::coverage::check_coverage))
        .route("/api/orders", post(handlers::orders::create_order))
        .route("/api/orders/:id", get(handlers::orders::get_order))
        .route(
            "/api/orders/:id/modification",
            post(handlers::orders::request_modification),
        )
        .layer(middleware::from_fn_with_state(
            config.clone(),
            auth::verify_api_key,
        ))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Build router
    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Console endpoints
        .route("/api/orders", get(handlers::orders::list_orders))
        .route(
            "/api/orders/:id/status",
            patch(handlers::orders::update_order_status),
        )
        .route(
            "/api/orders/:id/modification/resolve",
            post(handlers::orders::resolve_modification),
        )
        .route(
            "/api/orders/:id/alert",
            post(handlers::orders::send_customer_alert),
        )
        .route(
            "/api/branches",
            get(handlers::branches::list_branches).post(handlers::branches::create_branch),
        )
        .route(
            "/api/branches/:id",
            get(handlers::branches::get_branch).put(handlers::branches::update_branch),
        )
        .route("/api/analytics", get(handlers::analytics::get_analytics))
        // Merge bot routes
        .merge(bot_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
