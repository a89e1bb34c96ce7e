//! # Sales Tracker Backend
//!
//! Monthly sales tracker service: users enter daily current-year and
//! prior-year revenue for the active month and get a Monday-first calendar
//! with weekly subtotals plus month-to-date metrics.
//!
//! ```text
//! IO Layer (REST API, session middleware)
//!     ↓
//! Domain Layer (calendar grid, metrics, dashboard, sessions)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    middleware, Router,
};
use chrono::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::email_service::{sender_from_config, MagicLinkSender};
use crate::domain::{CalendarService, DashboardService, MetricsService, SessionService};
use crate::io::rest::{auth_apis, dashboard_apis, logging_apis};
use crate::storage::{DbConnection, SalesRepository, SalesStorage, SessionRepository, SessionStorage};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub calendar_service: CalendarService,
    pub dashboard_service: DashboardService,
    pub session_service: SessionService,
}

impl AppState {
    /// Wire services on top of the given storage and link delivery
    pub fn new(
        config: AppConfig,
        sales_storage: Arc<dyn SalesStorage>,
        session_storage: Arc<dyn SessionStorage>,
        sender: Arc<dyn MagicLinkSender>,
    ) -> Self {
        info!("Setting up domain model");
        let calendar_service = CalendarService::new();
        let dashboard_service = DashboardService::new(
            sales_storage,
            calendar_service.clone(),
            MetricsService::new(config.sales.daily_target_floor),
        );
        let session_service = SessionService::new(
            session_storage,
            sender,
            config.email.link_base_url.clone(),
            Duration::minutes(config.auth.login_token_ttl_minutes),
            Duration::hours(config.auth.session_ttl_hours),
        );

        Self {
            config: Arc::new(config),
            calendar_service,
            dashboard_service,
            session_service,
        }
    }
}

/// Open the configured database and wire up all services
pub async fn initialize_backend(config: AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database.url, config.database.max_connections).await?;
    build_state(db, config)
}

/// Wire services on top of an already opened database
pub fn build_state(db: DbConnection, config: AppConfig) -> Result<AppState> {
    let sender = sender_from_config(&config.email)?;
    Ok(AppState::new(
        config,
        Arc::new(SalesRepository::new(db.clone())),
        Arc::new(SessionRepository::new(db)),
        sender,
    ))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Result<Router> {
    let origin = app_state
        .config
        .server
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("invalid CORS origin {:?}", app_state.config.server.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let protected = Router::new()
        .merge(auth_apis::protected_router())
        .nest("/dashboard", dashboard_apis::router())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            io::auth::require_session,
        ));

    let api_routes = Router::new()
        .merge(auth_apis::public_router())
        .nest("/logs", logging_apis::router())
        .merge(protected);

    let mut router = Router::new().nest("/api", api_routes);
    if let Some(dir) = &app_state.config.server.static_dir {
        info!("Serving static files from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    Ok(router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
