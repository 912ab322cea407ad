//! Coaching Backend
//!
//! REST backend for managing teams, team members and feedback, with SQLite persistence.

mod api;
mod config;
mod db;
mod errors;
mod membership;
mod models;
mod resolver;
mod service;
mod validation;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{AllowedOrigins, Config, LogFormat};
use db::Repository;
use service::CoachingService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CoachingService<Repository>>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with((config.log_format == LogFormat::Text).then(|| tracing_subscriber::fmt::layer()))
        .with((config.log_format == LogFormat::Json).then(|| tracing_subscriber::fmt::layer().json()))
        .init();

    tracing::info!("Starting Coaching Backend v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path, config.db_max_connections).await?;
    let service = Arc::new(CoachingService::new(Repository::new(pool)));

    // Create application state
    let state = AppState {
        service,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    // API routes
    let api_routes = Router::new()
        // Members
        .route("/members", get(api::list_members).post(api::create_member))
        .route(
            "/members/{id}",
            get(api::get_member)
                .put(api::update_member)
                .delete(api::delete_member),
        )
        // Teams
        .route("/teams", get(api::list_teams).post(api::create_team))
        .route("/teams/assign", post(api::assign_member))
        .route(
            "/teams/members/{member_id}",
            delete(api::remove_member_from_team),
        )
        .route(
            "/teams/{id}",
            get(api::get_team)
                .put(api::update_team)
                .delete(api::delete_team),
        )
        // Feedback
        .route(
            "/feedbacks",
            get(api::list_feedback).post(api::create_feedback),
        )
        .route(
            "/feedbacks/{id}",
            get(api::get_feedback)
                .put(api::update_feedback)
                .delete(api::delete_feedback),
        );

    // Health check lives outside the versioned API
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(security_headers("x-content-type-options", "nosniff"))
                .layer(security_headers("x-frame-options", "DENY"))
                .layer(security_headers("x-xss-protection", "1; mode=block"))
                .layer(security_headers(
                    "referrer-policy",
                    "strict-origin-when-cross-origin",
                )),
        )
        .with_state(state)
}

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .max_age(std::time::Duration::from_secs(86400));

    match origins {
        // Credentials cannot be combined with a wildcard origin.
        AllowedOrigins::Any => cors.allow_origin(Any),
        AllowedOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                        None
                    }
                })
                .collect();
            cors.allow_origin(AllowOrigin::list(values))
                .allow_credentials(true)
        }
    }
}

fn security_headers(
    name: &'static str,
    value: &'static str,
) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, label) = match state.service.store().ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        }
    };

    (
        status,
        Json(serde_json::json!({
            "status": label,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
