// Evento API server
// Decision: One process, one pooled store handle injected into the service at startup
// Decision: CORS open to any origin unless CORS_ALLOWED_ORIGINS narrows it
// Decision: `--in-memory` (or EVENTO_IN_MEMORY=true) serves from memory for local runs without MySQL

mod config;
mod error;
mod events;
mod services;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::{extract::State, routing::get, Json, Router};
use evento_core::{
    CreateEventPayload, Event, EventIdPayload, EventStore, InMemoryEventStore, ListedEvent,
    UpdateEventPayload,
};
use evento_storage::{create_db_event_store, Database};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{OpenApi, ToSchema};

use crate::config::Config;
use crate::error::{ErrorResponse, MessageResponse};

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    version: String,
}

/// State for health endpoint
#[derive(Clone)]
struct HealthState {
    service: Arc<services::EventService>,
}

/// GET / - Liveness marker
async fn root() -> &'static str {
    tracing::debug!("Liveness check");
    "start"
}

/// GET /health - Liveness plus store reachability
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and store are up", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = if state.service.is_healthy().await {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        events::create_event,
        events::list_events,
        events::get_data,
        events::remove_all_events,
        events::remove_event,
        events::update_event,
    ),
    components(
        schemas(
            Event, ListedEvent,
            CreateEventPayload, UpdateEventPayload, EventIdPayload,
            MessageResponse, ErrorResponse, HealthResponse,
        )
    ),
    tags(
        (name = "events", description = "Event management endpoints"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Evento API",
        version = "0.1.0",
        description = "CRUD API over calendar events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

/// Assemble the full application router around a store
fn build_app(store: Arc<dyn EventStore>, config: &Config) -> Router {
    let events_state = events::AppState::new(store, config.display_timezone);
    let health_state = HealthState {
        service: events_state.service.clone(),
    };

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health).with_state(health_state))
        .route("/api-doc/openapi.json", get(openapi_json))
        .merge(events::routes(events_state));

    app.layer(cors_layer(config)).layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = if config.cors_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(config.cors_origins.clone())
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn connect_store(config: &Config) -> Result<Arc<dyn EventStore>> {
    if config.in_memory {
        tracing::warn!("Using in-memory event store; data is lost on exit");
        return Ok(Arc::new(InMemoryEventStore::new()));
    }

    let options = config.database.connect_options()?;
    let db = Database::connect(
        options,
        config.database.max_connections,
        config.database.acquire_timeout,
    )
    .await
    .context("Failed to connect to database")?;
    tracing::info!(
        host = %config.database.host,
        database = %config.database.name,
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    Ok(Arc::new(create_db_event_store(db)))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Optional .env for local development
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evento_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("evento-api starting...");

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if std::env::args().any(|arg| arg == "--in-memory") {
        config.in_memory = true;
    }
    tracing::info!(
        timezone = %config.display_timezone,
        database = ?config.database,
        "Configuration loaded"
    );

    if config.cors_origins.is_empty() {
        tracing::info!("CORS open to any origin");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    let store = connect_store(&config).await?;
    let app = build_app(store, &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
