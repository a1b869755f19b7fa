mod config;
mod session;

use anyhow::Context;
use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, header},
    routing::{get, post},
};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;
use ws_api_types::{HealthResponse, UpdateSessionResponse};

use crate::config::ServiceConfig;
use crate::session::SessionStore;

pub(crate) struct AppState {
    pub(crate) config: ServiceConfig,
    pub(crate) sessions: SessionStore,
}

impl AppState {
    pub(crate) fn new(config: ServiceConfig) -> Self {
        let sessions = SessionStore::new(config.session_ttl_ms);
        Self { config, sessions }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ServiceConfig::from_env()?;
    let addr = config.listen_addr;
    let app = build_router(Arc::new(AppState::new(config)))?;

    info!("session-service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

pub(crate) fn build_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let static_dir = state.config.static_dir.clone();
    let cors_origin = state.config.cors_origin.clone();

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/update_session", post(session::update_session))
        .route("/session", get(session::get_session))
        .route("/logout", post(session::logout))
        .with_state(state);

    if let Some(origin) = cors_origin {
        let origin = HeaderValue::from_str(&origin)
            .context("SESSION_CORS_ORIGIN is not a valid origin")?;
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_credentials(true)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    if let Some(dir) = static_dir {
        info!("serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    Ok(app)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", err);
    }
    info!("shutting down");
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "session-service".to_owned(),
        status: "ok".to_owned(),
    })
}

pub(crate) type SessionRejection = (StatusCode, Json<UpdateSessionResponse>);

pub(crate) fn bad_request(message: &str) -> SessionRejection {
    (StatusCode::BAD_REQUEST, Json(UpdateSessionResponse::failed(message)))
}

pub(crate) fn internal_error(err: impl std::fmt::Display) -> SessionRejection {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(UpdateSessionResponse::failed(err.to_string())),
    )
}

pub(crate) fn epoch_ms() -> anyhow::Result<u128> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis())
}
