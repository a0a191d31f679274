//! Axum server setup
//!
//! Server skeleton with:
//! - CORS for the web client (credentials allowed so the session cookie flows)
//! - Session pinning middleware
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::{middleware, Router};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use super::session::{pin_session, SessionUser};
use crate::db::repos::{DbError, UserRepo};

/// Name of the user requests act as unless configured otherwise
pub const DEFAULT_LOGIN: &str = "Kyle";

/// Web client origins allowed by default
pub const DEFAULT_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// Origins allowed to call the API with credentials. `*` behaves
    /// like `cors_permissive`.
    pub allowed_origins: Vec<String>,

    /// Mirror any origin (default: false)
    ///
    /// WARNING: lets any site act as the session user.
    /// Only use for development.
    pub cors_permissive: bool,

    /// Name of the user every request is pinned to
    pub login_as: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            cors_permissive: false,
            login_as: DEFAULT_LOGIN.to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// User every request acts as
    pub session: SessionUser,
}

impl AppState {
    pub fn new(pool: PgPool, session: SessionUser) -> Self {
        Self { pool, session }
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::posts::router())
        .merge(routes::comments::router())
        .merge(routes::likes::router())
        .layer(middleware::from_fn_with_state(state.clone(), pin_session))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let wildcard = config.allowed_origins.iter().any(|o| o.trim() == "*");
    if config.cors_permissive || wildcard {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        return CorsLayer::very_permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "CORS: Ignoring invalid origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Look up the id of the user the server should act as.
pub async fn resolve_session_user(pool: &PgPool, name: &str) -> Result<SessionUser, ServerError> {
    UserRepo::new(pool)
        .find_by_name(name)
        .await?
        .map(|user| SessionUser(user.id))
        .ok_or_else(|| ServerError::UnknownUser {
            name: name.to_string(),
        })
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// migrations::run(&pool).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let session = resolve_session_user(&pool, &config.login_as).await?;
    tracing::info!(user = %config.login_as, id = %session.id(), "Requests pinned to session user");

    let app = build_router(AppState::new(pool, session), &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("no user named '{name}' (run `blogctl db seed` to create the demo users)")]
    UnknownUser { name: String },
}
