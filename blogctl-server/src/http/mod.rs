//! HTTP server layer
//!
//! Axum server with:
//! - CORS (local web client origins by default)
//! - Pinned session cookie
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod session;

pub use error::ApiError;
pub use server::{
    build_router, resolve_session_user, run_server, AppState, ServerConfig, ServerError,
    DEFAULT_LOGIN, DEFAULT_ORIGINS,
};
pub use session::SessionUser;
