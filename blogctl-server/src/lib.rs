//! blogctl-server: HTTP API for posts, threaded comments and likes
//!
//! - `db`: Postgres pool, schema, seed data and repositories
//! - `http`: axum router, session pinning and JSON errors
//! - `models`: validated input types

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError, SessionUser};
