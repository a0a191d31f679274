//! Database layer - connection pool, schema and repositories
//!
//! - Connection pool (max 5 connections by default)
//! - Detail reads aggregate like counts with JOINs, no per-comment queries
//! - Multi-statement writes run in one transaction

pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
