//! Command implementations for the blogctl CLI

pub mod client;
pub mod comments;
pub mod db;
pub mod posts;
pub mod serve;

// Re-export dispatcher functions for flat access from main.rs
pub use comments::run_comments;
pub use db::run_db;
pub use posts::run_posts;
pub use serve::run_serve;
