//! Repository implementations for database access
//!
//! Each repository borrows the pool and exposes typed query methods:
//! - reads aggregate with JOINs (no N+1)
//! - writes that need a precondition check run in a transaction
//! - missing rows surface as `DbError::NotFound`

pub mod comments;
pub mod likes;
pub mod posts;
pub mod users;

pub use comments::{Comment, CommentRepo, CommentWithLikes};
pub use likes::{LikeRepo, LikeToggle};
pub use posts::{Post, PostRepo, PostTitle};
pub use users::{User, UserRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
