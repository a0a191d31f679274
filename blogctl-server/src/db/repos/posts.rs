//! Post repository
//!
//! Plain reads; posts are written only by the seed step.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// Post record from database
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Post row for list display
#[derive(Debug, Clone, FromRow)]
pub struct PostTitle {
    pub id: Uuid,
    pub title: String,
}

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a post.
    pub async fn create(&self, title: &str, body: &str) -> Result<Post, DbError> {
        let post = sqlx::query_as(
            r#"
            INSERT INTO posts (title, body)
            VALUES ($1, $2)
            RETURNING id, title, body, created_at
            "#,
        )
        .bind(title)
        .bind(body)
        .fetch_one(self.pool)
        .await?;

        Ok(post)
    }

    /// List every post's id and title, oldest first.
    pub async fn list(&self) -> Result<Vec<PostTitle>, DbError> {
        let posts = sqlx::query_as(
            r#"
            SELECT id, title
            FROM posts
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Get a single post by ID.
    pub async fn get(&self, id: Uuid) -> Result<Post, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, title, body, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "post",
            id: id.to_string(),
        })
    }
}
