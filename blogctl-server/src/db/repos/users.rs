//! User repository
//!
//! Users are created by the seed step and never mutated by the API.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user.
    pub async fn create(&self, name: &str) -> Result<User, DbError> {
        let user = sqlx::query_as(
            r#"
            INSERT INTO users (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// First user with the given name (oldest wins when names repeat).
    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM users
            WHERE name = $1
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a single user by ID.
    pub async fn get(&self, id: Uuid) -> Result<User, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }
}
