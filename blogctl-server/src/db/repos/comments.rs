//! Comment repository
//!
//! Handles comment CRUD scoped to a post:
//! - listing joins authors and aggregates likes in a single query
//! - creation checks the post and parent inside one transaction
//! - update/delete address a comment through its post id

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;
use crate::models::CommentMessage;

/// Comment record from database
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub message: String,
    pub parent_id: Option<Uuid>,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment with author and like aggregates, as seen by one viewer
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithLikes {
    pub id: Uuid,
    pub message: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_name: String,
    pub like_count: i64,
    pub liked_by_me: bool,
}

/// Comment repository
pub struct CommentRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CommentRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add a comment (or a reply when `parent_id` is set) to a post.
    ///
    /// The post must exist, and the parent, when given, must belong to the
    /// same post. The returned row has no likes yet.
    pub async fn create(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        message: CommentMessage,
        parent_id: Option<Uuid>,
    ) -> Result<CommentWithLikes, DbError> {
        let mut tx = self.pool.begin().await?;

        let post_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                .bind(post_id)
                .fetch_one(&mut *tx)
                .await?;

        if !post_exists.0 {
            return Err(DbError::NotFound {
                resource: "post",
                id: post_id.to_string(),
            });
        }

        if let Some(parent_id) = parent_id {
            let parent_exists: (bool,) = sqlx::query_as(
                "SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1 AND post_id = $2)",
            )
            .bind(parent_id)
            .bind(post_id)
            .fetch_one(&mut *tx)
            .await?;

            if !parent_exists.0 {
                return Err(DbError::NotFound {
                    resource: "comment",
                    id: parent_id.to_string(),
                });
            }
        }

        // Single statement: insert, then join the author for the response
        let comment: CommentWithLikes = sqlx::query_as(
            r#"
            WITH inserted AS (
                INSERT INTO comments (message, user_id, post_id, parent_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, message, parent_id, created_at, user_id
            )
            SELECT
                i.id,
                i.message,
                i.parent_id,
                i.created_at,
                u.id AS user_id,
                u.name AS user_name,
                0::BIGINT AS like_count,
                FALSE AS liked_by_me
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(message.as_str())
        .bind(user_id)
        .bind(post_id)
        .bind(parent_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(comment)
    }

    /// List a post's comments, newest first, annotated for `viewer`.
    ///
    /// `like_count` counts every like row of the comment; `liked_by_me` is
    /// true when one of them belongs to `viewer`.
    pub async fn list_for_post(
        &self,
        post_id: Uuid,
        viewer: Uuid,
    ) -> Result<Vec<CommentWithLikes>, DbError> {
        let comments = sqlx::query_as(
            r#"
            SELECT
                c.id,
                c.message,
                c.parent_id,
                c.created_at,
                u.id AS user_id,
                u.name AS user_name,
                COUNT(l.user_id) AS like_count,
                COALESCE(BOOL_OR(l.user_id = $2), FALSE) AS liked_by_me
            FROM comments c
            JOIN users u ON u.id = c.user_id
            LEFT JOIN likes l ON l.comment_id = c.id
            WHERE c.post_id = $1
            GROUP BY c.id, u.id
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(post_id)
        .bind(viewer)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }

    /// Get a single comment under a post.
    pub async fn get(&self, post_id: Uuid, comment_id: Uuid) -> Result<Comment, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, message, parent_id, user_id, post_id, created_at, updated_at
            FROM comments
            WHERE id = $1 AND post_id = $2
            "#,
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(comment_id))
    }

    /// Id of the user who wrote a comment.
    pub async fn owner(&self, post_id: Uuid, comment_id: Uuid) -> Result<Uuid, DbError> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT user_id FROM comments WHERE id = $1 AND post_id = $2")
                .bind(comment_id)
                .bind(post_id)
                .fetch_optional(self.pool)
                .await?;

        row.map(|(user_id,)| user_id)
            .ok_or_else(|| not_found(comment_id))
    }

    /// Replace the message of a comment written by `user_id`, returning
    /// the stored message.
    ///
    /// The author is part of the `WHERE` clause, so the row is only written
    /// while `user_id` still owns it.
    pub async fn update_message(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        user_id: Uuid,
        message: CommentMessage,
    ) -> Result<String, DbError> {
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            UPDATE comments
            SET message = $1, updated_at = NOW()
            WHERE id = $2 AND post_id = $3 AND user_id = $4
            RETURNING message
            "#,
        )
        .bind(message.as_str())
        .bind(comment_id)
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|(message,)| message)
            .ok_or_else(|| not_found(comment_id))
    }

    /// Delete one comment written by `user_id`, returning its id.
    ///
    /// Its likes go with it; replies stay and lose their parent link.
    pub async fn delete(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<Uuid, DbError> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            "DELETE FROM comments WHERE id = $1 AND post_id = $2 AND user_id = $3 RETURNING id",
        )
        .bind(comment_id)
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|(id,)| id).ok_or_else(|| not_found(comment_id))
    }
}

fn not_found(comment_id: Uuid) -> DbError {
    DbError::NotFound {
        resource: "comment",
        id: comment_id.to_string(),
    }
}
