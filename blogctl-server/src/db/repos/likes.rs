//! Like repository
//!
//! A like is a bare (user, comment) row; toggling creates it when absent
//! and deletes it when present.

use sqlx::PgPool;
use uuid::Uuid;

use super::DbError;

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    Added,
    Removed,
}

impl LikeToggle {
    pub fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Like repository
pub struct LikeRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> LikeRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Flip `user_id`'s like on a comment of `post_id`.
    ///
    /// Lookup and write share one transaction. The insert tolerates a
    /// concurrent duplicate instead of failing on the primary key.
    pub async fn toggle(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeToggle, DbError> {
        let mut tx = self.pool.begin().await?;

        let comment_exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1 AND post_id = $2)",
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

        if !comment_exists.0 {
            return Err(DbError::NotFound {
                resource: "comment",
                id: comment_id.to_string(),
            });
        }

        let liked: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND comment_id = $2)",
        )
        .bind(user_id)
        .bind(comment_id)
        .fetch_one(&mut *tx)
        .await?;

        let outcome = if liked.0 {
            sqlx::query("DELETE FROM likes WHERE user_id = $1 AND comment_id = $2")
                .bind(user_id)
                .bind(comment_id)
                .execute(&mut *tx)
                .await?;
            LikeToggle::Removed
        } else {
            sqlx::query(
                r#"
                INSERT INTO likes (user_id, comment_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(user_id)
            .bind(comment_id)
            .execute(&mut *tx)
            .await?;
            LikeToggle::Added
        };

        tx.commit().await?;
        Ok(outcome)
    }

    /// Number of likes on a comment.
    pub async fn count_for_comment(&self, comment_id: Uuid) -> Result<i64, DbError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM likes WHERE comment_id = $1")
            .bind(comment_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_outcome() {
        assert!(LikeToggle::Added.is_added());
        assert!(!LikeToggle::Removed.is_added());
    }
}
