//! Demo data
//!
//! Users are not created through the API; this is where they come from.
//! Seeding wipes all blog tables first, so it is only meant for
//! development databases.

use sqlx::PgPool;
use uuid::Uuid;

use super::DbError;

/// Users created by the seed, in order. The first is the default login.
pub const SEED_USERS: &[&str] = &["Kyle", "Sally"];

const SEED_POSTS: &[(&str, &str)] = &[
    (
        "Post 1",
        "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed ut \
         perspiciatis unde omnis iste natus error sit voluptatem accusantium \
         doloremque laudantium, totam rem aperiam.",
    ),
    (
        "Post 2",
        "Nemo enim ipsam voluptatem quia voluptas sit aspernatur aut odit aut \
         fugit, sed quia consequuntur magni dolores eos qui ratione voluptatem \
         sequi nesciunt.",
    ),
];

/// What a seed run created
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub users: Vec<(String, Uuid)>,
    pub posts: Vec<(String, Uuid)>,
}

/// Replace all blog data with the demo users and posts.
pub async fn run(pool: &PgPool) -> Result<SeedReport, DbError> {
    let mut tx = pool.begin().await?;

    // Children first; cascades would cover it but the order keeps it explicit
    for table in ["likes", "comments", "posts", "users"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut *tx)
            .await?;
    }

    let mut users = Vec::with_capacity(SEED_USERS.len());
    for name in SEED_USERS {
        let (id,): (Uuid,) = sqlx::query_as("INSERT INTO users (name) VALUES ($1) RETURNING id")
            .bind(*name)
            .fetch_one(&mut *tx)
            .await?;
        users.push((name.to_string(), id));
    }

    let mut posts = Vec::with_capacity(SEED_POSTS.len());
    for (title, body) in SEED_POSTS {
        let (id,): (Uuid,) =
            sqlx::query_as("INSERT INTO posts (title, body) VALUES ($1, $2) RETURNING id")
                .bind(*title)
                .bind(*body)
                .fetch_one(&mut *tx)
                .await?;
        posts.push((title.to_string(), id));
    }

    tx.commit().await?;

    tracing::info!(users = users.len(), posts = posts.len(), "Seeded database");
    Ok(SeedReport { users, posts })
}
