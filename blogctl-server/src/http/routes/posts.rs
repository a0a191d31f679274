//! Post endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use blogctl_core::{CommentAuthor, CommentView, PostDetail, PostSummary};

use crate::db::repos::{CommentRepo, CommentWithLikes, PostRepo, PostTitle};
use crate::http::error::ApiError;
use crate::http::extractors::ValidUuid;
use crate::http::server::AppState;
use crate::http::session::SessionUser;

impl From<PostTitle> for PostSummary {
    fn from(p: PostTitle) -> Self {
        Self {
            id: p.id,
            title: p.title,
        }
    }
}

impl From<CommentWithLikes> for CommentView {
    fn from(c: CommentWithLikes) -> Self {
        Self {
            id: c.id,
            message: c.message,
            parent_id: c.parent_id,
            created_at: c.created_at,
            user: CommentAuthor {
                id: c.user_id,
                name: c.user_name,
            },
            like_count: c.like_count,
            liked_by_me: c.liked_by_me,
        }
    }
}

/// GET /posts - list post titles
async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PostSummary>>, ApiError> {
    let posts = PostRepo::new(&state.pool).list().await?;
    Ok(Json(posts.into_iter().map(PostSummary::from).collect()))
}

/// GET /posts/{post_id} - post with its comments, annotated for the session user
async fn get_post(
    State(state): State<Arc<AppState>>,
    ValidUuid(post_id): ValidUuid,
    session: SessionUser,
) -> Result<Json<PostDetail>, ApiError> {
    let post = PostRepo::new(&state.pool).get(post_id).await?;
    let comments = CommentRepo::new(&state.pool)
        .list_for_post(post_id, session.id())
        .await?;

    Ok(Json(PostDetail {
        id: post.id,
        title: post.title,
        body: post.body,
        comments: comments.into_iter().map(CommentView::from).collect(),
    }))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{post_id}", get(get_post))
}
