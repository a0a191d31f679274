//! Like toggling endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use blogctl_core::ToggleLikeResponse;

use crate::db::repos::LikeRepo;
use crate::http::error::ApiError;
use crate::http::extractors::CommentPath;
use crate::http::server::AppState;
use crate::http::session::SessionUser;

/// POST /posts/{post_id}/comments/{comment_id}/toggleLike
async fn toggle_like(
    State(state): State<Arc<AppState>>,
    path: CommentPath,
    session: SessionUser,
) -> Result<Json<ToggleLikeResponse>, ApiError> {
    let outcome = LikeRepo::new(&state.pool)
        .toggle(path.post_id, path.comment_id, session.id())
        .await?;

    tracing::debug!(comment_id = %path.comment_id, ?outcome, "Like toggled");
    Ok(Json(ToggleLikeResponse {
        add_like: outcome.is_added(),
    }))
}

/// Like routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/posts/{post_id}/comments/{comment_id}/toggleLike",
        post(toggle_like),
    )
}
