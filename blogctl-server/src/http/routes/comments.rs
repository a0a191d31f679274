//! Comment endpoints
//!
//! Edit and delete are restricted to the comment's author. The message is
//! validated before anything is read from the database.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use blogctl_core::{
    CommentView, CreateCommentRequest, DeletedComment, UpdateCommentRequest, UpdatedComment,
};

use crate::db::repos::CommentRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{CommentPath, ValidJson, ValidUuid};
use crate::http::server::AppState;
use crate::http::session::SessionUser;
use crate::models::CommentMessage;

/// POST /posts/{post_id}/comments - add a comment or reply
async fn create_comment(
    State(state): State<Arc<AppState>>,
    ValidUuid(post_id): ValidUuid,
    session: SessionUser,
    ValidJson(req): ValidJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentView>), ApiError> {
    let message = CommentMessage::new(req.message.as_deref())?;

    let comment = CommentRepo::new(&state.pool)
        .create(post_id, session.id(), message, req.parent_id)
        .await?;

    tracing::debug!(%post_id, comment_id = %comment.id, "Comment created");
    Ok((StatusCode::CREATED, Json(CommentView::from(comment))))
}

/// PUT /posts/{post_id}/comments/{comment_id} - edit own comment
async fn update_comment(
    State(state): State<Arc<AppState>>,
    path: CommentPath,
    session: SessionUser,
    ValidJson(req): ValidJson<UpdateCommentRequest>,
) -> Result<Json<UpdatedComment>, ApiError> {
    let message = CommentMessage::new(req.message.as_deref())?;

    let repo = CommentRepo::new(&state.pool);
    let owner = repo.owner(path.post_id, path.comment_id).await?;
    if owner != session.id() {
        return Err(ApiError::Unauthorized {
            reason: "You do not have permission to edit this comment".into(),
        });
    }

    let message = repo
        .update_message(path.post_id, path.comment_id, session.id(), message)
        .await?;

    Ok(Json(UpdatedComment { message }))
}

/// DELETE /posts/{post_id}/comments/{comment_id} - delete own comment
async fn delete_comment(
    State(state): State<Arc<AppState>>,
    path: CommentPath,
    session: SessionUser,
) -> Result<Json<DeletedComment>, ApiError> {
    let repo = CommentRepo::new(&state.pool);
    let owner = repo.owner(path.post_id, path.comment_id).await?;
    if owner != session.id() {
        return Err(ApiError::Unauthorized {
            reason: "You do not have permission to delete this comment".into(),
        });
    }

    let id = repo
        .delete(path.post_id, path.comment_id, session.id())
        .await?;

    tracing::debug!(post_id = %path.post_id, comment_id = %id, "Comment deleted");
    Ok(Json(DeletedComment { id }))
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts/{post_id}/comments", post(create_comment))
        .route(
            "/posts/{post_id}/comments/{comment_id}",
            put(update_comment).delete(delete_comment),
        )
}
