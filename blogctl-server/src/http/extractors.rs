//! Custom Axum extractors
//!
//! Path ids and JSON bodies are parsed here so that malformed input becomes
//! a JSON validation error instead of axum's plain-text rejection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use uuid::Uuid;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract and validate a single UUID from path (`/posts/{post_id}`)
pub struct ValidUuid(pub Uuid);

impl<S> FromRequestParts<S> for ValidUuid
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self(parse_uuid("id", &id)?))
    }
}

/// Extract `/posts/{post_id}/comments/{comment_id}`
#[derive(Debug, Clone, Copy)]
pub struct CommentPath {
    pub post_id: Uuid,
    pub comment_id: Uuid,
}

impl<S> FromRequestParts<S> for CommentPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((post_id, comment_id)): Path<(String, String)> =
            Path::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        Ok(Self {
            post_id: parse_uuid("post id", &post_id)?,
            comment_id: parse_uuid("comment id", &comment_id)?,
        })
    }
}

/// `Json<T>` whose rejections (bad syntax, wrong shape, missing
/// content type) are 400 validation errors
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::Validation(ValidationError::InvalidBody {
                    reason: rejection.body_text(),
                })
            })?;
        Ok(Self(value))
    }
}

fn parse_uuid(field: &'static str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiError::Validation(ValidationError::InvalidFormat {
            field,
            reason: "invalid UUID format",
        })
    })
}
