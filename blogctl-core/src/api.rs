//! JSON shapes exchanged between `blogctl-server` and its clients.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entry of `GET /posts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
}

/// Response of `GET /posts/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    /// Newest first. `parentId` links replies to their parent.
    pub comments: Vec<CommentView>,
}

/// Author embedded in a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: Uuid,
    pub name: String,
}

/// A comment as seen by the session user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub message: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub user: CommentAuthor,
    pub like_count: i64,
    pub liked_by_me: bool,
}

/// Body of `POST /posts/{id}/comments`
///
/// `message` stays optional here so that a missing or `null` message is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Body of `PUT /posts/{postId}/comments/{commentId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of a successful comment edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedComment {
    pub message: String,
}

/// Response of a successful comment delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedComment {
    pub id: Uuid,
}

/// Response of `POST .../toggleLike`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeResponse {
    /// `true` when the like was created, `false` when it was removed
    pub add_like: bool,
}

/// Error body returned with every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}
