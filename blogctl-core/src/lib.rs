//! blogctl-core: types shared by the blogctl server and its clients
//!
//! - [`api`]: JSON request/response shapes of the HTTP API
//! - [`thread`]: assembly of a post's flat comment list into a reply tree
//! - [`config`]: `~/.blogctl/config.toml`

pub mod api;
pub mod config;
pub mod thread;

pub use api::{
    CommentAuthor, CommentView, CreateCommentRequest, DeletedComment, ErrorBody, PostDetail,
    PostSummary, ToggleLikeResponse, UpdateCommentRequest, UpdatedComment,
};
pub use config::{BlogConfig, ClientSection, ServerSection};
pub use thread::{build_thread, ThreadNode};
