//! HTTP client for a running blogctl server
//!
//! Used by the `posts` and `comments` commands. Requests act as whichever
//! user the server was started for.

use anyhow::{anyhow, Context, Result};
use blogctl_core::{
    BlogConfig, CommentView, CreateCommentRequest, DeletedComment, ErrorBody, PostDetail,
    PostSummary, ToggleLikeResponse, UpdateCommentRequest, UpdatedComment,
};
use clap::Parser;
use reqwest::Client;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Endpoint used when neither flag, env nor config name one
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3030";

/// Connection flags shared by client commands
#[derive(Parser, Debug, Clone)]
pub struct ClientArgs {
    /// blogctl server URL (default: http://127.0.0.1:3030)
    #[arg(long, env = "BLOGCTL_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,
}

/// Priority: flag/env > config.toml > default
pub fn resolve_endpoint(flag: Option<&str>, config: Option<&BlogConfig>) -> String {
    flag.map(str::to_string)
        .or_else(|| config.and_then(|c| c.client.endpoint.clone()))
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Typed wrapper over the blog HTTP API
pub struct ApiClient {
    http: Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(endpoint: String) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, endpoint })
    }

    /// Build a client from command flags and the optional config file.
    pub fn from_args(args: &ClientArgs) -> Result<Self> {
        let config = BlogConfig::load_optional()?;
        Self::new(resolve_endpoint(args.endpoint.as_deref(), config.as_ref()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    pub async fn list_posts(&self) -> Result<Vec<PostSummary>> {
        let response = self
            .http
            .get(self.url("/posts"))
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.endpoint))?;
        handle_response(response).await
    }

    pub async fn get_post(&self, post_id: Uuid) -> Result<PostDetail> {
        let response = self
            .http
            .get(self.url(&format!("/posts/{post_id}")))
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.endpoint))?;
        handle_response(response).await
    }

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        message: String,
        parent_id: Option<Uuid>,
    ) -> Result<CommentView> {
        let request = CreateCommentRequest {
            message: Some(message),
            parent_id,
        };
        let response = self
            .http
            .post(self.url(&format!("/posts/{post_id}/comments")))
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.endpoint))?;
        handle_response(response).await
    }

    pub async fn edit_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        message: String,
    ) -> Result<UpdatedComment> {
        let request = UpdateCommentRequest {
            message: Some(message),
        };
        let response = self
            .http
            .put(self.url(&format!("/posts/{post_id}/comments/{comment_id}")))
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.endpoint))?;
        handle_response(response).await
    }

    pub async fn delete_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<DeletedComment> {
        let response = self
            .http
            .delete(self.url(&format!("/posts/{post_id}/comments/{comment_id}")))
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.endpoint))?;
        handle_response(response).await
    }

    pub async fn toggle_like(&self, post_id: Uuid, comment_id: Uuid) -> Result<ToggleLikeResponse> {
        let response = self
            .http
            .post(self.url(&format!(
                "/posts/{post_id}/comments/{comment_id}/toggleLike"
            )))
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", self.endpoint))?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json::<T>()
            .await
            .context("Failed to parse response");
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(describe_error(status, &error_text))
}

fn describe_error(status: reqwest::StatusCode, body: &str) -> anyhow::Error {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => anyhow!("{}: {}", status, error.message),
        Err(_) => anyhow!("{}: {}", status, body),
    }
}
