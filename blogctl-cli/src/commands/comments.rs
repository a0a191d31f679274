//! Comment commands - add, edit, delete and like as the server's session user
//!
//! ```bash
//! blogctl comments add <POST_ID> -m "Nice post"
//! blogctl comments add <POST_ID> -m "Agreed" --parent <COMMENT_ID>
//! echo "Edited" | blogctl comments edit <POST_ID> <COMMENT_ID>
//! ```

use std::io::{IsTerminal, Read};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use super::client::{ApiClient, ClientArgs};
use crate::ui;

#[derive(Parser, Debug)]
pub struct CommentsArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    #[command(subcommand)]
    pub command: CommentsCommands,
}

#[derive(Subcommand, Debug)]
pub enum CommentsCommands {
    /// Comment on a post, or reply to a comment with --parent
    Add(AddArgs),
    /// Replace the message of one of your comments
    Edit(EditArgs),
    /// Delete one of your comments
    Delete(TargetArgs),
    /// Like a comment, or remove your like
    Like(TargetArgs),
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Post ID
    pub post_id: Uuid,

    /// Comment text (read from stdin when omitted)
    #[arg(long, short)]
    pub message: Option<String>,

    /// Comment ID to reply to
    #[arg(long)]
    pub parent: Option<Uuid>,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Post ID
    pub post_id: Uuid,

    /// Comment ID
    pub comment_id: Uuid,

    /// New comment text (read from stdin when omitted)
    #[arg(long, short)]
    pub message: Option<String>,
}

#[derive(Parser, Debug)]
pub struct TargetArgs {
    /// Post ID
    pub post_id: Uuid,

    /// Comment ID
    pub comment_id: Uuid,
}

pub async fn run_comments(args: CommentsArgs) -> Result<()> {
    let client = ApiClient::from_args(&args.client)?;
    let json = args.client.json;

    match args.command {
        CommentsCommands::Add(add) => run_add(&client, add, json).await,
        CommentsCommands::Edit(edit) => run_edit(&client, edit, json).await,
        CommentsCommands::Delete(target) => run_delete(&client, target, json).await,
        CommentsCommands::Like(target) => run_like(&client, target, json).await,
    }
}

/// Priority: -m inline > stdin
///
/// An empty message is sent as-is; the server rejects it.
fn get_message(message: Option<String>) -> Result<String> {
    if let Some(msg) = message {
        return Ok(msg);
    }

    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let mut buf = String::new();
        stdin
            .lock()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf.trim_end_matches(['\r', '\n']).to_string());
    }

    Err(anyhow!(
        "No message provided. Use -m or pipe the message via stdin"
    ))
}

async fn run_add(client: &ApiClient, args: AddArgs, json: bool) -> Result<()> {
    let message = get_message(args.message)?;

    let comment = ui::with_spinner_async(
        "Posting comment",
        "Comment posted",
        client.add_comment(args.post_id, message, args.parent),
    )
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&comment)?);
    } else {
        println!("{}", comment.id);
    }
    Ok(())
}

async fn run_edit(client: &ApiClient, args: EditArgs, json: bool) -> Result<()> {
    let message = get_message(args.message)?;

    let updated = ui::with_spinner_async(
        "Updating comment",
        "Comment updated",
        client.edit_comment(args.post_id, args.comment_id, message),
    )
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!("{}", updated.message);
    }
    Ok(())
}

async fn run_delete(client: &ApiClient, args: TargetArgs, json: bool) -> Result<()> {
    let deleted = ui::with_spinner_async(
        "Deleting comment",
        "Comment deleted",
        client.delete_comment(args.post_id, args.comment_id),
    )
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&deleted)?);
    } else {
        println!("{}", deleted.id);
    }
    Ok(())
}

async fn run_like(client: &ApiClient, args: TargetArgs, json: bool) -> Result<()> {
    let toggled = ui::with_spinner_async(
        "Toggling like",
        "Like toggled",
        client.toggle_like(args.post_id, args.comment_id),
    )
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&toggled)?);
    } else if toggled.add_like {
        println!("♥ liked {}", args.comment_id);
    } else {
        println!("♡ unliked {}", args.comment_id);
    }
    Ok(())
}
