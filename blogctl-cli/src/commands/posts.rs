//! Post commands - list posts and read one with its comment thread
//!
//! ```bash
//! blogctl posts list
//! blogctl posts show <POST_ID>
//! blogctl posts show <POST_ID> --json | jq '.comments[] | select(.likedByMe)'
//! ```

use std::fmt::Write as _;

use anyhow::Result;
use blogctl_core::{build_thread, PostDetail, ThreadNode};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use super::client::{ApiClient, ClientArgs};
use crate::ui;

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(flatten)]
    pub client: ClientArgs,

    #[command(subcommand)]
    pub command: PostsCommands,
}

#[derive(Subcommand, Debug)]
pub enum PostsCommands {
    /// List post titles
    List,
    /// Show a post with its comment thread
    Show(ShowArgs),
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Post ID
    pub post_id: Uuid,
}

pub async fn run_posts(args: PostsArgs) -> Result<()> {
    let client = ApiClient::from_args(&args.client)?;

    match args.command {
        PostsCommands::List => run_list(&client, args.client.json).await,
        PostsCommands::Show(show) => run_show(&client, show, args.client.json).await,
    }
}

async fn run_list(client: &ApiClient, json: bool) -> Result<()> {
    let posts = ui::with_spinner_async(
        format!("Fetching posts from {}", client.endpoint()),
        "Fetched posts",
        client.list_posts(),
    )
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("(no posts - run `blogctl db seed`)");
        return Ok(());
    }

    for post in &posts {
        println!("{}  {}", post.id, post.title);
    }
    Ok(())
}

async fn run_show(client: &ApiClient, args: ShowArgs, json: bool) -> Result<()> {
    let post = ui::with_spinner_async(
        "Fetching post",
        "Fetched post",
        client.get_post(args.post_id),
    )
    .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    print!("{}", render_post(post));
    Ok(())
}

/// Replies nested deeper than this share their parent's indentation.
const MAX_INDENT_DEPTH: usize = 16;

/// Post header, body and the comment tree, ready for the terminal
fn render_post(post: PostDetail) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "┌─ {}", post.title);
    for line in post.body.lines() {
        let _ = writeln!(out, "│  {}", line);
    }
    let _ = writeln!(out, "│");

    let thread = build_thread(post.comments);
    let count: usize = thread.iter().map(ThreadNode::count).sum();
    let noun = if count == 1 { "comment" } else { "comments" };
    let _ = writeln!(out, "└─ {} {}", count, noun);

    render_nodes(&thread, &mut out);
    out
}

fn render_nodes(roots: &[ThreadNode], out: &mut String) {
    // (node, indent, depth, is_last), popped in display order
    let mut stack: Vec<(&ThreadNode, String, usize, bool)> = Vec::new();
    push_siblings(&mut stack, roots, "   ", 0);

    while let Some((node, indent, depth, is_last)) = stack.pop() {
        let branch = if is_last { "└─" } else { "├─" };
        let child_indent = if depth < MAX_INDENT_DEPTH {
            format!("{}{}", indent, if is_last { "   " } else { "│  " })
        } else {
            indent.clone()
        };

        let comment = &node.comment;
        let heart = if comment.liked_by_me { "♥" } else { "♡" };
        let _ = writeln!(
            out,
            "{}{} {} · {} · {} {}  [{}]",
            indent,
            branch,
            comment.user.name,
            comment.created_at.format("%Y-%m-%d %H:%M"),
            heart,
            comment.like_count,
            comment.id
        );
        for line in comment.message.lines() {
            let _ = writeln!(out, "{}{}", child_indent, line);
        }

        push_siblings(&mut stack, &node.replies, &child_indent, depth + 1);
    }
}

fn push_siblings<'a>(
    stack: &mut Vec<(&'a ThreadNode, String, usize, bool)>,
    nodes: &'a [ThreadNode],
    indent: &str,
    depth: usize,
) {
    let last = nodes.len().saturating_sub(1);
    for (i, node) in nodes.iter().enumerate().rev() {
        stack.push((node, indent.to_string(), depth, i == last));
    }
}
