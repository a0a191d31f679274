//! Reply-tree assembly
//!
//! The API returns a post's comments as a flat list in which `parentId`
//! links each reply to its parent. [`build_thread`] turns that list into a
//! forest:
//!
//! - roots are comments without a parent, or whose parent is not in the list
//! - replies keep the relative order of the input list
//! - every input comment appears exactly once, even if the parent links
//!   form a cycle
//!
//! Reply chains can be arbitrarily deep, so building, counting and dropping
//! a tree never recurse per level.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::api::CommentView;

/// A comment with its (recursive) replies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadNode {
    pub comment: CommentView,
    pub replies: Vec<ThreadNode>,
}

impl ThreadNode {
    /// Number of comments in this subtree, including this one.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            total += 1;
            pending.extend(node.replies.iter());
        }
        total
    }
}

impl Drop for ThreadNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

/// Build the reply forest for a flat comment list.
pub fn build_thread(comments: Vec<CommentView>) -> Vec<ThreadNode> {
    let known: HashSet<Uuid> = comments.iter().map(|c| c.id).collect();

    let mut children: HashMap<Uuid, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();
    for (idx, comment) in comments.iter().enumerate() {
        match comment.parent_id {
            Some(parent) if parent != comment.id && known.contains(&parent) => {
                children.entry(parent).or_default().push(idx)
            }
            _ => roots.push(idx),
        }
    }

    let mut slots: Vec<Option<CommentView>> = comments.into_iter().map(Some).collect();
    let mut forest = Vec::with_capacity(roots.len());

    for idx in roots {
        if let Some(node) = take_node(idx, &mut slots, &children) {
            forest.push(node);
        }
    }

    // Whatever is left is only reachable through a parent cycle.
    for idx in 0..slots.len() {
        if let Some(node) = take_node(idx, &mut slots, &children) {
            forest.push(node);
        }
    }

    forest
}

/// A node under construction: its comment, the children still to visit and
/// the replies finished so far.
struct Frame<'a> {
    comment: CommentView,
    pending: std::slice::Iter<'a, usize>,
    replies: Vec<ThreadNode>,
}

impl<'a> Frame<'a> {
    fn new(comment: CommentView, children: &'a HashMap<Uuid, Vec<usize>>) -> Self {
        let pending = children
            .get(&comment.id)
            .map_or(&[][..], Vec::as_slice)
            .iter();
        Self {
            comment,
            pending,
            replies: Vec::new(),
        }
    }
}

fn take_node(
    idx: usize,
    slots: &mut [Option<CommentView>],
    children: &HashMap<Uuid, Vec<usize>>,
) -> Option<ThreadNode> {
    let mut stack = vec![Frame::new(slots[idx].take()?, children)];

    loop {
        let top = stack.last_mut()?;
        if let Some(&kid) = top.pending.next() {
            if let Some(comment) = slots[kid].take() {
                stack.push(Frame::new(comment, children));
            }
            continue;
        }

        let done = stack.pop()?;
        let node = ThreadNode {
            comment: done.comment,
            replies: done.replies,
        };
        match stack.last_mut() {
            Some(parent) => parent.replies.push(node),
            None => return Some(node),
        }
    }
}
