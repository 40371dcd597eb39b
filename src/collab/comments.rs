//! Comment threads attached to the document

use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};

/// Author name used for the local user
pub const CURRENT_USER: &str = "You";

/// Identifier shared by comments and replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: CommentId,
    pub author: String,
    pub content: String,
    pub created_at_ms: u64,
}

/// A top-level comment and its replies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub content: String,
    pub created_at_ms: u64,
    pub replies: Vec<Reply>,
}

/// Open comment threads, newest first
#[derive(Debug, Clone)]
pub struct CommentThreads {
    comments: Vec<Comment>,
    next_id: u64,
}

impl Default for CommentThreads {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentThreads {
    pub fn new() -> Self {
        Self {
            comments: Vec::new(),
            next_id: 1,
        }
    }

    /// Threads pre-filled with a short sample discussion
    pub fn demo() -> Self {
        let mut threads = Self::new();
        let first = threads.allocate_id();
        let second = threads.allocate_id();
        let reply = threads.allocate_id();
        threads.comments = vec![
            Comment {
                id: second,
                author: "John Doe".to_string(),
                content: "We should expand on this section.".to_string(),
                created_at_ms: 1_687_271_400_000,
                replies: Vec::new(),
            },
            Comment {
                id: first,
                author: "Jane Smith".to_string(),
                content: "Great point! I'll add more details.".to_string(),
                created_at_ms: 1_687_275_900_000,
                replies: vec![Reply {
                    id: reply,
                    author: "John Doe".to_string(),
                    content: "Thanks! Let me know if you need any help.".to_string(),
                    created_at_ms: 1_687_276_800_000,
                }],
            },
        ];
        threads
    }

    fn allocate_id(&mut self) -> CommentId {
        let id = CommentId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Start a new thread; it goes to the top of the list
    pub fn add(&mut self, author: &str, content: &str, now_ms: u64) -> CommentId {
        let id = self.allocate_id();
        self.comments.insert(
            0,
            Comment {
                id,
                author: author.to_string(),
                content: content.to_string(),
                created_at_ms: now_ms,
                replies: Vec::new(),
            },
        );
        id
    }

    /// Append a reply to a thread
    pub fn reply(&mut self, comment: CommentId, author: &str, content: &str, now_ms: u64) -> Result<CommentId> {
        if content.trim().is_empty() {
            return Err(Error::EmptyReply);
        }
        let index = self
            .comments
            .iter()
            .position(|c| c.id == comment)
            .ok_or(Error::CommentNotFound(comment))?;

        let id = self.allocate_id();
        self.comments[index].replies.push(Reply {
            id,
            author: author.to_string(),
            content: content.to_string(),
            created_at_ms: now_ms,
        });
        Ok(id)
    }

    /// Resolve a thread, removing it
    pub fn resolve(&mut self, comment: CommentId) -> Result<Comment> {
        let index = self
            .comments
            .iter()
            .position(|c| c.id == comment)
            .ok_or(Error::CommentNotFound(comment))?;
        Ok(self.comments.remove(index))
    }

    pub fn get(&self, comment: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment)
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
