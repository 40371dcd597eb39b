//! Error types for editor session operations.

use thiserror::Error;

use crate::collab::CommentId;
use crate::document::PageId;

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the editor session.
///
/// Pagination never produces one of these: unmeasurable pages and
/// single-block overflow are logged and left alone.
#[derive(Error, Debug)]
pub enum Error {
    /// No page carries the given id.
    #[error("Page {0} not found")]
    PageNotFound(PageId),

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// No comment thread carries the given id.
    #[error("Comment {0} not found")]
    CommentNotFound(CommentId),

    /// Chat message was blank.
    #[error("Cannot send an empty message")]
    EmptyMessage,

    /// Reply text was blank.
    #[error("Cannot add an empty reply")]
    EmptyReply,

    /// A comment was requested without an active text selection.
    #[error("No text is selected")]
    NoSelection,

    /// Formatting command name is not recognised.
    #[error("Unknown formatting command: {0}")]
    UnknownCommand(String),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON encoding failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
