//! Collaboration state: comment threads, team chat and presence

mod chat;
mod comments;
mod presence;

pub use chat::{
    ChatLog, ChatMessage, ChatResponder, MessageId, ScheduledReply, SimulatedResponder, REPLY_SENDER,
    REPLY_TEXT,
};
pub use comments::{Comment, CommentId, CommentThreads, Reply, CURRENT_USER};
pub use presence::{
    color_hex, Collaborator, PresenceEvent, PresenceSource, PresenceTracker, SimulatedPresence, UserId,
};
