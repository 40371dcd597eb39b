//! Team chat log with simulated replies

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::comments::CURRENT_USER;
use crate::error::{Error, Result};

const MINUTE_MS: u64 = 60 * 1000;

/// Sender of simulated replies
pub const REPLY_SENDER: &str = "Jane Smith";
/// Body of simulated replies
pub const REPLY_TEXT: &str = "Thanks for the update! Looking forward to seeing the final version.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: String,
    pub content: String,
    pub timestamp_ms: u64,
    pub is_current_user: bool,
}

/// A reply waiting to be delivered
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledReply {
    pub due_ms: u64,
    pub sender: String,
    pub content: String,
}

/// Produces the replies other participants send back
pub trait ChatResponder {
    fn respond(&mut self, message: &ChatMessage, now_ms: u64) -> Option<ScheduledReply>;
}

/// Answers a share of messages with a canned reply after a random delay
#[derive(Debug, Clone)]
pub struct SimulatedResponder {
    rng: SmallRng,
    probability: f64,
    delay_ms: (u64, u64),
}

impl SimulatedResponder {
    pub fn new(seed: u64, probability: f64, delay_ms: (u64, u64)) -> Self {
        let (lo, hi) = delay_ms;
        Self {
            rng: SmallRng::seed_from_u64(seed),
            probability: probability.clamp(0.0, 1.0),
            delay_ms: (lo.min(hi), lo.max(hi)),
        }
    }
}

impl ChatResponder for SimulatedResponder {
    fn respond(&mut self, _message: &ChatMessage, now_ms: u64) -> Option<ScheduledReply> {
        if !self.rng.gen_bool(self.probability) {
            return None;
        }
        let (lo, hi) = self.delay_ms;
        let delay = if lo == hi { lo } else { self.rng.gen_range(lo..hi) };
        Some(ScheduledReply {
            due_ms: now_ms + delay,
            sender: REPLY_SENDER.to_string(),
            content: REPLY_TEXT.to_string(),
        })
    }
}

/// Messages in send order plus replies not yet delivered
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    pending: Vec<ScheduledReply>,
    next_id: u64,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// A log holding a short conversation ending just before `now_ms`
    pub fn demo(now_ms: u64) -> Self {
        let mut log = Self::new();
        log.push(
            "John Doe",
            "Hey team, I've updated the introduction section. Can you take a look?",
            now_ms.saturating_sub(120 * MINUTE_MS),
        );
        log.push(
            "Jane Smith",
            "Looks good! I'll review it in detail later today.",
            now_ms.saturating_sub(30 * MINUTE_MS),
        );
        log.push(
            CURRENT_USER,
            "Thanks! I'm also working on the conclusion. Should be done by EOD.",
            now_ms.saturating_sub(15 * MINUTE_MS),
        );
        log
    }

    fn push(&mut self, sender: &str, content: &str, timestamp_ms: u64) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            sender: sender.to_string(),
            content: content.to_string(),
            timestamp_ms,
            is_current_user: sender == CURRENT_USER,
        });
        id
    }

    /// Send a message as the local user and let `responder` schedule an answer
    pub fn send<R: ChatResponder + ?Sized>(
        &mut self,
        content: &str,
        now_ms: u64,
        responder: &mut R,
    ) -> Result<MessageId> {
        if content.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }
        let id = self.push(CURRENT_USER, content, now_ms);
        if let Some(reply) = responder.respond(&self.messages[self.messages.len() - 1], now_ms) {
            log::debug!("chat reply from {} due at {}", reply.sender, reply.due_ms);
            self.pending.push(reply);
        }
        Ok(id)
    }

    /// Append every scheduled reply whose time has come, earliest first.
    /// Returns how many were delivered.
    pub fn deliver_due(&mut self, now_ms: u64) -> usize {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|r| r.due_ms <= now_ms);
        self.pending = waiting;
        due.sort_by_key(|r| r.due_ms);

        let delivered = due.len();
        for reply in due {
            self.push(&reply.sender, &reply.content, reply.due_ms);
        }
        delivered
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn pending(&self) -> &[ScheduledReply] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(u64);

    impl ChatResponder for Always {
        fn respond(&mut self, _message: &ChatMessage, now_ms: u64) -> Option<ScheduledReply> {
            Some(ScheduledReply {
                due_ms: now_ms + self.0,
                sender: REPLY_SENDER.into(),
                content: REPLY_TEXT.into(),
            })
        }
    }

    #[test]
    fn test_demo_log() {
        let log = ChatLog::demo(10 * 60 * MINUTE_MS);
        let messages = log.messages();
        assert_eq!(messages.len(), 3);
        assert!(messages[2].is_current_user);
        assert!(!messages[0].is_current_user);
        assert_eq!(messages[1].timestamp_ms, 9 * 60 * MINUTE_MS + 30 * MINUTE_MS);
    }

    #[test]
    fn test_blank_message_rejected() {
        let mut log = ChatLog::new();
        assert!(matches!(log.send(" \t", 0, &mut Always(10)), Err(Error::EmptyMessage)));
        assert!(log.messages().is_empty());
        assert!(log.pending().is_empty());
    }

    #[test]
    fn test_reply_delivered_when_due() {
        let mut log = ChatLog::new();
        log.send("hello", 1_000, &mut Always(4_000)).unwrap();
        assert_eq!(log.pending().len(), 1);

        assert_eq!(log.deliver_due(4_999), 0);
        assert_eq!(log.deliver_due(5_000), 1);
        let last = log.messages().last().unwrap();
        assert_eq!(last.sender, REPLY_SENDER);
        assert_eq!(last.timestamp_ms, 5_000);
        assert!(!last.is_current_user);
        assert!(log.pending().is_empty());
    }

    #[test]
    fn test_simulated_responder_bounds() {
        let mut responder = SimulatedResponder::new(7, 1.0, (3_000, 8_000));
        let message = ChatMessage {
            id: MessageId(1),
            sender: CURRENT_USER.into(),
            content: "hi".into(),
            timestamp_ms: 0,
            is_current_user: true,
        };
        for _ in 0..50 {
            let reply = responder.respond(&message, 100).unwrap();
            assert!((3_100..8_100).contains(&reply.due_ms));
        }

        let mut silent = SimulatedResponder::new(7, 0.0, (3_000, 8_000));
        assert!(silent.respond(&message, 100).is_none());
    }

    #[test]
    fn test_simulated_responder_is_seeded() {
        let message = ChatMessage {
            id: MessageId(1),
            sender: CURRENT_USER.into(),
            content: "hi".into(),
            timestamp_ms: 0,
            is_current_user: true,
        };
        let mut a = SimulatedResponder::new(42, 0.5, (3_000, 8_000));
        let mut b = SimulatedResponder::new(42, 0.5, (3_000, 8_000));
        for _ in 0..20 {
            assert_eq!(a.respond(&message, 0), b.respond(&message, 0));
        }
    }
}
