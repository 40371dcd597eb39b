//! Toast notifications raised by the session for the shell to display

use serde::Serialize;

use crate::document::PageId;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NotificationAction {
    /// Bring a page into view
    ScrollToPage { label: String, page: PageId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<NotificationAction>,
}

impl Notification {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            action: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Overflow moved content onto new pages; "View" scrolls to `newest`
    pub fn pages_created(newest: PageId) -> Self {
        Self::new("New page(s) created due to content overflow")
            .with_description("Content has been moved to a new page")
            .with_action(NotificationAction::ScrollToPage {
                label: "View".to_string(),
                page: newest,
            })
    }

    pub fn page_added() -> Self {
        Self::new("New page added").with_description("Page added at the end of the document")
    }

    pub fn document_renamed(title: &str) -> Self {
        Self::new(format!("Document renamed to \"{}\"", title))
    }

    pub fn document_saved() -> Self {
        Self::new("Document saved")
    }

    pub fn format_applied(command: &str) -> Self {
        Self::new(format!("Applied {} formatting", command))
    }

    pub fn comment_added() -> Self {
        Self::new("Comment added").with_description("Your comment has been added to the discussion")
    }

    pub fn comment_resolved() -> Self {
        Self::new("Comment resolved").with_description("The comment has been marked as resolved")
    }

    pub fn reply_added() -> Self {
        Self::new("Reply added")
    }
}

/// Notifications waiting for the shell, oldest first
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, notification: Notification) {
        log::debug!("notification: {}", notification.title);
        self.pending.push(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_created() {
        let n = Notification::pages_created(PageId(4));
        assert_eq!(n.title, "New page(s) created due to content overflow");
        assert_eq!(
            n.action,
            Some(NotificationAction::ScrollToPage {
                label: "View".into(),
                page: PageId(4)
            })
        );

        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["action"]["kind"], "scrollToPage");
        assert_eq!(json["action"]["page"], 4);
    }

    #[test]
    fn test_optional_fields_skipped() {
        let json = serde_json::to_value(Notification::reply_added()).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("action").is_none());
    }

    #[test]
    fn test_queue_drain() {
        let mut queue = NotificationQueue::default();
        queue.push(Notification::format_applied("bold"));
        queue.push(Notification::document_saved());
        let drained = queue.drain();
        assert_eq!(drained[0].title, "Applied bold formatting");
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
    }
}
