//! Text selection to comment anchor

use serde::Serialize;

use crate::{Point, Rect};

/// Selection state reported by the shell on `selectionchange`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    /// Selected text as the browser serialises it
    pub text: String,
    /// Bounding rectangle of the selected range, in viewport coordinates
    pub rect: Rect,
}

/// Where the comment bubble sits and what it would comment on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionAnchor {
    /// Bubble position relative to the editor's top-left corner
    pub position: Point,
    pub text: String,
}

impl SelectionAnchor {
    /// Anchor the bubble at the bottom-right corner of the selection.
    /// Selections of only whitespace produce no anchor.
    pub fn from_snapshot(snapshot: &SelectionSnapshot, editor: &Rect) -> Option<Self> {
        if snapshot.text.trim().is_empty() {
            return None;
        }
        Some(Self {
            position: Point {
                x: snapshot.rect.right() - editor.x,
                y: snapshot.rect.bottom() - editor.y,
            },
            text: snapshot.text.clone(),
        })
    }

    /// Comment body quoting the start of the selection
    pub fn comment_text(&self, max_chars: usize) -> String {
        let mut chars = self.text.chars();
        let excerpt: String = chars.by_ref().take(max_chars).collect();
        let ellipsis = if chars.next().is_some() { "..." } else { "" };
        format!("Comment on: \"{}{}\"", excerpt, ellipsis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str) -> SelectionSnapshot {
        SelectionSnapshot {
            text: text.to_string(),
            rect: Rect::new(120.0, 300.0, 80.0, 20.0),
        }
    }

    #[test]
    fn test_anchor_position() {
        let editor = Rect::new(20.0, 100.0, 900.0, 700.0);
        let anchor = SelectionAnchor::from_snapshot(&snapshot("hello"), &editor).unwrap();
        assert_eq!(anchor.position, Point { x: 180.0, y: 220.0 });
        assert_eq!(anchor.text, "hello");
    }

    #[test]
    fn test_blank_selection_has_no_anchor() {
        let editor = Rect::default();
        assert!(SelectionAnchor::from_snapshot(&snapshot("  \n\t"), &editor).is_none());
        assert!(SelectionAnchor::from_snapshot(&snapshot(""), &editor).is_none());
    }

    #[test]
    fn test_comment_text() {
        let anchor = SelectionAnchor::from_snapshot(&snapshot("short"), &Rect::default()).unwrap();
        assert_eq!(anchor.comment_text(50), "Comment on: \"short\"");

        let long = "é".repeat(60);
        let anchor = SelectionAnchor::from_snapshot(&snapshot(&long), &Rect::default()).unwrap();
        assert_eq!(anchor.comment_text(50), format!("Comment on: \"{}...\"", "é".repeat(50)));

        let exact = "x".repeat(50);
        let anchor = SelectionAnchor::from_snapshot(&snapshot(&exact), &Rect::default()).unwrap();
        assert_eq!(anchor.comment_text(50), format!("Comment on: \"{}\"", exact));
    }
}
