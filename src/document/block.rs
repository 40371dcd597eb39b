//! Block-level elements of a page

use serde::{Deserialize, Serialize};

use crate::document::markup;

/// Type of list marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListMarker {
    Bullet,
    Numbered,
}

impl ListMarker {
    /// Get the display string for the marker of the item at `ordinal`
    pub fn display(&self, ordinal: u32) -> String {
        match self {
            ListMarker::Bullet => "•".to_string(),
            ListMarker::Numbered => format!("{}.", ordinal),
        }
    }
}

/// The kind of block element, derived from its outermost tag
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    /// Regular paragraph
    #[default]
    Paragraph,
    /// Heading with level (1-6)
    Heading { level: u8 },
    /// Bulleted or numbered list
    List { marker: ListMarker },
    /// Block quotation
    Quote,
    /// Horizontal rule or page-break marker
    Rule,
    /// Table
    Table,
    /// Any other element, kept opaque
    Other,
    /// Run of top-level text and inline elements
    Text,
}

impl BlockKind {
    /// Classify an element by its (lowercase) tag name
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "p" => BlockKind::Paragraph,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => BlockKind::Heading {
                level: tag[1..].parse().unwrap_or(1),
            },
            "ul" => BlockKind::List { marker: ListMarker::Bullet },
            "ol" => BlockKind::List { marker: ListMarker::Numbered },
            "blockquote" => BlockKind::Quote,
            "hr" => BlockKind::Rule,
            "table" => BlockKind::Table,
            _ => BlockKind::Other,
        }
    }

    /// Get the line height multiplier for this block kind
    pub fn line_height_multiplier(&self) -> f32 {
        match self {
            BlockKind::Heading { level } => match level {
                1 => 1.5,
                2 => 1.4,
                3 => 1.3,
                _ => 1.2,
            },
            _ => 1.0,
        }
    }

    /// Get the spacing after this block (in line heights)
    pub fn spacing_after(&self) -> f32 {
        match self {
            BlockKind::Paragraph | BlockKind::Quote | BlockKind::Other => 1.0,
            BlockKind::Heading { .. } => 0.5,
            BlockKind::List { .. } | BlockKind::Table => 0.75,
            BlockKind::Rule => 0.5,
            BlockKind::Text => 0.0,
        }
    }
}

/// A top-level element of page content.
///
/// The markup is kept verbatim; the pagination engine moves blocks whole and
/// never looks inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    kind: BlockKind,
    markup: String,
}

impl Block {
    /// Wrap a markup fragment, classifying it by its first top-level node
    pub fn new(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let kind = markup::classify(&markup);
        Self { kind, markup }
    }

    pub(crate) fn with_kind(kind: BlockKind, markup: String) -> Self {
        Self { kind, markup }
    }

    /// Append markup that renders nothing, such as whitespace between blocks
    pub(crate) fn push_markup(&mut self, markup: &str) {
        self.markup.push_str(markup);
    }

    /// Create a paragraph from plain text, escaping markup characters
    pub fn paragraph(text: &str) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            markup: format!("<p>{}</p>", markup::escape_text(text)),
        }
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Visible text of the block, with line breaks where the markup has them
    pub fn text(&self) -> String {
        markup::visible_text(&self.markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind() {
        assert_eq!(Block::new("<p>x</p>").kind(), &BlockKind::Paragraph);
        assert_eq!(Block::new("<H2>x</H2>").kind(), &BlockKind::Heading { level: 2 });
        assert_eq!(
            Block::new("<ol><li>a</li></ol>").kind(),
            &BlockKind::List { marker: ListMarker::Numbered }
        );
        assert_eq!(Block::new("<hr>").kind(), &BlockKind::Rule);
        assert_eq!(Block::new("<div class=\"page-break\"></div>").kind(), &BlockKind::Other);
        assert_eq!(Block::new("plain <b>run</b>").kind(), &BlockKind::Text);
    }

    #[test]
    fn test_paragraph_escapes_text() {
        let block = Block::paragraph("a < b & c");
        assert_eq!(block.markup(), "<p>a &lt; b &amp; c</p>");
        assert_eq!(block.text(), "a < b & c");
    }

    #[test]
    fn test_list_marker_display() {
        assert_eq!(ListMarker::Bullet.display(3), "•");
        assert_eq!(ListMarker::Numbered.display(1), "1.");
        assert_eq!(ListMarker::Numbered.display(10), "10.");
    }
}
