//! Pages: ordered containers of block elements

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::block::Block;
use crate::document::markup;

/// Stable identifier for a page that survives reordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One visual page of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    blocks: Vec<Block>,
}

impl Page {
    /// Create a page from already split blocks
    pub fn new(id: PageId, blocks: Vec<Block>) -> Self {
        Self { id, blocks }
    }

    /// Create a page by splitting a markup string into blocks
    pub fn from_markup(id: PageId, content: &str) -> Self {
        Self::new(id, markup::split_blocks(content))
    }

    /// Render the page content back to markup
    pub fn content(&self) -> String {
        self.blocks.iter().map(Block::markup).collect()
    }

    /// Replace the page content with new markup
    pub fn set_content(&mut self, content: &str) {
        self.blocks = markup::split_blocks(content);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Detach the trailing block, refusing to empty the page.
    ///
    /// A page always keeps its first block so that an oversized single
    /// block stays where it is instead of bouncing between pages.
    pub fn pop_trailing_block(&mut self) -> Option<Block> {
        if self.blocks.len() > 1 {
            self.blocks.pop()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_round_trips_markup() {
        let page = Page::from_markup(PageId(1), "<p>one</p><p>two</p>");
        assert_eq!(page.block_count(), 2);
        assert_eq!(page.content(), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_pop_keeps_last_block() {
        let mut page = Page::from_markup(PageId(1), "<p>a</p><p>b</p>");
        assert_eq!(page.pop_trailing_block().map(|b| b.markup().to_string()), Some("<p>b</p>".into()));
        assert!(page.pop_trailing_block().is_none());
        assert_eq!(page.block_count(), 1);
    }
}
