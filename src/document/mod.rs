//! Document model: a title and an ordered list of pages

mod block;
pub mod markup;
mod page;

pub use block::{Block, BlockKind, ListMarker};
pub use page::{Page, PageId};

use serde::Serialize;

use crate::error::{Error, Result};

/// Title given to fresh documents
pub const DEFAULT_TITLE: &str = "Untitled document";

/// Content placed on manually added pages
pub const NEW_PAGE_CONTENT: &str = "<p>New page content...</p>";

/// Content of the first page of a fresh document
pub const WELCOME_CONTENT: &str = concat!(
    "<p>Hello, this is a collaborative document editor.</p>",
    "<p>You can edit this text, and it will be synchronized with other users in real-time.</p>",
    "<p>Try selecting some text to add a comment, or see how other users' cursors move around the document.</p>",
    "<p>This is just the beginning of what's possible with collaborative editing!</p>",
);

/// The document: pages in reading order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    title: String,
    pages: Vec<Page>,
    /// Next page ID to assign
    #[serde(skip)]
    next_page_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_pages(DEFAULT_TITLE, &[WELCOME_CONTENT])
    }
}

impl Document {
    /// Create a document with one empty page
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_pages(title, &[""])
    }

    /// Create a document with one page per markup string
    pub fn from_pages(title: impl Into<String>, contents: &[&str]) -> Self {
        let mut doc = Self {
            title: title.into(),
            pages: Vec::with_capacity(contents.len()),
            next_page_id: 1,
        };
        for content in contents {
            let id = doc.allocate_id();
            doc.pages.push(Page::from_markup(id, content));
        }
        doc
    }

    fn allocate_id(&mut self) -> PageId {
        let id = PageId(self.next_page_id);
        self.next_page_id += 1;
        id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rename the document
    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Position of a page in reading order
    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_at(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub(crate) fn page_at_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Append a blank page at the end of the document
    pub fn add_page(&mut self) -> PageId {
        let id = self.allocate_id();
        self.pages.push(Page::from_markup(id, NEW_PAGE_CONTENT));
        id
    }

    /// Insert a page holding `blocks` immediately after page `after`
    pub fn insert_page_after(&mut self, after: PageId, blocks: Vec<Block>) -> Result<PageId> {
        let index = self.page_index(after).ok_or(Error::PageNotFound(after))?;
        Ok(self.insert_page_at(index + 1, blocks))
    }

    pub(crate) fn insert_page_at(&mut self, index: usize, blocks: Vec<Block>) -> PageId {
        let id = self.allocate_id();
        let index = index.min(self.pages.len());
        self.pages.insert(index, Page::new(id, blocks));
        id
    }

    /// Replace a page's content after it was edited
    pub fn set_page_content(&mut self, id: PageId, content: &str) -> Result<()> {
        let page = self
            .pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::PageNotFound(id))?;
        page.set_content(content);
        Ok(())
    }

    /// Full document markup, pages concatenated
    pub fn content(&self) -> String {
        self.pages.iter().map(Page::content).collect()
    }

    /// Flat view of the document with each page's markup rendered
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            title: self.title.clone(),
            pages: self
                .pages
                .iter()
                .map(|p| PageSnapshot {
                    id: p.id,
                    content: p.content(),
                })
                .collect(),
        }
    }
}

/// Page as the shell sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub id: PageId,
    pub content: String,
}

/// `{ title, pages }` with rendered page markup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSnapshot {
    pub title: String,
    pages: Vec<PageSnapshot>,
}

impl DocumentSnapshot {
    pub fn pages(&self) -> &[PageSnapshot] {
        &self.pages
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json() {
        let doc = Document::from_pages("Notes", &["<p>a</p><p>b</p>", "<h1>c</h1>"]);
        let snapshot = doc.snapshot();
        assert_eq!(snapshot.pages().len(), 2);
        assert_eq!(snapshot.pages()[0].content, "<p>a</p><p>b</p>");
        assert_eq!(
            snapshot.to_json().unwrap(),
            r#"{"title":"Notes","pages":[{"id":1,"content":"<p>a</p><p>b</p>"},{"id":2,"content":"<h1>c</h1>"}]}"#
        );
    }

    #[test]
    fn test_default_document() {
        let doc = Document::default();
        assert_eq!(doc.title(), DEFAULT_TITLE);
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages()[0].block_count(), 4);
    }

    #[test]
    fn test_add_page_appends() {
        let mut doc = Document::from_pages("t", &["<p>a</p>", "<p>b</p>"]);
        let id = doc.add_page();
        assert_eq!(doc.page_index(id), Some(2));
        assert_eq!(doc.page(id).map(Page::content).as_deref(), Some(NEW_PAGE_CONTENT));
    }

    #[test]
    fn test_insert_page_after() {
        let mut doc = Document::from_pages("t", &["<p>a</p>", "<p>c</p>"]);
        let first = doc.pages()[0].id;
        let id = doc.insert_page_after(first, vec![Block::new("<p>b</p>")]).unwrap();
        assert_eq!(doc.page_index(id), Some(1));
        assert_eq!(doc.content(), "<p>a</p><p>b</p><p>c</p>");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut doc = Document::from_pages("t", &["", ""]);
        let a = doc.add_page();
        let b = doc.add_page();
        assert_ne!(a, b);
        assert!(doc.pages().iter().all(|p| p.id != PageId(0)));
    }

    #[test]
    fn test_unknown_page() {
        let mut doc = Document::new("t");
        assert!(matches!(
            doc.set_page_content(PageId(99), "<p>x</p>"),
            Err(Error::PageNotFound(PageId(99)))
        ));
        assert!(doc.insert_page_after(PageId(99), Vec::new()).is_err());
    }

    #[test]
    fn test_set_content_and_rename() {
        let mut doc = Document::new("t");
        let id = doc.pages()[0].id;
        doc.set_page_content(id, "<p>x</p><p>y</p>").unwrap();
        assert_eq!(doc.pages()[0].block_count(), 2);
        doc.rename("Quarterly report");
        assert_eq!(doc.title(), "Quarterly report");
    }
}
