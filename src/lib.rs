//! collab-pages: the core of a paged, collaborative rich-text editor
//!
//! This crate provides:
//! - A document model of pages holding block elements
//! - A pagination engine that moves trailing blocks off overflowing pages
//!   onto new pages, behind a pluggable measurement surface
//! - Editor session state: comments, team chat, collaborator presence,
//!   panels, save tracking and notifications
//! - WASM bindings through which a browser shell drives the session

pub mod collab;
pub mod config;
pub mod document;
pub mod editing;
pub mod error;
pub mod layout;
pub mod notify;
pub mod save;
pub mod view;
pub mod wasm;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

// Re-export WASM types for direct use
pub use wasm::WasmEditor;

// Re-export primary types
pub use collab::{
    ChatLog, ChatResponder, Comment, CommentId, CommentThreads, MessageId, PresenceSource, PresenceTracker,
};
pub use config::EditorConfig;
pub use document::{Block, BlockKind, Document, Page, PageId};
pub use editing::{EditorCommand, ExecInvocation, FormatCommand, KeyChord, SelectionAnchor, SelectionSnapshot};
pub use error::{Error, Result};
pub use layout::{EstimatedSurface, LayoutConstraints, PageSurface, PaginationEngine, PaginationReport};
pub use notify::{Notification, NotificationAction};
pub use view::{PageSpan, ViewState};

use collab::{SimulatedPresence, SimulatedResponder, CURRENT_USER};
use editing::{ActiveFormats, FontSizeStepper};
use layout::Debouncer;
use notify::NotificationQueue;
use save::SaveTracker;

/// Editor coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Editor rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// How a key chord or command was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// The session took care of it
    Handled,
    /// The shell must run this on its editing surface
    Exec(ExecInvocation),
}

/// What a call to [`Editor::tick`] did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    /// Present when the debounce fired and pagination ran
    pub pagination: Option<PaginationReport>,
    /// A save finished during this tick
    pub saved: bool,
    pub chat_delivered: usize,
    pub presence_events: usize,
}

/// The main editor state combining all components
pub struct Editor {
    config: EditorConfig,
    document: Document,
    engine: PaginationEngine,
    debounce: Debouncer,
    comments: CommentThreads,
    chat: ChatLog,
    responder: Box<dyn ChatResponder>,
    presence: PresenceTracker,
    presence_source: Box<dyn PresenceSource>,
    page_bounds: Rect,
    view: ViewState,
    save: SaveTracker,
    notifications: NotificationQueue,
    selection: Option<SelectionAnchor>,
    font_size: FontSizeStepper,
    formats: ActiveFormats,
}

impl Editor {
    /// Create a session on the welcome document with sample comments and chat
    pub fn new(config: EditorConfig, now_ms: u64) -> Self {
        let mut editor = Self::with_document(config, Document::default());
        editor.comments = CommentThreads::demo();
        editor.chat = ChatLog::demo(now_ms);
        editor
    }

    /// Create a session on an existing document with empty side panels
    pub fn with_document(config: EditorConfig, document: Document) -> Self {
        let c = config.constraints;
        Self {
            engine: PaginationEngine::new(config.max_pagination_passes),
            debounce: Debouncer::new(config.debounce_ms),
            comments: CommentThreads::new(),
            chat: ChatLog::new(),
            responder: Box::new(SimulatedResponder::new(
                config.seed,
                config.chat_reply_probability,
                config.chat_reply_delay_ms,
            )),
            presence: PresenceTracker::new(),
            presence_source: Box::new(SimulatedPresence::new(
                config.seed.wrapping_add(1),
                config.presence_interval_ms,
                config.activity_interval_ms,
            )),
            page_bounds: Rect::new(c.margin_left, c.margin_top, c.content_width(), c.content_height()),
            view: ViewState::new(config.prefers_dark),
            save: SaveTracker::new(config.save_latency_ms, config.autosave_interval_ms),
            notifications: NotificationQueue::default(),
            selection: None,
            font_size: FontSizeStepper::default(),
            formats: ActiveFormats::default(),
            document,
            config,
        }
    }

    /// Replace the simulated chat replies
    pub fn set_chat_responder(&mut self, responder: Box<dyn ChatResponder>) {
        self.responder = responder;
    }

    /// Replace the simulated collaborators
    pub fn set_presence_source(&mut self, source: Box<dyn PresenceSource>) {
        self.presence_source = source;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn comments(&self) -> &CommentThreads {
        &self.comments
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    pub fn selection(&self) -> Option<&SelectionAnchor> {
        self.selection.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.save.is_saving()
    }

    /// Toolbar toggle states and the saved indicator
    pub fn active_formats(&self) -> &ActiveFormats {
        &self.formats
    }

    /// Height-estimating surface for the configured page and font, for
    /// hosts without a layout engine
    pub fn estimated_surface(&self) -> EstimatedSurface {
        EstimatedSurface::new(self.config.constraints, self.config.font.clone())
    }

    pub fn pagination_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    // ---- Pagination ----

    /// Page content changed; pagination runs once things go quiet
    pub fn notify_mutation(&mut self, now_ms: u64) {
        self.debounce.schedule(now_ms);
        self.mark_edited(now_ms);
    }

    fn mark_edited(&mut self, now_ms: u64) {
        self.save.rearm_autosave(now_ms);
        self.formats.mark_unsaved();
    }

    /// Advance timers: debounced pagination, save completion, autosave,
    /// chat replies and presence
    pub fn tick<S>(&mut self, now_ms: u64, surface: &mut S) -> TickReport
    where
        S: PageSurface + ?Sized,
    {
        let mut report = TickReport::default();

        if self.debounce.poll(now_ms) {
            report.pagination = Some(self.paginate_now(surface));
        }

        if self.save.poll(now_ms) {
            self.formats.mark_saved();
            self.notifications.push(Notification::document_saved());
            report.saved = true;
        }
        if self.save.autosave_due(now_ms) {
            if let Err(e) = self.save(now_ms) {
                warn!("Autosave failed: {}", e);
            }
        }

        report.chat_delivered = self.chat.deliver_due(now_ms);

        let events = self.presence_source.poll(now_ms, self.page_bounds);
        report.presence_events = events.len();
        for event in events {
            self.presence.apply(event, now_ms);
        }
        self.presence.prune_stale(now_ms, self.config.cursor_max_age_ms);

        report
    }

    /// Paginate immediately, dropping any pending debounce
    pub fn paginate_now<S>(&mut self, surface: &mut S) -> PaginationReport
    where
        S: PageSurface + ?Sized,
    {
        self.debounce.cancel();
        let report = self.engine.paginate(&mut self.document, surface);
        if let Some(newest) = report.newest_page() {
            self.notifications.push(Notification::pages_created(newest));
        }
        report
    }

    // ---- Document ----

    /// Append a page and make it current
    pub fn add_page(&mut self) -> PageId {
        let id = self.document.add_page();
        self.view.current_page = self.document.page_count() - 1;
        self.notifications.push(Notification::page_added());
        id
    }

    /// Store edited page markup and schedule pagination
    pub fn set_page_content(&mut self, page: PageId, markup: &str, now_ms: u64) -> Result<()> {
        self.document.set_page_content(page, markup)?;
        self.notify_mutation(now_ms);
        Ok(())
    }

    pub fn rename(&mut self, title: &str, now_ms: u64) {
        self.document.rename(title);
        self.mark_edited(now_ms);
        self.notifications.push(Notification::document_renamed(title));
    }

    /// Markup insertion for pasted plain text; `None` when nothing but blank lines was pasted
    pub fn paste(&self, text: &str) -> Option<ExecInvocation> {
        let markup = document::markup::paste_to_markup(text);
        if markup.is_empty() {
            return None;
        }
        Some(FormatCommand::InsertHtml(markup).invocation())
    }

    /// Make page `index` current
    pub fn navigate_to_page(&mut self, index: usize) -> Result<PageId> {
        let page = self
            .document
            .page_at(index)
            .ok_or(Error::PageOutOfRange(index, self.document.page_count()))?;
        self.view.current_page = index;
        Ok(page.id)
    }

    /// Follow scrolling; returns the current page index
    pub fn scroll(&mut self, spans: &[PageSpan], scroll_top: f32, viewport_height: f32) -> usize {
        self.view.update_from_scroll(spans, scroll_top, viewport_height)
    }

    /// Rectangle of the current page's content area, used to place collaborator cursors
    pub fn set_page_bounds(&mut self, bounds: Rect) {
        self.page_bounds = bounds;
    }

    // ---- Commands ----

    pub fn apply_format(&mut self, command: &FormatCommand) -> ExecInvocation {
        if let FormatCommand::FontSize(size) = command {
            self.font_size.select(size);
        }
        self.formats.apply(command);
        self.notifications.push(Notification::format_applied(command.exec_name()));
        command.invocation()
    }

    /// Step the toolbar font size and apply it
    pub fn step_font_size(&mut self, delta: i32) -> ExecInvocation {
        let size = self.font_size.step(delta);
        self.apply_format(&FormatCommand::FontSize(size.to_string()))
    }

    pub fn font_size(&self) -> &'static str {
        self.font_size.current()
    }

    pub fn dispatch(&mut self, command: EditorCommand, now_ms: u64) -> Result<Dispatched> {
        match command {
            EditorCommand::Save => {
                self.save(now_ms)?;
            }
            EditorCommand::ToggleComments => {
                self.view.toggle_comments();
            }
            EditorCommand::ToggleChat => {
                self.view.toggle_chat();
            }
            EditorCommand::AddPage => {
                self.add_page();
            }
            EditorCommand::Format(format) => return Ok(Dispatched::Exec(self.apply_format(&format))),
        }
        Ok(Dispatched::Handled)
    }

    /// Run whatever `chord` is bound to; `None` leaves the key to the browser
    pub fn handle_shortcut(&mut self, chord: &KeyChord, now_ms: u64) -> Result<Option<Dispatched>> {
        match editing::shortcut(chord) {
            Some(command) => {
                debug!("Shortcut {:?} -> {:?}", chord, command);
                self.dispatch(command, now_ms).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Start a save unless nothing changed since the last one.
    /// Returns whether a save was started.
    pub fn save(&mut self, now_ms: u64) -> Result<bool> {
        let snapshot = self.document.snapshot().to_json()?;
        Ok(self.save.request(snapshot, now_ms))
    }

    // ---- Comments ----

    /// Follow the browser selection. `None` or a blank selection clears the anchor.
    pub fn update_selection(&mut self, snapshot: Option<&SelectionSnapshot>, editor: &Rect) {
        self.selection = snapshot.and_then(|s| SelectionAnchor::from_snapshot(s, editor));
    }

    /// Comment on the selected text, opening the comment panel
    pub fn add_comment_from_selection(&mut self, now_ms: u64) -> Result<CommentId> {
        let anchor = self.selection.take().ok_or(Error::NoSelection)?;
        let content = anchor.comment_text(self.config.comment_excerpt_chars);
        let id = self.comments.add(CURRENT_USER, &content, now_ms);
        self.view.open_comments();
        self.notifications.push(Notification::comment_added());
        Ok(id)
    }

    pub fn reply_to_comment(&mut self, comment: CommentId, text: &str, now_ms: u64) -> Result<CommentId> {
        let id = self.comments.reply(comment, CURRENT_USER, text, now_ms)?;
        self.notifications.push(Notification::reply_added());
        Ok(id)
    }

    pub fn resolve_comment(&mut self, comment: CommentId) -> Result<Comment> {
        let resolved = self.comments.resolve(comment)?;
        self.notifications.push(Notification::comment_resolved());
        Ok(resolved)
    }

    // ---- Chat ----

    pub fn send_chat(&mut self, text: &str, now_ms: u64) -> Result<MessageId> {
        self.chat.send(text, now_ms, self.responder.as_mut())
    }

    /// Notifications raised since the last call, oldest first
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{PresenceEvent, ScheduledReply, UserId, REPLY_TEXT};
    use crate::layout::PageMetrics;

    /// Each block is 10px tall; pages hold `capacity` blocks
    struct BlockCountSurface {
        capacity: usize,
    }

    impl PageSurface for BlockCountSurface {
        fn measure(&mut self, page: &Page) -> Option<PageMetrics> {
            Some(PageMetrics::new(
                page.block_count() as f32 * 10.0,
                self.capacity as f32 * 10.0,
            ))
        }
    }

    struct QuietPresence;

    impl PresenceSource for QuietPresence {
        fn poll(&mut self, _now_ms: u64, _bounds: Rect) -> Vec<PresenceEvent> {
            Vec::new()
        }
    }

    struct AlwaysReply;

    impl ChatResponder for AlwaysReply {
        fn respond(&mut self, _message: &collab::ChatMessage, now_ms: u64) -> Option<ScheduledReply> {
            Some(ScheduledReply {
                due_ms: now_ms + 3_000,
                sender: "Jane Smith".into(),
                content: REPLY_TEXT.into(),
            })
        }
    }

    fn editor_with(pages: &[&str]) -> Editor {
        let doc = Document::from_pages("Test", pages);
        let mut editor = Editor::with_document(EditorConfig::default(), doc);
        editor.set_presence_source(Box::new(QuietPresence));
        editor
    }

    fn titles(editor: &mut Editor) -> Vec<String> {
        editor.take_notifications().into_iter().map(|n| n.title).collect()
    }

    #[test]
    fn test_create_editor() {
        let editor = Editor::new(EditorConfig::default(), 10_000_000);
        assert_eq!(editor.document().page_count(), 1);
        assert_eq!(editor.comments().len(), 2);
        assert_eq!(editor.chat().messages().len(), 3);
        assert!(!editor.view().chat_open);
    }

    #[test]
    fn test_mutation_burst_paginates_once() {
        let mut editor = editor_with(&["<p>1</p>"]);
        let page = editor.document().pages()[0].id;
        let mut surface = BlockCountSurface { capacity: 3 };

        for i in 0..5u64 {
            editor
                .set_page_content(page, "<p>1</p><p>2</p><p>3</p><p>4</p><p>5</p>", i * 100)
                .unwrap();
            assert!(editor.tick(i * 100 + 50, &mut surface).pagination.is_none());
        }

        let report = editor.tick(900, &mut surface).pagination.unwrap();
        assert_eq!(report.relocations.len(), 1);
        assert!(editor.tick(2_000, &mut surface).pagination.is_none());

        let notes = editor.take_notifications();
        let pages = editor.document().pages();
        assert_eq!(pages[0].content(), "<p>1</p><p>2</p><p>3</p>");
        assert_eq!(pages[1].content(), "<p>4</p><p>5</p>");
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0], Notification::pages_created(pages[1].id));
    }

    #[test]
    fn test_paginate_now_cancels_debounce() {
        let mut editor = editor_with(&["<p>a</p><p>b</p>"]);
        editor.notify_mutation(0);
        let report = editor.paginate_now(&mut BlockCountSurface { capacity: 5 });
        assert!(!report.has_new_pages());
        assert!(!editor.pagination_pending());
        assert!(editor.take_notifications().is_empty());
    }

    #[test]
    fn test_save_cycle() {
        let mut editor = editor_with(&["<p>a</p>"]);
        let mut surface = BlockCountSurface { capacity: 5 };

        assert!(editor.save(1_000).unwrap());
        assert!(editor.is_saving());
        assert!(!editor.save(1_100).unwrap());

        assert!(!editor.tick(1_799, &mut surface).saved);
        assert!(editor.tick(1_800, &mut surface).saved);
        assert_eq!(titles(&mut editor), vec!["Document saved"]);

        // Nothing changed since
        assert!(!editor.save(2_000).unwrap());
        editor.rename("Renamed", 2_050);
        assert!(editor.save(2_100).unwrap());
    }

    #[test]
    fn test_autosave() {
        let mut editor = editor_with(&["<p>a</p>"]);
        let mut surface = BlockCountSurface { capacity: 5 };
        editor.tick(0, &mut surface);
        assert!(!editor.is_saving());
        editor.tick(30_000, &mut surface);
        assert!(editor.is_saving());
        assert!(editor.tick(30_800, &mut surface).saved);
    }

    #[test]
    fn test_shortcuts_dispatch() {
        let mut editor = editor_with(&["<p>a</p>"]);

        let outcome = editor.handle_shortcut(&KeyChord::ctrl_alt('p'), 0).unwrap();
        assert_eq!(outcome, Some(Dispatched::Handled));
        assert_eq!(editor.document().page_count(), 2);
        assert_eq!(editor.view().current_page, 1);

        let outcome = editor.handle_shortcut(&KeyChord::ctrl('b'), 0).unwrap();
        assert_eq!(outcome, Some(Dispatched::Exec(FormatCommand::Bold.invocation())));

        editor.handle_shortcut(&KeyChord::ctrl_alt('m'), 0).unwrap();
        assert!(editor.view().chat_open);

        assert_eq!(editor.handle_shortcut(&KeyChord::ctrl('q'), 0).unwrap(), None);
        assert_eq!(
            titles(&mut editor),
            vec!["New page added", "Applied bold formatting"]
        );
    }

    #[test]
    fn test_navigate_to_page() {
        let mut editor = editor_with(&["<p>a</p>", "<p>b</p>"]);
        let second = editor.document().pages()[1].id;
        assert_eq!(editor.navigate_to_page(1).unwrap(), second);
        assert_eq!(editor.view().current_page, 1);
        assert!(matches!(editor.navigate_to_page(2), Err(Error::PageOutOfRange(2, 2))));
        assert_eq!(editor.view().current_page, 1);
    }

    #[test]
    fn test_comment_from_selection() {
        let mut editor = editor_with(&["<p>a</p>"]);
        assert!(matches!(editor.add_comment_from_selection(0), Err(Error::NoSelection)));

        let editor_rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        let snapshot = SelectionSnapshot {
            text: "important words".into(),
            rect: Rect::new(10.0, 10.0, 50.0, 12.0),
        };
        editor.update_selection(Some(&snapshot), &editor_rect);
        assert!(editor.selection().is_some());
        editor.view_mut().toggle_chat();

        let id = editor.add_comment_from_selection(5).unwrap();
        let comment = editor.comments().get(id).unwrap();
        assert_eq!(comment.content, "Comment on: \"important words\"");
        assert_eq!(comment.author, CURRENT_USER);
        assert!(editor.view().comments_open);
        assert!(!editor.view().chat_open);
        assert!(editor.selection().is_none());

        editor.reply_to_comment(id, "agreed", 6).unwrap();
        editor.resolve_comment(id).unwrap();
        assert!(editor.comments().is_empty());
        assert_eq!(
            titles(&mut editor),
            vec!["Comment added", "Reply added", "Comment resolved"]
        );
    }

    #[test]
    fn test_blank_selection_clears_anchor() {
        let mut editor = editor_with(&["<p>a</p>"]);
        let rect = Rect::default();
        let snapshot = SelectionSnapshot {
            text: "word".into(),
            rect,
        };
        editor.update_selection(Some(&snapshot), &rect);
        editor.update_selection(None, &rect);
        assert!(editor.selection().is_none());
    }

    #[test]
    fn test_chat_reply_delivered_on_tick() {
        let mut editor = editor_with(&["<p>a</p>"]);
        editor.set_chat_responder(Box::new(AlwaysReply));
        let mut surface = BlockCountSurface { capacity: 5 };

        editor.send_chat("status update", 1_000).unwrap();
        assert_eq!(editor.tick(3_999, &mut surface).chat_delivered, 0);
        assert_eq!(editor.tick(4_000, &mut surface).chat_delivered, 1);
        assert_eq!(editor.chat().messages().len(), 2);
        assert!(matches!(editor.send_chat("", 5_000), Err(Error::EmptyMessage)));
    }

    #[test]
    fn test_presence_on_tick() {
        let doc = Document::from_pages("Test", &["<p>a</p>"]);
        let mut editor = Editor::with_document(EditorConfig::default(), doc);
        let bounds = Rect::new(0.0, 0.0, 500.0, 500.0);
        editor.set_page_bounds(bounds);
        let mut surface = BlockCountSurface { capacity: 5 };

        editor.tick(0, &mut surface);
        assert_eq!(editor.presence().len(), 2);
        editor.tick(3_000, &mut surface);
        let cursor = editor.presence().get(UserId(1)).unwrap().cursor.unwrap();
        assert!(bounds.contains_point(cursor));
    }

    #[test]
    fn test_paste() {
        let editor = editor_with(&["<p>a</p>"]);
        let exec = editor.paste("one\n\ntwo").unwrap();
        assert_eq!(exec.command, "insertHTML");
        assert_eq!(exec.value.as_deref(), Some("<p>one</p><p>two</p>"));
        assert!(editor.paste("\n  \n").is_none());
    }

    #[test]
    fn test_font_size_step() {
        let mut editor = editor_with(&["<p>a</p>"]);
        let exec = editor.step_font_size(1);
        assert_eq!(exec.value.as_deref(), Some("12"));
        assert_eq!(editor.font_size(), "12");
    }

    #[test]
    fn test_font_size_pick_then_step() {
        let mut editor = editor_with(&["<p>a</p>"]);
        editor.apply_format(&FormatCommand::FontSize("24".into()));
        assert_eq!(editor.font_size(), "24");
        let exec = editor.step_font_size(1);
        assert_eq!(exec.value.as_deref(), Some("30"));
    }

    #[test]
    fn test_typed_markup_is_stored_verbatim() {
        let mut editor = editor_with(&["<p>a</p>"]);
        let page = editor.document().pages()[0].id;
        for typed in ["Hello <b>world</b> again", "<h2>Plan</h2>First <em>draft</em><p>Body</p>"] {
            editor.set_page_content(page, typed, 0).unwrap();
            assert_eq!(editor.document().page(page).map(Page::content).as_deref(), Some(typed));
        }
    }

    #[test]
    fn test_active_formats_follow_saves() {
        let mut editor = editor_with(&["<p>a</p>"]);
        let mut surface = BlockCountSurface { capacity: 5 };
        assert!(editor.active_formats().is_saved());

        editor.apply_format(&FormatCommand::JustifyCenter);
        editor.apply_format(&FormatCommand::Bold);
        assert!(editor.active_formats().align_center);
        assert!(editor.active_formats().bold);
        assert!(!editor.active_formats().is_saved());

        editor.save(1_000).unwrap();
        editor.tick(1_800, &mut surface);
        assert!(editor.active_formats().is_saved());

        editor.apply_format(&FormatCommand::JustifyLeft);
        assert!(editor.active_formats().align_left);
        assert!(!editor.active_formats().align_center);
        editor.rename("Draft", 2_000);
        assert!(!editor.active_formats().is_saved());
    }

    #[test]
    fn test_edit_restarts_autosave() {
        let mut editor = editor_with(&["<p>a</p>"]);
        let mut surface = BlockCountSurface { capacity: 5 };
        editor.tick(0, &mut surface);

        editor.notify_mutation(20_000);
        editor.tick(30_000, &mut surface);
        assert!(!editor.is_saving());
        editor.rename("Later", 40_000);
        editor.tick(50_000, &mut surface);
        assert!(!editor.is_saving());
        editor.tick(70_000, &mut surface);
        assert!(editor.is_saving());
    }

    struct OneMove;

    impl PresenceSource for OneMove {
        fn poll(&mut self, now_ms: u64, _bounds: Rect) -> Vec<PresenceEvent> {
            if now_ms > 0 {
                return Vec::new();
            }
            vec![
                PresenceEvent::Joined { id: UserId(7), name: "Sam".into() },
                PresenceEvent::CursorMoved {
                    id: UserId(7),
                    position: Point { x: 1.0, y: 2.0 },
                },
            ]
        }
    }

    #[test]
    fn test_idle_cursor_hidden_on_tick() {
        let mut editor = editor_with(&["<p>a</p>"]);
        editor.set_presence_source(Box::new(OneMove));
        let mut surface = BlockCountSurface { capacity: 5 };

        editor.tick(0, &mut surface);
        assert_eq!(editor.presence().cursors().count(), 1);
        editor.tick(10_000, &mut surface);
        assert_eq!(editor.presence().cursors().count(), 1);
        editor.tick(10_001, &mut surface);
        assert_eq!(editor.presence().cursors().count(), 0);
        assert_eq!(editor.presence().len(), 1);
    }

    #[test]
    fn test_estimated_surface_uses_configured_font() {
        let mut config = EditorConfig::default();
        config.font = layout::FontMetrics::uniform(30.0, 10.0);
        let editor = Editor::with_document(config, Document::from_pages("Test", &["<p>a</p>"]));
        let mut surface = editor.estimated_surface();
        let page = &editor.document().pages()[0];
        // one 30px line plus 30px of paragraph spacing inside the margins
        let c = editor.config().constraints;
        let metrics = surface.measure(page).unwrap();
        assert_eq!(metrics.content_height, c.margin_top + c.margin_bottom + 60.0);
    }
}
