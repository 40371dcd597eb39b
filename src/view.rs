//! Panel visibility, theme and the page the user is looking at

use serde::Serialize;

/// Vertical extent of a rendered page in scroll-content coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpan {
    pub top: f32,
    pub height: f32,
}

impl PageSpan {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    fn contains(&self, y: f32) -> bool {
        self.top <= y && y <= self.top + self.height
    }
}

/// Index of the page under the middle of the viewport. When spans touch,
/// the later page wins.
pub fn page_at_viewport_center(spans: &[PageSpan], scroll_top: f32, viewport_height: f32) -> Option<usize> {
    let center = scroll_top + viewport_height / 2.0;
    spans.iter().rposition(|span| span.contains(center))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub comments_open: bool,
    pub chat_open: bool,
    pub user_list_open: bool,
    pub dark_mode: bool,
    pub fullscreen: bool,
    pub current_page: usize,
}

impl ViewState {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            dark_mode: prefers_dark,
            ..Default::default()
        }
    }

    /// Opening the comment panel closes chat
    pub fn toggle_comments(&mut self) -> bool {
        self.comments_open = !self.comments_open;
        if self.comments_open {
            self.chat_open = false;
        }
        self.comments_open
    }

    /// Opening chat closes the comment panel
    pub fn toggle_chat(&mut self) -> bool {
        self.chat_open = !self.chat_open;
        if self.chat_open {
            self.comments_open = false;
        }
        self.chat_open
    }

    pub fn open_comments(&mut self) {
        if !self.comments_open {
            self.toggle_comments();
        }
    }

    pub fn toggle_user_list(&mut self) -> bool {
        self.user_list_open = !self.user_list_open;
        self.user_list_open
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Mirror the browser's fullscreen state
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    /// Track the page under the viewport centre; unchanged when none is
    pub fn update_from_scroll(&mut self, spans: &[PageSpan], scroll_top: f32, viewport_height: f32) -> usize {
        if let Some(index) = page_at_viewport_center(spans, scroll_top, viewport_height) {
            self.current_page = index;
        }
        self.current_page
    }
}
