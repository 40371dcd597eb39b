//! WASM bindings for the editor session

mod surface;

pub use surface::JsSurface;

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::collab::CommentId;
use crate::document::PageId;
use crate::editing::{toolbar, ExecInvocation, FormatCommand, KeyChord, SelectionSnapshot};
use crate::collab::color_hex;
use crate::{Dispatched, Editor, EditorConfig, Error, PageSpan, Point, Rect};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Milliseconds since the Unix epoch
pub fn current_timestamp() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("Failed to serialize for JS: {}", e);
        "null".to_string()
    })
}

fn to_js(error: Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Result of a key press
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyOutcome {
    /// The browser's default action should be suppressed
    handled: bool,
    exec: Option<ExecInvocation>,
}

/// A collaborator cursor to draw over the page
#[derive(Serialize)]
struct CursorMark<'a> {
    name: &'a str,
    color: String,
    position: Point,
}

/// WASM-exposed editor wrapper
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor on the welcome document with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            editor: Editor::new(EditorConfig::default(), current_timestamp()),
        }
    }

    /// Create an editor from a JSON configuration object
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<WasmEditor, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(to_js)?;
        Ok(Self {
            editor: Editor::new(config, current_timestamp()),
        })
    }

    // ---- Pagination ----

    /// Call on every content mutation of a page
    #[wasm_bindgen(js_name = notifyMutation)]
    pub fn notify_mutation(&mut self) {
        self.editor.notify_mutation(current_timestamp());
    }

    /// Drive timers; `measure` is `(pageId, markup) => { scrollHeight, clientHeight }`.
    /// Returns the tick report as JSON.
    pub fn tick(&mut self, measure: &Function) -> String {
        let mut surface = JsSurface::new(measure);
        to_json(&self.editor.tick(current_timestamp(), &mut surface))
    }

    /// Paginate now; returns the pagination report as JSON
    pub fn paginate(&mut self, measure: &Function) -> String {
        let mut surface = JsSurface::new(measure);
        to_json(&self.editor.paginate_now(&mut surface))
    }

    // ---- Document ----

    /// `{ title, pages: [{ id, content }] }`
    pub fn document(&self) -> String {
        to_json(&self.editor.document().snapshot())
    }

    #[wasm_bindgen(js_name = setPageContent)]
    pub fn set_page_content(&mut self, page_id: u64, markup: &str) -> Result<(), JsValue> {
        self.editor
            .set_page_content(PageId(page_id), markup, current_timestamp())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = addPage)]
    pub fn add_page(&mut self) -> u64 {
        self.editor.add_page().0
    }

    pub fn rename(&mut self, title: &str) {
        self.editor.rename(title, current_timestamp());
    }

    /// `execCommand` invocation inserting pasted text, or undefined
    pub fn paste(&self, text: &str) -> Option<String> {
        self.editor.paste(text).map(|exec| to_json(&exec))
    }

    pub fn save(&mut self) -> Result<bool, JsValue> {
        self.editor.save(current_timestamp()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = isSaving)]
    pub fn is_saving(&self) -> bool {
        self.editor.is_saving()
    }

    // ---- Commands ----

    /// Validate a toolbar command and return its `execCommand` invocation
    #[wasm_bindgen(js_name = formatCommand)]
    pub fn format_command(&mut self, name: &str, value: Option<String>) -> Result<String, JsValue> {
        let command = FormatCommand::parse(name, value.as_deref()).map_err(to_js)?;
        Ok(to_json(&self.editor.apply_format(&command)))
    }

    #[wasm_bindgen(js_name = stepFontSize)]
    pub fn step_font_size(&mut self, delta: i32) -> String {
        to_json(&self.editor.step_font_size(delta))
    }

    /// Toolbar toggle states and the `saved` indicator as JSON
    #[wasm_bindgen(js_name = activeFormats)]
    pub fn active_formats(&self) -> String {
        to_json(self.editor.active_formats())
    }

    #[wasm_bindgen(js_name = fontSize)]
    pub fn font_size(&self) -> String {
        self.editor.font_size().to_string()
    }

    /// Handle a keydown; returns `{ handled, exec }` as JSON
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str, ctrl: bool, meta: bool, alt: bool, shift: bool) -> Result<String, JsValue> {
        let mut chars = key.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Ok(to_json(&KeyOutcome { handled: false, exec: None })),
        };
        let chord = KeyChord {
            key,
            ctrl,
            meta,
            alt,
            shift,
        };
        let outcome = match self.editor.handle_shortcut(&chord, current_timestamp()).map_err(to_js)? {
            None => KeyOutcome { handled: false, exec: None },
            Some(Dispatched::Handled) => KeyOutcome { handled: true, exec: None },
            Some(Dispatched::Exec(exec)) => KeyOutcome {
                handled: true,
                exec: Some(exec),
            },
        };
        Ok(to_json(&outcome))
    }

    // ---- View ----

    #[wasm_bindgen(js_name = toggleComments)]
    pub fn toggle_comments(&mut self) -> bool {
        self.editor.view_mut().toggle_comments()
    }

    #[wasm_bindgen(js_name = toggleChat)]
    pub fn toggle_chat(&mut self) -> bool {
        self.editor.view_mut().toggle_chat()
    }

    #[wasm_bindgen(js_name = toggleUserList)]
    pub fn toggle_user_list(&mut self) -> bool {
        self.editor.view_mut().toggle_user_list()
    }

    #[wasm_bindgen(js_name = toggleDarkMode)]
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.editor.view_mut().toggle_dark_mode()
    }

    #[wasm_bindgen(js_name = setFullscreen)]
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.editor.view_mut().set_fullscreen(fullscreen);
    }

    #[wasm_bindgen(js_name = viewState)]
    pub fn view_state(&self) -> String {
        to_json(self.editor.view())
    }

    /// Make a page current; returns its id
    #[wasm_bindgen(js_name = navigateToPage)]
    pub fn navigate_to_page(&mut self, index: usize) -> Result<u64, JsValue> {
        self.editor.navigate_to_page(index).map(|id| id.0).map_err(to_js)
    }

    /// Update the current page from the scroll position. `tops` and
    /// `heights` describe each page element in scroll-content coordinates.
    pub fn scroll(&mut self, tops: &[f32], heights: &[f32], scroll_top: f32, viewport_height: f32) -> usize {
        let spans: Vec<PageSpan> = tops
            .iter()
            .zip(heights)
            .map(|(&top, &height)| PageSpan::new(top, height))
            .collect();
        self.editor.scroll(&spans, scroll_top, viewport_height)
    }

    #[wasm_bindgen(js_name = setPageBounds)]
    pub fn set_page_bounds(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.editor.set_page_bounds(Rect::new(x, y, width, height));
    }

    // ---- Comments ----

    /// Report the current selection and its bounding box along with the
    /// editor's bounding box
    #[wasm_bindgen(js_name = updateSelection)]
    #[allow(clippy::too_many_arguments)]
    pub fn update_selection(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        editor_x: f32,
        editor_y: f32,
    ) {
        let snapshot = SelectionSnapshot {
            text: text.to_string(),
            rect: Rect::new(x, y, width, height),
        };
        let editor = Rect::new(editor_x, editor_y, 0.0, 0.0);
        self.editor.update_selection(Some(&snapshot), &editor);
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.editor.update_selection(None, &Rect::default());
    }

    /// Comment bubble anchor as JSON, or `null`
    pub fn selection(&self) -> String {
        to_json(&self.editor.selection())
    }

    #[wasm_bindgen(js_name = addComment)]
    pub fn add_comment(&mut self) -> Result<u64, JsValue> {
        self.editor
            .add_comment_from_selection(current_timestamp())
            .map(|id| id.0)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = replyToComment)]
    pub fn reply_to_comment(&mut self, comment_id: u64, text: &str) -> Result<u64, JsValue> {
        self.editor
            .reply_to_comment(CommentId(comment_id), text, current_timestamp())
            .map(|id| id.0)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = resolveComment)]
    pub fn resolve_comment(&mut self, comment_id: u64) -> Result<(), JsValue> {
        self.editor
            .resolve_comment(CommentId(comment_id))
            .map(|_| ())
            .map_err(to_js)
    }

    pub fn comments(&self) -> String {
        to_json(self.editor.comments().comments())
    }

    // ---- Chat and presence ----

    #[wasm_bindgen(js_name = sendChat)]
    pub fn send_chat(&mut self, text: &str) -> Result<u64, JsValue> {
        self.editor
            .send_chat(text, current_timestamp())
            .map(|id| id.0)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = chatMessages)]
    pub fn chat_messages(&self) -> String {
        to_json(self.editor.chat().messages())
    }

    pub fn collaborators(&self) -> String {
        to_json(&self.editor.presence().collaborators())
    }

    /// `[{ name, color, position }]` for every collaborator with a visible cursor
    pub fn cursors(&self) -> String {
        let marks: Vec<CursorMark> = self
            .editor
            .presence()
            .cursors()
            .map(|(collab, position)| CursorMark {
                name: &collab.name,
                color: color_hex(collab.color),
                position,
            })
            .collect();
        to_json(&marks)
    }

    /// Notifications raised since the last call, as a JSON array
    #[wasm_bindgen(js_name = takeNotifications)]
    pub fn take_notifications(&mut self) -> String {
        to_json(&self.editor.take_notifications())
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_name = tableMarkup)]
pub fn table_markup(rows: usize, cols: usize) -> Option<String> {
    toolbar::table_markup(rows, cols)
}

#[wasm_bindgen(js_name = shareLink)]
pub fn share_link(document_id: &str) -> String {
    toolbar::share_link(document_id)
}

#[wasm_bindgen(js_name = fontFamilies)]
pub fn font_families() -> String {
    to_json(toolbar::FONT_FAMILIES)
}

#[wasm_bindgen(js_name = fontSizes)]
pub fn font_sizes() -> String {
    to_json(toolbar::FONT_SIZES)
}
