//! Page measurement delegated to the browser

use js_sys::{Function, Reflect};
use wasm_bindgen::JsValue;

use crate::document::Page;
use crate::layout::{PageMetrics, PageSurface};

/// Measures pages through a JS callback `(pageId, markup) => { scrollHeight, clientHeight }`.
///
/// The callback receives the page's current markup, so it must lay that
/// markup out (for instance in the page's own element) before reading the
/// heights. Anything other than an object with both numbers means the
/// page could not be measured.
pub struct JsSurface<'a> {
    callback: &'a Function,
}

impl<'a> JsSurface<'a> {
    pub fn new(callback: &'a Function) -> Self {
        Self { callback }
    }
}

fn number_field(object: &JsValue, name: &str) -> Option<f32> {
    Reflect::get(object, &JsValue::from_str(name))
        .ok()?
        .as_f64()
        .map(|v| v as f32)
}

impl PageSurface for JsSurface<'_> {
    fn measure(&mut self, page: &Page) -> Option<PageMetrics> {
        let result = self
            .callback
            .call2(
                &JsValue::NULL,
                &JsValue::from_f64(page.id.0 as f64),
                &JsValue::from_str(&page.content()),
            )
            .ok()?;
        if !result.is_object() {
            return None;
        }
        Some(PageMetrics::new(
            number_field(&result, "scrollHeight")?,
            number_field(&result, "clientHeight")?,
        ))
    }
}
