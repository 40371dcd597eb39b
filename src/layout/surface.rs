//! Measurement capability between the pagination engine and whatever
//! renders the pages (browser DOM, offscreen estimate, test double).

use crate::document::Page;

/// Heights reported for one rendered page
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageMetrics {
    /// Height the content needs (a DOM element's `scrollHeight`)
    pub content_height: f32,
    /// Height the page can show (a DOM element's `clientHeight`)
    pub capacity_height: f32,
}

impl PageMetrics {
    pub fn new(content_height: f32, capacity_height: f32) -> Self {
        Self {
            content_height,
            capacity_height,
        }
    }

    pub fn overflows(&self) -> bool {
        self.content_height > self.capacity_height
    }

    pub fn fit(&self) -> PageFit {
        if self.overflows() {
            PageFit::Overflowing
        } else {
            PageFit::Fits
        }
    }
}

/// Per-page pagination state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFit {
    Fits,
    Overflowing,
}

/// Something that can report how tall a page's content renders.
///
/// The engine moves blocks on the owned [`Page`] model and then asks the
/// surface to measure the updated page again, so a surface only has to
/// render what it is handed. Returning `None` means the page has no
/// rendering to measure right now; the engine skips it.
pub trait PageSurface {
    fn measure(&mut self, page: &Page) -> Option<PageMetrics>;
}

impl<S: PageSurface + ?Sized> PageSurface for &mut S {
    fn measure(&mut self, page: &Page) -> Option<PageMetrics> {
        (**self).measure(page)
    }
}
