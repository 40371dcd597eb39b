//! Pagination engine: keeps every page within its height by moving
//! trailing blocks onto freshly inserted pages

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::document::{Block, Document, Page, PageId};
use crate::layout::surface::{PageFit, PageSurface};

/// Indentation width for lists and quotes
pub const INDENT_WIDTH: f32 = 24.0;

/// Default ceiling on repeated pagination passes
pub const DEFAULT_MAX_PASSES: usize = 16;

/// Page geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConstraints {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self {
            page_width: 794.0, // A4 width at 96 DPI
            page_height: 842.0,
            margin_top: 48.0,
            margin_bottom: 48.0,
            margin_left: 48.0,
            margin_right: 48.0,
        }
    }
}

impl LayoutConstraints {
    /// Get usable content width
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Get usable content height per page
    pub fn content_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }
}

/// Blocks moved from one page onto a page created for them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relocation {
    pub source: PageId,
    pub created: PageId,
    pub moved_blocks: usize,
}

/// What a pagination run did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaginationReport {
    /// Page splits in the order they happened
    pub relocations: Vec<Relocation>,
    /// Pages left overflowing because they hold a single oversized block
    pub stuck: Vec<PageId>,
    /// Pages the surface could not measure
    pub unmeasured: Vec<PageId>,
    /// Number of passes over the document
    pub passes: usize,
}

impl PaginationReport {
    pub fn has_new_pages(&self) -> bool {
        !self.relocations.is_empty()
    }

    pub fn created_pages(&self) -> impl Iterator<Item = PageId> + '_ {
        self.relocations.iter().map(|r| r.created)
    }

    /// The most recently created page
    pub fn newest_page(&self) -> Option<PageId> {
        self.relocations.last().map(|r| r.created)
    }

    /// Fold a later pass into this report. Stuck and unmeasured pages
    /// describe the latest state, so they are replaced rather than appended.
    fn absorb(&mut self, pass: PaginationReport) {
        self.relocations.extend(pass.relocations);
        self.stuck = pass.stuck;
        self.unmeasured = pass.unmeasured;
        self.passes += pass.passes;
    }
}

/// Remove trailing blocks from an overflowing page until it fits or only
/// one block is left, returning the removed blocks in document order.
///
/// Every removal is followed by a fresh measurement, so a page with N
/// blocks is measured at most N times and loses at most N-1 blocks.
/// Returns nothing when the page fits, holds a single block, or cannot
/// be measured.
pub fn split_overflow<S>(page: &mut Page, surface: &mut S) -> SmallVec<[Block; 4]>
where
    S: PageSurface + ?Sized,
{
    let mut removed: SmallVec<[Block; 4]> = SmallVec::new();

    while surface.measure(page).is_some_and(|m| m.overflows()) {
        match page.pop_trailing_block() {
            Some(block) => removed.push(block),
            None => break,
        }
    }

    // Collected last-first
    removed.reverse();
    removed
}

/// Drives overflow passes over a whole document
#[derive(Debug, Clone)]
pub struct PaginationEngine {
    max_passes: usize,
}

impl Default for PaginationEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PASSES)
    }
}

impl PaginationEngine {
    pub fn new(max_passes: usize) -> Self {
        Self {
            max_passes: max_passes.max(1),
        }
    }

    /// One scan over the document in reading order.
    ///
    /// An overflowing page is split and the removed blocks become a new page
    /// directly after it. The scan then continues onto that new page, so
    /// blocks cascade forward until every page fits or is stuck.
    pub fn run_pass<S>(&self, document: &mut Document, surface: &mut S) -> PaginationReport
    where
        S: PageSurface + ?Sized,
    {
        let mut report = PaginationReport {
            passes: 1,
            ..Default::default()
        };

        let mut index = 0;
        while let Some(page) = document.page_at_mut(index) {
            let source = page.id;

            match surface.measure(page).map(|m| m.fit()) {
                None => {
                    warn!("Page {} has no rendering to measure, skipping", source);
                    report.unmeasured.push(source);
                }
                Some(PageFit::Fits) => {}
                Some(PageFit::Overflowing) => {
                    let moved = split_overflow(page, surface);

                    if moved.is_empty() {
                        warn!("Page {} overflows with a single block, leaving it unsplit", source);
                        report.stuck.push(source);
                    } else {
                        let still_overflowing = surface.measure(page).is_some_and(|m| m.overflows());
                        let moved_blocks = moved.len();
                        let created = document.insert_page_at(index + 1, moved.into_vec());
                        debug!(
                            "Moved {} block(s) from page {} to new page {}",
                            moved_blocks, source, created
                        );
                        report.relocations.push(Relocation {
                            source,
                            created,
                            moved_blocks,
                        });
                        if still_overflowing {
                            warn!("Page {} overflows with a single block, leaving it unsplit", source);
                            report.stuck.push(source);
                        }
                    }
                }
            }

            index += 1;
        }

        report
    }

    /// Repeat passes until one creates no pages, up to the pass ceiling
    pub fn paginate<S>(&self, document: &mut Document, surface: &mut S) -> PaginationReport
    where
        S: PageSurface + ?Sized,
    {
        let mut report = PaginationReport::default();

        for _ in 0..self.max_passes {
            let pass = self.run_pass(document, surface);
            let created = pass.has_new_pages();
            report.absorb(pass);
            if !created {
                if report.has_new_pages() {
                    info!(
                        "Pagination created {} page(s) in {} pass(es)",
                        report.relocations.len(),
                        report.passes
                    );
                }
                return report;
            }
        }

        warn!(
            "Pagination stopped after {} passes with pages still being created",
            self.max_passes
        );
        report
    }

    /// Fit state of every page the surface can measure
    pub fn fit_states<S>(&self, document: &Document, surface: &mut S) -> Vec<(PageId, PageFit)>
    where
        S: PageSurface + ?Sized,
    {
        document
            .pages()
            .iter()
            .filter_map(|page| surface.measure(page).map(|m| (page.id, m.fit())))
            .collect()
    }
}
