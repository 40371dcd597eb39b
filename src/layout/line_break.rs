//! Line breaking estimate and the surface built on it

use rustc_hash::{FxHashMap, FxHasher};
use std::hash::{Hash, Hasher};
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

use crate::document::{Block, BlockKind, Page};
use crate::layout::engine::{LayoutConstraints, INDENT_WIDTH};
use crate::layout::font::FontMetrics;
use crate::layout::surface::{PageMetrics, PageSurface};

/// Cached block heights are dropped wholesale past this many entries
const HEIGHT_CACHE_LIMIT: usize = 4096;

/// Counts how many lines text wraps into at a given width
#[derive(Debug, Default, Clone, Copy)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Number of lines `text` occupies. Every `\n` starts a new line and
    /// empty text still occupies one.
    pub fn count_lines(&self, text: &str, max_width: f32, font: &FontMetrics, scale: f32) -> usize {
        text.split('\n')
            .map(|segment| self.wrap_segment(segment, max_width, font, scale))
            .sum()
    }

    fn wrap_segment(&self, segment: &str, max_width: f32, font: &FontMetrics, scale: f32) -> usize {
        if segment.is_empty() {
            return 1;
        }

        let measure = |s: &str| font.text_width(s) * scale;
        let mut lines = 1;
        let mut x: f32 = 0.0;
        let mut piece_start = 0;

        for (break_at, opportunity) in linebreaks(segment) {
            let piece = &segment[piece_start..break_at];
            piece_start = break_at;

            let full = measure(piece);
            // Trailing spaces may hang past the margin
            let visible = measure(piece.trim_end());

            if x + visible > max_width && x > 0.0 {
                lines += 1;
                x = 0.0;
            }

            if visible <= max_width - x {
                x += full;
            } else {
                // A single word wider than the line breaks between graphemes
                for grapheme in piece.graphemes(true) {
                    let w = measure(grapheme);
                    if x + w > max_width && x > 0.0 {
                        lines += 1;
                        x = 0.0;
                    }
                    x += w;
                }
            }

            if opportunity == BreakOpportunity::Mandatory && break_at < segment.len() {
                lines += 1;
                x = 0.0;
            }
        }

        lines
    }
}

/// Surface that estimates page heights from font metrics instead of a
/// live renderer. Used for headless pagination and as the reference
/// behaviour in tests and benchmarks.
#[derive(Debug, Clone)]
pub struct EstimatedSurface {
    constraints: LayoutConstraints,
    font: FontMetrics,
    breaker: LineBreaker,
    /// Block heights keyed by a hash of their markup
    heights: FxHashMap<u64, f32>,
}

impl EstimatedSurface {
    pub fn new(constraints: LayoutConstraints, font: FontMetrics) -> Self {
        Self {
            constraints,
            font,
            breaker: LineBreaker::new(),
            heights: FxHashMap::default(),
        }
    }

    pub fn constraints(&self) -> &LayoutConstraints {
        &self.constraints
    }

    /// Estimated rendered height of one block, including the gap after it
    pub fn block_height(&mut self, block: &Block) -> f32 {
        let key = markup_hash(block.markup());
        if let Some(height) = self.heights.get(&key) {
            return *height;
        }

        let height = self.compute_block_height(block);
        if self.heights.len() >= HEIGHT_CACHE_LIMIT {
            self.heights.clear();
        }
        self.heights.insert(key, height);
        height
    }

    fn compute_block_height(&self, block: &Block) -> f32 {
        let kind = block.kind();
        let scale = kind.line_height_multiplier();
        let line_height = self.font.line_height * scale;
        let spacing = kind.spacing_after() * self.font.line_height;

        if *kind == BlockKind::Rule {
            return line_height * 0.5 + spacing;
        }

        let indent = match kind {
            BlockKind::List { marker } => {
                INDENT_WIDTH.max(self.font.text_width(&marker.display(1)) + self.font.default_width)
            }
            BlockKind::Quote => INDENT_WIDTH,
            _ => 0.0,
        };
        let width = (self.constraints.content_width() - indent).max(self.font.default_width);

        let lines = self
            .breaker
            .count_lines(&block.text(), width, &self.font, scale);
        lines as f32 * line_height + spacing
    }
}

impl PageSurface for EstimatedSurface {
    fn measure(&mut self, page: &Page) -> Option<PageMetrics> {
        let blocks: f32 = page.blocks().iter().map(|b| self.block_height(b)).sum();
        let padding = self.constraints.margin_top + self.constraints.margin_bottom;
        Some(PageMetrics::new(padding + blocks, self.constraints.page_height))
    }
}

fn markup_hash(markup: &str) -> u64 {
    let mut hasher = FxHasher::default();
    markup.hash(&mut hasher);
    hasher.finish()
}
