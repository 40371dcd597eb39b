//! Pagination: measurement, overflow detection and block relocation

mod debounce;
mod engine;
pub mod font;
mod line_break;
mod surface;

pub use debounce::Debouncer;
pub use engine::{
    split_overflow, LayoutConstraints, PaginationEngine, PaginationReport, Relocation,
    DEFAULT_MAX_PASSES, INDENT_WIDTH,
};
pub use font::FontMetrics;
pub use line_break::{EstimatedSurface, LineBreaker};
pub use surface::{PageFit, PageMetrics, PageSurface};
