//! Column widths, viewport computation and hit testing.
//!
//! This module handles:
//! - Per-sheet column widths with running prefix sums
//! - The materialized row/column window for a scroll position
//! - Mapping pointer coordinates to cells without touching rendered output

mod viewport;
mod widths;

pub use hit_test::cell_at_point;
pub use viewport::{clamp_scroll, scroll_into_view, sheet_view, translate};
pub use widths::{WidthData, WidthModel, MIN_COLUMN_WIDTH};
