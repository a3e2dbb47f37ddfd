//! Viewport window computation.
//!
//! Everything here is a pure function of `GridState` and the width model so it
//! can be recomputed on every render pass and memoized by input equality.

use super::WidthModel;
use crate::config::GridConfig;
use crate::types::{to_index, GridDims, GridState, ScrollPosition, SheetView, Translate};

/// The rows and columns that must be materialized for the current scroll.
pub fn sheet_view(state: &GridState, widths: &WidthModel, config: &GridConfig) -> SheetView {
    let (starting_column_index, num_columns_rendered) = visible_columns(state, widths);
    let (starting_row_index, num_rows_rendered) = visible_rows(state, config);
    SheetView {
        starting_row_index,
        num_rows_rendered,
        starting_column_index,
        num_columns_rendered,
    }
}

fn visible_columns(state: &GridState, widths: &WidthModel) -> (usize, usize) {
    // Sheet just switched: nothing to index yet.
    let Some(data) = widths.sheet(state.sheet_index) else {
        return (0, 0);
    };
    let sums = &data.width_sum_array;
    if sums.is_empty() {
        return (0, 0);
    }
    let last = sums.len() - 1;
    let left = state.scroll_position.scroll_left.max(0.0);
    let right = left + state.viewport.width.max(0.0);

    // First column whose right edge passes scroll_left. Scrolled past the end
    // keeps the last column materialized.
    let start = sums.partition_point(|&sum| sum <= left).min(last);

    let mut end = start;
    while end < last && sums.get(end).is_some_and(|&sum| sum <= right) {
        end += 1;
    }
    (start, end - start + 1)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn visible_rows(state: &GridState, config: &GridConfig) -> (usize, usize) {
    let height = config.row_height;
    // Both quotients are finite and non-negative here.
    let start = (state.scroll_position.scroll_top.max(0.0) / height).floor() as usize;
    let visible = (state.viewport.height.max(0.0) / height).ceil() as usize;
    (start, visible + config.overscan_rows)
}

/// Sub-cell offset between the first rendered row/column and the true scroll
/// position.
pub fn translate(state: &GridState, widths: &WidthModel, config: &GridConfig) -> Translate {
    let view = sheet_view(state, widths, config);
    let scroll_left = state.scroll_position.scroll_left.max(0.0);
    let x = match widths.sheet(state.sheet_index) {
        Some(data) if view.starting_column_index > 0 => {
            scroll_left - data.column_left(view.starting_column_index)
        }
        _ => scroll_left,
    };
    Translate {
        x,
        y: state.scroll_position.scroll_top.max(0.0) % config.row_height,
    }
}

/// Scroll position clamped to the sheet's content.
pub fn clamp_scroll(
    state: &GridState,
    widths: &WidthModel,
    config: &GridConfig,
    dims: GridDims,
    scroll: ScrollPosition,
) -> ScrollPosition {
    let total_width = widths
        .sheet(state.sheet_index)
        .map_or(0.0, |d| d.total_width);
    let total_height = content_height(dims, config);
    let max_x = (total_width - state.viewport.width).max(0.0);
    let max_y = (total_height - state.viewport.height).max(0.0);
    ScrollPosition {
        scroll_left: finite_or_zero(scroll.scroll_left).clamp(0.0, max_x),
        scroll_top: finite_or_zero(scroll.scroll_top).clamp(0.0, max_y),
    }
}

/// Smallest scroll change that brings `(row, col)` fully into view.
/// Header-band coordinates leave that axis untouched.
pub fn scroll_into_view(
    state: &GridState,
    widths: &WidthModel,
    config: &GridConfig,
    row: i64,
    col: i64,
) -> ScrollPosition {
    let mut scroll = state.scroll_position;

    if let Some(c) = to_index(col) {
        let (left, width) = match widths.sheet(state.sheet_index) {
            Some(data) => (data.column_left(c), data.width(c).unwrap_or(0.0)),
            None => (0.0, 0.0),
        };
        scroll.scroll_left = reveal(scroll.scroll_left, state.viewport.width, left, width);
    }
    if let Some(r) = to_index(row) {
        let top = row_top(r, config);
        scroll.scroll_top = reveal(scroll.scroll_top, state.viewport.height, top, config.row_height);
    }
    scroll
}

fn reveal(offset: f32, visible: f32, start: f32, size: f32) -> f32 {
    if start < offset {
        start
    } else if start + size > offset + visible {
        (start + size - visible).max(0.0)
    } else {
        offset
    }
}

#[allow(clippy::cast_precision_loss)]
fn row_top(row: usize, config: &GridConfig) -> f32 {
    row as f32 * config.row_height
}

#[allow(clippy::cast_precision_loss)]
fn content_height(dims: GridDims, config: &GridConfig) -> f32 {
    dims.num_rows as f32 * config.row_height
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::layout::WidthData;
    use crate::types::{ScrollPosition, Viewport};

    fn setup(widths: Vec<f32>, scroll_left: f32, width: f32) -> (GridState, WidthModel) {
        let mut state = GridState::new(0);
        state.viewport = Viewport {
            width,
            height: 100.0,
        };
        state.scroll_position = ScrollPosition {
            scroll_left,
            scroll_top: 0.0,
        };
        let mut model = WidthModel::new(100.0);
        model.insert(0, WidthData::from_widths(widths));
        (state, model)
    }

    #[test]
    fn columns_from_origin() {
        let (state, model) = setup(vec![100.0; 10], 0.0, 250.0);
        let view = sheet_view(&state, &model, &GridConfig::default());
        assert_eq!(view.starting_column_index, 0);
        assert_eq!(view.num_columns_rendered, 3);
    }

    #[test]
    fn columns_mid_scroll() {
        let (state, model) = setup(vec![100.0; 10], 150.0, 200.0);
        let view = sheet_view(&state, &model, &GridConfig::default());
        // 150..350 touches columns 1, 2 and 3
        assert_eq!(view.starting_column_index, 1);
        assert_eq!(view.num_columns_rendered, 3);
    }

    #[test]
    fn narrow_sheet_renders_all_remaining() {
        let (state, model) = setup(vec![50.0, 50.0], 0.0, 800.0);
        let view = sheet_view(&state, &model, &GridConfig::default());
        assert_eq!(view.starting_column_index, 0);
        assert_eq!(view.num_columns_rendered, 2);
    }

    #[test]
    fn missing_width_data_renders_no_columns() {
        let state = GridState::new(3);
        let view = sheet_view(&state, &WidthModel::default(), &GridConfig::default());
        assert_eq!(view.num_columns_rendered, 0);
        assert_eq!(view.starting_column_index, 0);
    }

    #[test]
    fn rows_use_fixed_height_and_overscan() {
        let (mut state, model) = setup(vec![100.0], 0.0, 100.0);
        state.scroll_position.scroll_top = 260.0;
        state.viewport.height = 100.0;
        let config = GridConfig::default();
        let view = sheet_view(&state, &model, &config);
        assert_eq!(view.starting_row_index, 10);
        assert_eq!(view.num_rows_rendered, 4 + config.overscan_rows);
    }

    #[test]
    fn translate_aligns_first_column() {
        let (mut state, model) = setup(vec![100.0; 10], 150.0, 200.0);
        state.scroll_position.scroll_top = 60.0;
        let t = translate(&state, &model, &GridConfig::default());
        assert_eq!(t.x, 50.0);
        assert_eq!(t.y, 10.0);

        let (state, model) = setup(vec![100.0; 10], 40.0, 200.0);
        assert_eq!(translate(&state, &model, &GridConfig::default()).x, 40.0);
    }

    #[test]
    fn negative_scroll_translates_like_origin() {
        let (state, model) = setup(vec![100.0; 10], -35.0, 200.0);
        let config = GridConfig::default();
        assert_eq!(sheet_view(&state, &model, &config).starting_column_index, 0);
        assert_eq!(translate(&state, &model, &config).x, 0.0);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let (state, model) = setup(vec![33.3, 71.9, 12.5, 200.0], 57.0, 90.0);
        let config = GridConfig::default();
        assert_eq!(
            sheet_view(&state, &model, &config),
            sheet_view(&state, &model, &config)
        );
        assert_eq!(
            translate(&state, &model, &config),
            translate(&state, &model, &config)
        );
    }

    #[test]
    fn scroll_into_view_reveals_cell() {
        let (state, model) = setup(vec![100.0; 10], 0.0, 250.0);
        let config = GridConfig::default();
        let scroll = scroll_into_view(&state, &model, &config, 10, 4);
        assert_eq!(scroll.scroll_left, 250.0);
        assert_eq!(scroll.scroll_top, 11.0 * config.row_height - 100.0);

        let back = scroll_into_view(&state, &model, &config, -1, 0);
        assert_eq!(back, state.scroll_position);
    }

    #[test]
    fn clamp_scroll_bounds_both_axes() {
        let (state, model) = setup(vec![100.0; 10], 0.0, 250.0);
        let config = GridConfig::default();
        let dims = GridDims::new(8, 10);
        let clamped = clamp_scroll(
            &state,
            &model,
            &config,
            dims,
            ScrollPosition {
                scroll_left: 5000.0,
                scroll_top: -3.0,
            },
        );
        assert_eq!(clamped.scroll_left, 750.0);
        assert_eq!(clamped.scroll_top, 0.0);
    }
}
