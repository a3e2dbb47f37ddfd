//! Multi-region selection model.
//!
//! Selections are plain values; every operation here takes the current list
//! and returns the next one so the engine can thread them through a single
//! transition function.

mod borders;
mod keyboard;
mod pointer;
mod remove;

use std::collections::HashSet;
use std::hash::Hash;

use crate::types::{ColumnId, GridDims, Selection, SheetData, HEADER_INDEX};

pub use borders::{border_edges, CellBorders, EdgeStyle};
pub use keyboard::selection_after_key_press;
pub use pointer::{on_mouse_down, on_mouse_drag};
pub use remove::{remove_column_from_selections, remove_row_from_selections};

/// Whether `(row, col)` lies in any of `selections`.
pub fn cell_is_selected(selections: &[Selection], row: i64, col: i64) -> bool {
    selections.iter().any(|s| s.contains(row, col))
}

/// True when the list is non-empty and every entry is a whole-column selection.
pub fn is_only_full_columns(selections: &[Selection]) -> bool {
    !selections.is_empty() && selections.iter().all(Selection::is_full_column)
}

/// True when the list is non-empty and every entry is a whole-row selection.
pub fn is_only_full_rows(selections: &[Selection]) -> bool {
    !selections.is_empty() && selections.iter().all(Selection::is_full_row)
}

/// Data column indexes covered by `selections`, deduplicated in first-seen order.
/// Full-row selections cover every column.
pub fn column_indexes_in_selections(selections: &[Selection], dims: GridDims) -> Vec<i64> {
    let max = dims.max_column();
    dedup(selections.iter().flat_map(|s| {
        let (lo, hi) = if s.is_full_row() {
            (0, max)
        } else {
            let (lo, hi) = s.column_range();
            (lo.max(0), hi.min(max))
        };
        lo..=hi
    }))
}

/// Data row indexes covered by `selections`. Full-column selections cover
/// every row.
pub fn row_indexes_in_selections(selections: &[Selection], dims: GridDims) -> Vec<i64> {
    let max = dims.max_row();
    dedup(selections.iter().flat_map(|s| {
        let (lo, hi) = if s.is_full_column() {
            (0, max)
        } else {
            let (lo, hi) = s.row_range();
            (lo.max(0), hi.min(max))
        };
        lo..=hi
    }))
}

pub fn column_headers_in_selections(selections: &[Selection], sheet: &SheetData) -> Vec<String> {
    column_indexes_in_selections(selections, sheet.dims())
        .into_iter()
        .filter_map(|c| sheet.header(c).map(str::to_string))
        .collect()
}

pub fn column_ids_in_selections(selections: &[Selection], sheet: &SheetData) -> Vec<ColumnId> {
    column_indexes_in_selections(selections, sheet.dims())
        .into_iter()
        .filter_map(|c| sheet.column_id(c).cloned())
        .collect()
}

/// Row labels of every data row touched by `selections`.
pub fn index_labels_in_selections(selections: &[Selection], sheet: &SheetData) -> Vec<String> {
    row_indexes_in_selections(selections, sheet.dims())
        .into_iter()
        .filter_map(|r| sheet.row_label(r).map(|l| l.into_owned()))
        .collect()
}

/// Row labels of whole-row selections only.
pub fn row_labels_of_full_row_selections(
    selections: &[Selection],
    sheet: &SheetData,
) -> Vec<String> {
    let full_rows: Vec<Selection> = selections
        .iter()
        .filter(|s| s.is_full_row())
        .copied()
        .collect();
    index_labels_in_selections(&full_rows, sheet)
}

/// Column ids of whole-column selections only.
pub fn column_ids_of_full_column_selections(
    selections: &[Selection],
    sheet: &SheetData,
) -> Vec<ColumnId> {
    let full_columns: Vec<Selection> = selections
        .iter()
        .filter(|s| s.is_full_column())
        .copied()
        .collect();
    column_ids_in_selections(&full_columns, sheet)
}

fn dedup<T: Eq + Hash + Copy>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items.filter(|i| seen.insert(*i)).collect()
}

/// Moving-corner clamp shared by drag, shift-click and shift-arrow: an anchor
/// in a header band pins that axis to the band, an anchor in the data keeps
/// the end out of it.
pub(crate) fn clamp_end_to_anchor(anchor: i64, target: i64) -> i64 {
    if anchor == HEADER_INDEX {
        HEADER_INDEX
    } else {
        target.max(0)
    }
}
