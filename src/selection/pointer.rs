//! Pointer-driven selection changes.

use super::{clamp_end_to_anchor, remove_column_from_selections, remove_row_from_selections};
use crate::types::{GridDims, Modifiers, Selection, HEADER_INDEX};

/// Selection list after pressing the pointer on `(row, col)`.
///
/// - no modifier: a single 1x1 selection
/// - multi-select: toggle (a selected header is removed, anything else is
///   appended as a new region)
/// - multi-select + shift: append a new region
/// - shift: move the end of the last region
///
/// Points outside the sheet leave the list unchanged.
pub fn on_mouse_down(
    selections: &[Selection],
    sheet_index: usize,
    dims: GridDims,
    row: i64,
    col: i64,
    modifiers: Modifiers,
) -> Vec<Selection> {
    if !dims.contains(row, col) {
        return selections.to_vec();
    }
    let clicked = Selection::cell(sheet_index, row, col);

    if modifiers.multi_select() {
        if !modifiers.shift {
            if row == HEADER_INDEX && header_selected(selections, Selection::is_full_column, row, col) {
                return remove_column_from_selections(selections, col, sheet_index);
            }
            if col == HEADER_INDEX && header_selected(selections, Selection::is_full_row, row, col) {
                return remove_row_from_selections(selections, row, sheet_index);
            }
        }
        let mut next = selections.to_vec();
        next.push(clicked);
        return next;
    }

    if modifiers.shift {
        if let Some((last, rest)) = selections.split_last() {
            let mut next = rest.to_vec();
            next.push(extend(*last, row, col));
            return next;
        }
    }

    vec![clicked]
}

/// Selection list while dragging over `(row, col)` with the button held.
///
/// Only the last region moves. Dragging from the header row is left to the
/// header's own reorder/resize handling.
pub fn on_mouse_drag(selections: &[Selection], dims: GridDims, row: i64, col: i64) -> Vec<Selection> {
    if !dims.contains(row, col) {
        return selections.to_vec();
    }
    let Some((last, rest)) = selections.split_last() else {
        return selections.to_vec();
    };
    if last.starting_row_index == HEADER_INDEX {
        return selections.to_vec();
    }
    let mut next = rest.to_vec();
    next.push(extend(*last, row, col));
    next
}

fn extend(sel: Selection, row: i64, col: i64) -> Selection {
    sel.with_end(
        clamp_end_to_anchor(sel.starting_row_index, row),
        clamp_end_to_anchor(sel.starting_column_index, col),
    )
}

fn header_selected(
    selections: &[Selection],
    kind: impl Fn(&Selection) -> bool,
    row: i64,
    col: i64,
) -> bool {
    selections.iter().any(|s| kind(s) && s.contains(row, col))
}
