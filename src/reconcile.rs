//! Re-indexing selections and widths after the column set changes shape.
//!
//! Changes are detected by diffing the old and new column-identity arrays.
//! Selections then follow their columns by identity: deletions shift and
//! shrink them, insertions shift and grow them, a pure reorder keeps their
//! positions.

use std::collections::HashSet;

use log::{debug, warn};

use crate::layout::WidthModel;
use crate::types::{last_index, ColumnId, GridDims, Selection, HEADER_INDEX};

/// How a column-identity array changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnChange {
    Unchanged,
    /// Same identities in a different order.
    Reordered,
    /// Old indexes that were removed, ascending.
    Deleted(Vec<usize>),
    /// New indexes that were added, ascending.
    Inserted(Vec<usize>),
    /// Not explainable as a single insert, delete or reorder.
    Malformed,
}

/// Old indexes missing from `new`, found by walking both arrays in lockstep.
///
/// The cursor into `new` only advances on a match, so everything after the
/// first mismatch is compared against the same expected element.
pub fn deleted_indexes(old: &[ColumnId], new: &[ColumnId]) -> Vec<usize> {
    let mut deleted = Vec::new();
    let mut j = 0;
    for (i, id) in old.iter().enumerate() {
        if new.get(j) == Some(id) {
            j += 1;
        } else {
            deleted.push(i);
        }
    }
    deleted
}

/// New indexes missing from `old`: a deletion read backwards.
pub fn inserted_indexes(old: &[ColumnId], new: &[ColumnId]) -> Vec<usize> {
    deleted_indexes(new, old)
}

pub fn classify(old: &[ColumnId], new: &[ColumnId]) -> ColumnChange {
    if old == new {
        return ColumnChange::Unchanged;
    }
    if old.len() == new.len() {
        let old_set: HashSet<&ColumnId> = old.iter().collect();
        let new_set: HashSet<&ColumnId> = new.iter().collect();
        return if old_set == new_set && old_set.len() == old.len() {
            ColumnChange::Reordered
        } else {
            ColumnChange::Malformed
        };
    }
    if old.len() > new.len() {
        let deleted = deleted_indexes(old, new);
        if old.len() - deleted.len() == new.len() {
            return ColumnChange::Deleted(deleted);
        }
    } else {
        let inserted = inserted_indexes(old, new);
        if new.len() - inserted.len() == old.len() {
            return ColumnChange::Inserted(inserted);
        }
    }
    ColumnChange::Malformed
}

/// The column set a selection list was last reconciled against.
#[derive(Debug, Clone, Copy)]
pub struct PreviousColumns<'a> {
    pub sheet_index: usize,
    pub column_ids: &'a [ColumnId],
}

/// Selections re-mapped onto `new_column_ids`.
///
/// Resets to the default selection when the sheet changed, when there is no
/// previous column set, or when the change is malformed. The result is
/// never empty.
pub fn reconcile_selections(
    selections: &[Selection],
    previous: Option<PreviousColumns<'_>>,
    sheet_index: usize,
    new_column_ids: &[ColumnId],
    dims: GridDims,
) -> Vec<Selection> {
    let Some(previous) = previous else {
        debug!("reconcile: no previous columns for sheet {sheet_index}, resetting selection");
        return vec![Selection::default_for(sheet_index)];
    };
    if previous.sheet_index != sheet_index {
        debug!(
            "reconcile: sheet changed {} -> {sheet_index}, resetting selection",
            previous.sheet_index
        );
        return vec![Selection::default_for(sheet_index)];
    }
    if new_column_ids.is_empty() {
        return vec![Selection::default_for(sheet_index)];
    }

    let change = classify(previous.column_ids, new_column_ids);
    let survivors = match &change {
        ColumnChange::Unchanged | ColumnChange::Reordered => Vec::new(),
        ColumnChange::Deleted(deleted) => {
            debug!("reconcile: deleted column indexes {deleted:?}");
            Vec::new()
        }
        ColumnChange::Inserted(inserted) => {
            debug!("reconcile: inserted column indexes {inserted:?}");
            surviving_positions(new_column_ids.len(), inserted)
        }
        ColumnChange::Malformed => {
            warn!(
                "reconcile: column change {} -> {} is not a single insert, delete or reorder; resetting selection",
                previous.column_ids.len(),
                new_column_ids.len()
            );
            return vec![Selection::default_for(sheet_index)];
        }
    };
    let map_columns = |start: i64, end: i64| match &change {
        ColumnChange::Deleted(deleted) => map_after_delete(deleted, start, end),
        ColumnChange::Inserted(_) => (
            map_after_insert(&survivors, start),
            map_after_insert(&survivors, end),
        ),
        _ => (start, end),
    };

    let max_col = last_index(new_column_ids.len());
    let max_row = dims.max_row();
    let next: Vec<Selection> = selections
        .iter()
        .map(|sel| {
            let (start_col, end_col) = if sel.is_full_row() {
                (HEADER_INDEX, HEADER_INDEX)
            } else {
                let (s, e) = map_columns(sel.starting_column_index, sel.ending_column_index);
                (
                    clamp_bound(sel.starting_column_index, s, max_col),
                    clamp_bound(sel.ending_column_index, e, max_col),
                )
            };
            Selection {
                sheet_index,
                starting_row_index: clamp_bound(sel.starting_row_index, sel.starting_row_index, max_row),
                ending_row_index: clamp_bound(sel.ending_row_index, sel.ending_row_index, max_row),
                starting_column_index: start_col,
                ending_column_index: end_col,
            }
        })
        .filter(|sel| !sel.is_degenerate())
        .collect();

    if next.is_empty() {
        vec![Selection::default_for(sheet_index)]
    } else {
        next
    }
}

/// Carry widths over to the new column set by identity.
pub fn reconcile_widths(
    widths: &mut WidthModel,
    sheet_index: usize,
    old_column_ids: &[ColumnId],
    new_column_ids: &[ColumnId],
) {
    let by_id = widths.widths_by_column_id(sheet_index, old_column_ids);
    widths.rebuild_for_column_set(sheet_index, new_column_ids, &by_id);
}

/// A `-1` bound stays in the header band; anything else is clamped into
/// `0..=max`, or onto the band when the axis is empty.
fn clamp_bound(original: i64, mapped: i64, max: i64) -> i64 {
    if original == HEADER_INDEX || max < 0 {
        HEADER_INDEX
    } else {
        mapped.clamp(0, max)
    }
}

/// Lower bound shifts by deletions strictly before it, upper bound by
/// deletions up to and including it.
fn map_after_delete(deleted: &[usize], start: i64, end: i64) -> (i64, i64) {
    let forward = start <= end;
    let (lo, hi) = if forward { (start, end) } else { (end, start) };
    let before = |x: i64, inclusive: bool| {
        let n = deleted
            .iter()
            .filter(|&&d| {
                let d = i64::try_from(d).unwrap_or(i64::MAX);
                if inclusive {
                    d <= x
                } else {
                    d < x
                }
            })
            .count();
        i64::try_from(n).unwrap_or(0)
    };
    let new_lo = if lo == HEADER_INDEX { lo } else { lo - before(lo, false) };
    let new_hi = if hi == HEADER_INDEX { hi } else { (hi - before(hi, true)).max(new_lo) };
    if forward {
        (new_lo, new_hi)
    } else {
        (new_hi, new_lo)
    }
}

/// `survivors[i]` is the new position of old column `i`.
fn surviving_positions(new_len: usize, inserted: &[usize]) -> Vec<i64> {
    let inserted: HashSet<usize> = inserted.iter().copied().collect();
    (0..new_len)
        .filter(|i| !inserted.contains(i))
        .map(|i| i64::try_from(i).unwrap_or(i64::MAX))
        .collect()
}

fn map_after_insert(survivors: &[i64], index: i64) -> i64 {
    if index == HEADER_INDEX {
        return index;
    }
    usize::try_from(index)
        .ok()
        .and_then(|i| survivors.get(i).copied())
        .unwrap_or(index)
}
