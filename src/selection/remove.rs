//! Removing one column or row from a multi-region selection.

use crate::types::Selection;

/// Remove column `col` from every region that covers it.
///
/// A covering region is split into the parts before and after the column,
/// each keeping the original direction. Whole-row regions are untouched.
/// Parts that would collapse onto the row-label band are dropped, and an
/// empty result falls back to the default selection.
pub fn remove_column_from_selections(
    selections: &[Selection],
    col: i64,
    sheet_index: usize,
) -> Vec<Selection> {
    let next = selections
        .iter()
        .flat_map(|sel| {
            let (lo, hi) = sel.column_range();
            if sel.is_full_row() || col < lo || col > hi {
                return vec![*sel];
            }
            let forward = sel.starting_column_index <= sel.ending_column_index;
            split(lo, hi, col)
                .into_iter()
                .map(|(a, b)| {
                    let (start, end) = if forward { (a, b) } else { (b, a) };
                    Selection {
                        starting_column_index: start,
                        ending_column_index: end,
                        ..*sel
                    }
                })
                .filter(|part| !part.is_full_row() && !part.is_degenerate())
                .collect()
        })
        .collect();
    or_default(next, sheet_index)
}

/// Remove row `row` from every region that covers it. Mirror of
/// [`remove_column_from_selections`] with whole-column regions untouched.
pub fn remove_row_from_selections(
    selections: &[Selection],
    row: i64,
    sheet_index: usize,
) -> Vec<Selection> {
    let next = selections
        .iter()
        .flat_map(|sel| {
            let (lo, hi) = sel.row_range();
            if sel.is_full_column() || row < lo || row > hi {
                return vec![*sel];
            }
            let forward = sel.starting_row_index <= sel.ending_row_index;
            split(lo, hi, row)
                .into_iter()
                .map(|(a, b)| {
                    let (start, end) = if forward { (a, b) } else { (b, a) };
                    Selection {
                        starting_row_index: start,
                        ending_row_index: end,
                        ..*sel
                    }
                })
                .filter(|part| !part.is_full_column() && !part.is_degenerate())
                .collect()
        })
        .collect();
    or_default(next, sheet_index)
}

/// Non-empty sub-ranges of `lo..=hi` with `index` cut out.
fn split(lo: i64, hi: i64, index: i64) -> Vec<(i64, i64)> {
    let mut parts = Vec::with_capacity(2);
    if index > lo {
        parts.push((lo, index - 1));
    }
    if index < hi {
        parts.push((index + 1, hi));
    }
    parts
}

fn or_default(selections: Vec<Selection>, sheet_index: usize) -> Vec<Selection> {
    if selections.is_empty() {
        vec![Selection::default_for(sheet_index)]
    } else {
        selections
    }
}
