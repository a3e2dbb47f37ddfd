//! Directed rectangular selections over the grid coordinate space.
//!
//! Row `-1` is the column-header band and column `-1` is the row-label band.
//! A selection whose row bounds are both `-1` covers whole columns; one whose
//! column bounds are both `-1` covers whole rows.

use serde::{Deserialize, Serialize};

/// Index of the header band on either axis.
pub const HEADER_INDEX: i64 = -1;

/// A selection rectangle.
///
/// Start and end are not normalized: the pair records the direction of the
/// drag or keyboard extension. Use [`Selection::row_range`] and
/// [`Selection::column_range`] for ordered bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub sheet_index: usize,
    pub starting_row_index: i64,
    pub ending_row_index: i64,
    pub starting_column_index: i64,
    pub ending_column_index: i64,
}

impl Selection {
    /// A 1x1 selection at `(row, col)`.
    ///
    /// A cell in the header row is a whole-column selection, a cell in the
    /// row-label column is a whole-row selection.
    pub fn cell(sheet_index: usize, row: i64, col: i64) -> Self {
        Self {
            sheet_index,
            starting_row_index: row,
            ending_row_index: row,
            starting_column_index: col,
            ending_column_index: col,
        }
    }

    /// Whole columns `start_col..=end_col` (header included).
    pub fn columns(sheet_index: usize, start_col: i64, end_col: i64) -> Self {
        Self {
            sheet_index,
            starting_row_index: HEADER_INDEX,
            ending_row_index: HEADER_INDEX,
            starting_column_index: start_col,
            ending_column_index: end_col,
        }
    }

    /// Whole rows `start_row..=end_row` (row label included).
    pub fn rows(sheet_index: usize, start_row: i64, end_row: i64) -> Self {
        Self {
            sheet_index,
            starting_row_index: start_row,
            ending_row_index: end_row,
            starting_column_index: HEADER_INDEX,
            ending_column_index: HEADER_INDEX,
        }
    }

    /// Fallback selection used whenever a selection list would otherwise be
    /// empty: the header of the first column.
    pub fn default_for(sheet_index: usize) -> Self {
        Self::columns(sheet_index, 0, 0)
    }

    fn rows_unbounded(&self) -> bool {
        self.starting_row_index == HEADER_INDEX && self.ending_row_index == HEADER_INDEX
    }

    fn columns_unbounded(&self) -> bool {
        self.starting_column_index == HEADER_INDEX && self.ending_column_index == HEADER_INDEX
    }

    /// Both axes collapsed onto the header bands: selects nothing.
    pub fn is_degenerate(&self) -> bool {
        self.rows_unbounded() && self.columns_unbounded()
    }

    /// True for a header selection spanning entire columns.
    pub fn is_full_column(&self) -> bool {
        self.rows_unbounded() && !self.columns_unbounded()
    }

    /// True for a row-label selection spanning entire rows.
    pub fn is_full_row(&self) -> bool {
        self.columns_unbounded() && !self.rows_unbounded()
    }

    /// Ordered `(min, max)` row bounds.
    pub fn row_range(&self) -> (i64, i64) {
        (
            self.starting_row_index.min(self.ending_row_index),
            self.starting_row_index.max(self.ending_row_index),
        )
    }

    /// Ordered `(min, max)` column bounds.
    pub fn column_range(&self) -> (i64, i64) {
        (
            self.starting_column_index.min(self.ending_column_index),
            self.starting_column_index.max(self.ending_column_index),
        )
    }

    /// Anchor corner `(row, col)`.
    pub fn start(&self) -> (i64, i64) {
        (self.starting_row_index, self.starting_column_index)
    }

    /// Moving corner `(row, col)`.
    pub fn end(&self) -> (i64, i64) {
        (self.ending_row_index, self.ending_column_index)
    }

    /// Same anchor, new moving corner.
    #[must_use]
    pub fn with_end(self, row: i64, col: i64) -> Self {
        Self {
            ending_row_index: row,
            ending_column_index: col,
            ..self
        }
    }

    /// Whether `(row, col)` falls inside this selection.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let (min_row, max_row) = self.row_range();
        let (min_col, max_col) = self.column_range();
        let row_ok = self.rows_unbounded() || (min_row <= row && row <= max_row);
        let col_ok = self.columns_unbounded() || (min_col <= col && col <= max_col);
        row_ok && col_ok
    }
}

/// Row and column counts of a sheet, used to bound unbounded selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDims {
    pub num_rows: usize,
    pub num_columns: usize,
}

impl GridDims {
    pub fn new(num_rows: usize, num_columns: usize) -> Self {
        Self {
            num_rows,
            num_columns,
        }
    }

    /// Last data row index, or `-1` when the sheet has no rows.
    pub fn max_row(&self) -> i64 {
        last_index(self.num_rows)
    }

    /// Last data column index, or `-1` when the sheet has no columns.
    pub fn max_column(&self) -> i64 {
        last_index(self.num_columns)
    }

    /// Whether `(row, col)` is an addressable coordinate, header bands included.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        if row == HEADER_INDEX && col == HEADER_INDEX {
            return false;
        }
        (HEADER_INDEX..=self.max_row()).contains(&row)
            && (HEADER_INDEX..=self.max_column()).contains(&col)
    }
}

/// `len - 1` as a signed index (`-1` for an empty axis).
pub fn last_index(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |n| n - 1)
}

/// Signed index to `usize`, `None` for header bands and negatives.
pub fn to_index(index: i64) -> Option<usize> {
    usize::try_from(index).ok()
}

/// `usize` index to signed.
pub fn from_index(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn full_column_spans_every_row() {
        let sel = Selection::columns(0, 2, 3);
        assert!(sel.is_full_column());
        assert!(!sel.is_full_row());
        assert!(sel.contains(-1, 2));
        assert!(sel.contains(10_000, 3));
        assert!(!sel.contains(0, 4));
    }

    #[test]
    fn full_row_spans_every_column() {
        let sel = Selection::rows(0, 5, 1);
        assert!(sel.is_full_row());
        assert_eq!(sel.row_range(), (1, 5));
        assert!(sel.contains(3, -1));
        assert!(sel.contains(3, 400));
        assert!(!sel.contains(0, 0));
    }

    #[test]
    fn degenerate_selection_contains_nothing() {
        let sel = Selection::cell(0, -1, -1);
        assert!(sel.is_degenerate());
        assert!(!sel.contains(-1, -1));
        assert!(!sel.contains(0, 0));
    }

    #[test]
    fn direction_is_preserved() {
        let sel = Selection::cell(0, 4, 5).with_end(2, 2);
        assert_eq!(sel.start(), (4, 5));
        assert_eq!(sel.end(), (2, 2));
        assert_eq!(sel.row_range(), (2, 4));
        assert_eq!(sel.column_range(), (2, 5));
        assert!(sel.contains(3, 3));
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_value(Selection::cell(1, 2, 3)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sheetIndex": 1,
                "startingRowIndex": 2,
                "endingRowIndex": 2,
                "startingColumnIndex": 3,
                "endingColumnIndex": 3
            })
        );
    }

    #[test]
    fn dims_exclude_corner() {
        let dims = GridDims::new(3, 2);
        assert_eq!(dims.max_row(), 2);
        assert_eq!(dims.max_column(), 1);
        assert!(dims.contains(-1, 0));
        assert!(dims.contains(2, -1));
        assert!(!dims.contains(-1, -1));
        assert!(!dims.contains(3, 0));
        assert_eq!(GridDims::new(0, 0).max_row(), -1);
    }
}
