//! Per-sheet column widths with a running prefix sum.
//!
//! `width_sum_array[i]` is the right edge of column `i`, so pixel offsets map
//! to columns with a binary search and column edges come back in O(1).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{to_index, ColumnId};

/// Narrowest width a resize may produce.
pub const MIN_COLUMN_WIDTH: f32 = 10.0;

/// Widths of one sheet's columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidthData {
    pub width_array: Vec<f32>,
    /// `width_sum_array[i] = width_array[0..=i].sum()`
    pub width_sum_array: Vec<f32>,
    pub total_width: f32,
}

impl WidthData {
    /// Build from raw widths, computing prefix sums.
    pub fn from_widths(width_array: Vec<f32>) -> Self {
        let mut width_sum_array = Vec::with_capacity(width_array.len());
        let mut x: f32 = 0.0;
        for w in &width_array {
            x += w;
            width_sum_array.push(x);
        }
        Self {
            total_width: width_array.iter().sum(),
            width_array,
            width_sum_array,
        }
    }

    /// `num_columns` columns of the same width.
    pub fn uniform(num_columns: usize, width: f32) -> Self {
        Self::from_widths(vec![width; num_columns])
    }

    pub fn len(&self) -> usize {
        self.width_array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width_array.is_empty()
    }

    pub fn width(&self, col: usize) -> Option<f32> {
        self.width_array.get(col).copied()
    }

    /// Left edge of column `col` in sheet pixels.
    pub fn column_left(&self, col: usize) -> f32 {
        if col == 0 {
            return 0.0;
        }
        self.width_sum_array
            .get(col - 1)
            .copied()
            .unwrap_or(self.total_width)
    }

    /// Column whose pixel range `[left, right)` contains `x`.
    pub fn column_at_offset(&self, x: f32) -> Option<usize> {
        if x < 0.0 {
            return None;
        }
        let idx = self.width_sum_array.partition_point(|&sum| sum <= x);
        (idx < self.len()).then_some(idx)
    }

    /// Set one width and re-walk the prefix sums from that column forward.
    fn set_width(&mut self, col: usize, new_width: f32) -> bool {
        let Some(slot) = self.width_array.get_mut(col) else {
            return false;
        };
        *slot = new_width;

        let mut running = self.column_left(col);
        for (sum, w) in self
            .width_sum_array
            .iter_mut()
            .zip(self.width_array.iter())
            .skip(col)
        {
            running += w;
            *sum = running;
        }
        self.total_width = self.width_array.iter().sum();
        true
    }
}

/// Column widths for every sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthModel {
    sheets: HashMap<usize, WidthData>,
    default_width: f32,
}

impl Default for WidthModel {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_COLUMN_WIDTH)
    }
}

impl WidthModel {
    pub fn new(default_width: f32) -> Self {
        Self {
            sheets: HashMap::new(),
            default_width,
        }
    }

    pub fn default_width(&self) -> f32 {
        self.default_width
    }

    pub fn sheet(&self, sheet_index: usize) -> Option<&WidthData> {
        self.sheets.get(&sheet_index)
    }

    /// Default widths for `num_columns` columns, replacing anything stored.
    pub fn initialize(&mut self, sheet_index: usize, num_columns: usize) {
        self.sheets.insert(
            sheet_index,
            WidthData::uniform(num_columns, self.default_width),
        );
    }

    /// Insert width data as-is (e.g. widths persisted by the host).
    pub fn insert(&mut self, sheet_index: usize, data: WidthData) {
        self.sheets.insert(sheet_index, data);
    }

    pub fn remove_sheet(&mut self, sheet_index: usize) {
        self.sheets.remove(&sheet_index);
    }

    /// Width of a column, or the default for unknown sheets/columns.
    pub fn width_of(&self, sheet_index: usize, col: i64) -> f32 {
        to_index(col)
            .and_then(|c| self.sheets.get(&sheet_index)?.width(c))
            .unwrap_or(self.default_width)
    }

    /// Resize a column. Returns false when the column does not exist.
    pub fn set_width(&mut self, sheet_index: usize, col: i64, new_width: f32) -> bool {
        let Some(col) = to_index(col) else {
            return false;
        };
        if !new_width.is_finite() {
            return false;
        }
        let Some(data) = self.sheets.get_mut(&sheet_index) else {
            return false;
        };
        data.set_width(col, new_width.max(MIN_COLUMN_WIDTH))
    }

    /// Current widths keyed by column identity.
    pub fn widths_by_column_id(
        &self,
        sheet_index: usize,
        column_ids: &[ColumnId],
    ) -> HashMap<ColumnId, f32> {
        let Some(data) = self.sheets.get(&sheet_index) else {
            return HashMap::new();
        };
        column_ids
            .iter()
            .zip(data.width_array.iter())
            .map(|(id, w)| (id.clone(), *w))
            .collect()
    }

    /// Fresh widths for a new column set: surviving columns keep their width
    /// by identity, new columns get the default.
    pub fn rebuild_for_column_set(
        &mut self,
        sheet_index: usize,
        new_column_ids: &[ColumnId],
        old_widths_by_column_id: &HashMap<ColumnId, f32>,
    ) {
        let widths = new_column_ids
            .iter()
            .map(|id| {
                old_widths_by_column_id
                    .get(id)
                    .copied()
                    .unwrap_or(self.default_width)
            })
            .collect();
        self.sheets
            .insert(sheet_index, WidthData::from_widths(widths));
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

    fn assert_prefix_invariant(data: &WidthData) {
        for i in 1..data.len() {
            assert_eq!(
                data.width_sum_array[i],
                data.width_sum_array[i - 1] + data.width_array[i]
            );
        }
        if let Some(last) = data.width_sum_array.last() {
            assert_eq!(*last, data.total_width);
        }
    }

    #[test]
    fn set_width_rewalks_prefix_sums() {
        let mut model = WidthModel::new(100.0);
        model.insert(0, WidthData::from_widths(vec![100.0, 100.0, 50.0, 100.0]));
        assert!(model.set_width(0, 2, 80.0));

        let data = model.sheet(0).unwrap();
        assert_eq!(data.width_array, vec![100.0, 100.0, 80.0, 100.0]);
        assert_eq!(data.width_sum_array, vec![100.0, 200.0, 280.0, 380.0]);
        assert_eq!(data.total_width, 380.0);
        assert_prefix_invariant(data);
    }

    #[test]
    fn out_of_range_lookups_use_default() {
        let mut model = WidthModel::new(120.0);
        model.initialize(0, 2);
        assert_eq!(model.width_of(0, 5), 120.0);
        assert_eq!(model.width_of(0, -1), 120.0);
        assert_eq!(model.width_of(3, 0), 120.0);
        assert!(!model.set_width(0, 5, 50.0));
        assert!(!model.set_width(4, 0, 50.0));
    }

    #[test]
    fn resize_is_clamped_to_minimum() {
        let mut model = WidthModel::new(120.0);
        model.initialize(0, 3);
        assert!(model.set_width(0, 1, -40.0));
        assert_eq!(model.width_of(0, 1), MIN_COLUMN_WIDTH);
        assert!(!model.set_width(0, 1, f32::NAN));
        assert_prefix_invariant(model.sheet(0).unwrap());
    }

    #[test]
    fn column_at_offset_uses_half_open_ranges() {
        let data = WidthData::from_widths(vec![100.0, 50.0, 100.0]);
        assert_eq!(data.column_at_offset(0.0), Some(0));
        assert_eq!(data.column_at_offset(99.5), Some(0));
        assert_eq!(data.column_at_offset(100.0), Some(1));
        assert_eq!(data.column_at_offset(249.0), Some(2));
        assert_eq!(data.column_at_offset(250.0), None);
        assert_eq!(data.column_at_offset(-1.0), None);
        assert_eq!(data.column_left(2), 150.0);
    }

    #[test]
    fn rebuild_follows_column_identity() {
        let mut model = WidthModel::new(120.0);
        let old: Vec<ColumnId> = ["a", "b", "c"].iter().map(|s| ColumnId::from(*s)).collect();
        model.insert(0, WidthData::from_widths(vec![10.0, 20.0, 30.0]));
        let by_id = model.widths_by_column_id(0, &old);

        let new: Vec<ColumnId> = ["c", "x", "a"].iter().map(|s| ColumnId::from(*s)).collect();
        model.rebuild_for_column_set(0, &new, &by_id);

        let data = model.sheet(0).unwrap();
        assert_eq!(data.width_array, vec![30.0, 120.0, 10.0]);
        assert_prefix_invariant(data);
    }
}
