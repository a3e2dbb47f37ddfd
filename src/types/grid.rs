//! Per sheet-view grid state and the derived viewport window.

use serde::{Deserialize, Serialize};

use super::selection::Selection;

/// Size of the scrollable data area in pixels (header bands excluded).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollPosition {
    pub scroll_left: f32,
    pub scroll_top: f32,
}

/// State of one open sheet view.
///
/// The last entry of `selections` is the active region; earlier entries are
/// prior regions of a multi-select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridState {
    pub sheet_index: usize,
    pub viewport: Viewport,
    pub scroll_position: ScrollPosition,
    pub selections: Vec<Selection>,
    /// Regions carrying a pending clipboard marker.
    #[serde(default)]
    pub copied_selections: Vec<Selection>,
}

impl GridState {
    pub fn new(sheet_index: usize) -> Self {
        Self {
            sheet_index,
            viewport: Viewport::default(),
            scroll_position: ScrollPosition::default(),
            selections: vec![Selection::default_for(sheet_index)],
            copied_selections: Vec::new(),
        }
    }

    /// The most recently modified region.
    pub fn active_selection(&self) -> Option<&Selection> {
        self.selections.last()
    }

    /// Replace the selection list, never leaving it empty.
    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        if selections.is_empty() {
            self.selections = vec![Selection::default_for(self.sheet_index)];
        } else {
            self.selections = selections;
        }
    }
}

/// The materialized window of rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetView {
    pub starting_row_index: usize,
    pub num_rows_rendered: usize,
    pub starting_column_index: usize,
    pub num_columns_rendered: usize,
}

impl SheetView {
    /// Whether column `col` is inside the rendered window.
    pub fn renders_column(&self, col: usize) -> bool {
        col >= self.starting_column_index
            && col < self.starting_column_index + self.num_columns_rendered
    }

    /// Whether row `row` is inside the rendered window.
    pub fn renders_row(&self, row: usize) -> bool {
        row >= self.starting_row_index && row < self.starting_row_index + self.num_rows_rendered
    }
}

/// Offset aligning the first rendered row/column with the scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Translate {
    pub x: f32,
    pub y: f32,
}
