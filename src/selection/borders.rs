//! Per-edge border styles for selection feedback.
//!
//! Kept free of drawing APIs: the renderer asks for one cell at a time and
//! strokes whatever edges come back.

use serde::{Deserialize, Serialize};

use crate::types::{GridDims, Selection};

/// How one edge of a cell is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeStyle {
    #[default]
    Grid,
    Selected,
    Copied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellBorders {
    pub top: EdgeStyle,
    pub bottom: EdgeStyle,
    pub left: EdgeStyle,
    pub right: EdgeStyle,
}

/// Border styles of `(row, col)`.
///
/// An edge is on a region's outline when the region contains the cell but
/// not the neighbor across that edge. Neighbors outside the sheet count as
/// unselected. Copied outlines win over selection outlines.
pub fn border_edges(
    selections: &[Selection],
    copied_selections: &[Selection],
    dims: GridDims,
    row: i64,
    col: i64,
) -> CellBorders {
    let edge = |d_row: i64, d_col: i64| {
        let neighbor = (row + d_row, col + d_col);
        if on_outline(copied_selections, dims, (row, col), neighbor) {
            EdgeStyle::Copied
        } else if on_outline(selections, dims, (row, col), neighbor) {
            EdgeStyle::Selected
        } else {
            EdgeStyle::Grid
        }
    };
    CellBorders {
        top: edge(-1, 0),
        bottom: edge(1, 0),
        left: edge(0, -1),
        right: edge(0, 1),
    }
}

fn on_outline(
    selections: &[Selection],
    dims: GridDims,
    (row, col): (i64, i64),
    (n_row, n_col): (i64, i64),
) -> bool {
    let neighbor_valid = dims.contains(n_row, n_col);
    selections
        .iter()
        .any(|s| s.contains(row, col) && !(neighbor_valid && s.contains(n_row, n_col)))
}
