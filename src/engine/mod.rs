//! The grid engine: one owner for grid, width and editor state, driven by
//! [`GridEvent`]s.
//!
//! Every event is handled synchronously. Commands for the backend are pushed
//! into a [`CommandChannel`] as they are issued; the only thing read back is
//! the [`CommandResponse`](crate::commands::CommandResponse) for the
//! editor's in-flight submission.

mod editing;
mod events;
mod keys;
mod structure;

use std::mem;

use log::debug;
use serde::Serialize;

use crate::commands::{Command, CommandChannel, CommandId};
use crate::config::GridConfig;
use crate::editor::{discard_pending, display_formula, drag_pick, pick_with_pointer, PickTarget};
use crate::error::{GridError, Result};
use crate::layout::{cell_at_point, clamp_scroll, scroll_into_view, sheet_view, translate, WidthModel};
use crate::selection::{border_edges, on_mouse_down, on_mouse_drag, CellBorders};
use crate::types::{
    EditorState, GridDims, GridState, Modifiers, ScrollPosition, SheetData, SheetView, Translate,
    Viewport,
};

pub use events::GridEvent;

/// Interactive grid over a set of sheets.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    config: GridConfig,
    sheets: Vec<SheetData>,
    state: GridState,
    widths: WidthModel,
    editor: EditorState,
    next_command_id: u64,
    /// A pointer press landed on a cell and has not been released.
    pointer_down: bool,
}

/// Serializable view of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub state: GridState,
    pub sheet_view: SheetView,
    pub translate: Translate,
    pub editor: EditorState,
    /// Editor text with pending picks resolved in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_formula: Option<String>,
    pub column_widths: Vec<f32>,
}

impl SheetGrid {
    /// Create a grid showing the first sheet.
    pub fn new(config: GridConfig, sheets: Vec<SheetData>) -> Result<Self> {
        config.validate()?;
        let mut widths = WidthModel::new(config.default_column_width);
        for (index, sheet) in sheets.iter().enumerate() {
            widths.initialize(index, sheet.num_columns());
        }
        debug!("engine: created with {} sheet(s)", sheets.len());
        Ok(Self {
            config,
            sheets,
            state: GridState::new(0),
            widths,
            editor: EditorState::Idle,
            next_command_id: 1,
            pointer_down: false,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn sheets(&self) -> &[SheetData] {
        &self.sheets
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn widths(&self) -> &WidthModel {
        &self.widths
    }

    pub fn editor(&self) -> &EditorState {
        &self.editor
    }

    /// Size of the sheet being viewed; empty when it does not exist.
    pub fn dims(&self) -> GridDims {
        self.sheets
            .get(self.state.sheet_index)
            .map_or_else(GridDims::default, SheetData::dims)
    }

    pub fn sheet_view(&self) -> SheetView {
        sheet_view(&self.state, &self.widths, &self.config)
    }

    pub fn translate(&self) -> Translate {
        translate(&self.state, &self.widths, &self.config)
    }

    /// Border styling for one cell of the viewed sheet.
    pub fn cell_borders(&self, row: i64, col: i64) -> CellBorders {
        border_edges(
            &self.state.selections,
            &self.state.copied_selections,
            self.dims(),
            row,
            col,
        )
    }

    /// Editor text as it should be displayed, picks included.
    pub fn display_formula(&self) -> Option<String> {
        display_formula(&self.editor, &self.sheets)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            state: self.state.clone(),
            sheet_view: self.sheet_view(),
            translate: self.translate(),
            editor: self.editor.clone(),
            display_formula: self.display_formula(),
            column_widths: self
                .widths
                .sheet(self.state.sheet_index)
                .map(|d| d.width_array.clone())
                .unwrap_or_default(),
        }
    }

    /// Apply one event. Commands issued along the way go to `channel`.
    ///
    /// Only events naming something that does not exist (an unknown sheet)
    /// are errors; everything else degrades to a no-op.
    pub fn handle(&mut self, event: GridEvent, channel: &mut dyn CommandChannel) -> Result<()> {
        match event {
            GridEvent::PointerDown { x, y, modifiers } => {
                self.pointer_pressed(x, y, modifiers, channel);
            }
            GridEvent::PointerMove { x, y } => self.pointer_moved(x, y),
            GridEvent::PointerUp => self.pointer_down = false,
            GridEvent::KeyDown { key, modifiers } => self.key_down(&key, modifiers, channel),
            GridEvent::TypeText { text } => self.type_text(&text),
            GridEvent::SetCursor { start, end } => self.set_cursor(start, end),
            GridEvent::Scroll {
                scroll_left,
                scroll_top,
            } => self.scroll_to(ScrollPosition {
                scroll_left,
                scroll_top,
            }),
            GridEvent::ResizeViewport { width, height } => {
                self.state.viewport = Viewport {
                    width: width.max(0.0),
                    height: height.max(0.0),
                };
                self.scroll_to(self.state.scroll_position);
            }
            GridEvent::ResizeColumn {
                column_index,
                width,
            } => self.resize_column(column_index, width, channel),
            GridEvent::ReorderColumn {
                column_index,
                new_index,
            } => self.reorder_column(column_index, new_index, channel),
            GridEvent::SwitchSheet { sheet_index } => self.switch_sheet(sheet_index)?,
            GridEvent::SheetDataChanged { sheets } => self.sheet_data_changed(sheets),
            GridEvent::Copy => self.copy(),
            GridEvent::OpenEditor {
                editing_mode,
                initial_text,
            } => {
                self.open_editor(initial_text.as_deref(), editing_mode);
            }
            GridEvent::SelectSuggestion { index } => {
                self.accept_suggestion(index);
            }
            GridEvent::CommandResponse(response) => self.command_response(&response),
        }
        Ok(())
    }

    /// By-value form of [`handle`](Self::handle), returning the commands the
    /// event issued.
    pub fn transition(
        mut grid: SheetGrid,
        event: GridEvent,
    ) -> Result<(SheetGrid, Vec<(CommandId, Command)>)> {
        let mut issued = Vec::new();
        grid.handle(event, &mut issued)?;
        Ok((grid, issued))
    }

    fn issue(&mut self, command: Command, channel: &mut dyn CommandChannel) -> CommandId {
        let id = CommandId(self.next_command_id);
        self.next_command_id += 1;
        debug!("engine: issuing {} {id}", command.name());
        channel.send(id, command);
        id
    }

    fn hit(&self, x: f32, y: f32) -> Option<(i64, i64)> {
        cell_at_point(&self.state, &self.widths, &self.config, self.dims(), x, y)
    }

    fn scroll_to(&mut self, scroll: ScrollPosition) {
        self.state.scroll_position =
            clamp_scroll(&self.state, &self.widths, &self.config, self.dims(), scroll);
    }

    fn reveal(&mut self, row: i64, col: i64) {
        let scroll = scroll_into_view(&self.state, &self.widths, &self.config, row, col);
        self.scroll_to(scroll);
    }

    /// Whether pointer and arrow input currently picks references into the
    /// editor instead of moving the grid selection.
    fn picking(&self) -> bool {
        self.editor
            .session()
            .is_some_and(|s| s.loading.is_none() && s.picks_enabled())
    }

    fn pointer_pressed(
        &mut self,
        x: f32,
        y: f32,
        modifiers: Modifiers,
        channel: &mut dyn CommandChannel,
    ) {
        self.pointer_down = false;
        let Some((row, col)) = self.hit(x, y) else {
            return;
        };
        self.pointer_down = true;
        let dims = self.dims();

        if self.picking() {
            let target = PickTarget {
                sheet_index: self.state.sheet_index,
                dims,
                selections: &self.state.selections,
            };
            let editor = mem::take(&mut self.editor);
            self.editor = pick_with_pointer(editor, target, row, col, modifiers);
            return;
        }
        if self.editor.session().is_some_and(|s| s.loading.is_none()) {
            self.submit(channel);
        }
        let selections = on_mouse_down(
            &self.state.selections,
            self.state.sheet_index,
            dims,
            row,
            col,
            modifiers,
        );
        self.state.set_selections(selections);
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        if !self.pointer_down {
            return;
        }
        let Some((row, col)) = self.hit(x, y) else {
            return;
        };
        let dims = self.dims();
        if self.editor.pending().is_some() {
            let editor = mem::take(&mut self.editor);
            self.editor = drag_pick(editor, dims, row, col);
        } else {
            let selections = on_mouse_drag(&self.state.selections, dims, row, col);
            self.state.set_selections(selections);
        }
    }

    fn copy(&mut self) {
        self.state.copied_selections = self.state.selections.clone();
    }

    fn switch_sheet(&mut self, sheet_index: usize) -> Result<()> {
        let Some(sheet) = self.sheets.get(sheet_index) else {
            return Err(GridError::SheetIndex(sheet_index));
        };
        if self.widths.sheet(sheet_index).is_none() {
            self.widths.initialize(sheet_index, sheet.num_columns());
        }
        debug!(
            "engine: switching sheet {} -> {sheet_index}",
            self.state.sheet_index
        );
        let viewport = self.state.viewport;
        self.state = GridState::new(sheet_index);
        self.state.viewport = viewport;
        // The editor stays open so references can be picked from this sheet.
        self.editor = discard_pending(mem::take(&mut self.editor));
        self.pointer_down = false;
        Ok(())
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
pub(crate) mod tests {
    use super::*;
    use crate::types::{ColumnData, Selection};

    pub(crate) fn sheets() -> Vec<SheetData> {
        let mut revenue = ColumnData::new("r", "Revenue");
        revenue.values = (0..20).map(|i| (i * 10).to_string()).collect();
        let mut cost = ColumnData::new("c", "Cost");
        cost.values = (0..20).map(|i| i.to_string()).collect();
        let mut profit = ColumnData::new("p", "Profit");
        profit.formula = Some("=Revenue0 - Cost0".into());
        let first = SheetData {
            name: "df1".into(),
            columns: vec![revenue, cost, profit],
            index_labels: (0..20).map(|i| i.to_string()).collect(),
            num_rows: 20,
        };
        let second = SheetData {
            name: "df2".into(),
            columns: vec![ColumnData::new("x", "Name")],
            index_labels: vec!["a".into(), "b".into()],
            num_rows: 2,
        };
        vec![first, second]
    }

    pub(crate) fn grid() -> SheetGrid {
        SheetGrid::new(GridConfig::default(), sheets()).unwrap()
    }

    /// Centre of a cell in pointer coordinates under the default config.
    pub(crate) fn point(grid: &SheetGrid, row: i64, col: i64) -> (f32, f32) {
        let config = grid.config();
        let x = if col < 0 {
            config.row_label_width / 2.0
        } else {
            config.row_label_width + config.default_column_width * (col as f32 + 0.5)
                - grid.state().scroll_position.scroll_left
        };
        let y = if row < 0 {
            config.column_header_height / 2.0
        } else {
            config.column_header_height + config.row_height * (row as f32 + 0.5)
                - grid.state().scroll_position.scroll_top
        };
        (x, y)
    }

    pub(crate) fn click(grid: &mut SheetGrid, row: i64, col: i64, modifiers: Modifiers) {
        let (x, y) = point(grid, row, col);
        let mut out = Vec::new();
        grid.handle(GridEvent::PointerDown { x, y, modifiers }, &mut out)
            .unwrap();
        grid.handle(GridEvent::PointerUp, &mut out).unwrap();
    }

    #[test]
    fn starts_on_first_sheet_with_default_selection() {
        let grid = grid();
        assert_eq!(grid.state().selections, vec![Selection::default_for(0)]);
        assert_eq!(grid.widths().sheet(1).unwrap().len(), 1);
        assert!(!grid.editor().is_open());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GridConfig {
            row_height: 0.0,
            ..GridConfig::default()
        };
        assert!(matches!(
            SheetGrid::new(config, sheets()),
            Err(GridError::Config(_))
        ));
    }

    #[test]
    fn click_then_drag_selects_a_rectangle() {
        let mut grid = grid();
        let mut out = Vec::new();
        let (x, y) = point(&grid, 1, 0);
        grid.handle(
            GridEvent::PointerDown {
                x,
                y,
                modifiers: Modifiers::NONE,
            },
            &mut out,
        )
        .unwrap();
        let (x, y) = point(&grid, 3, 2);
        grid.handle(GridEvent::PointerMove { x, y }, &mut out).unwrap();
        grid.handle(GridEvent::PointerUp, &mut out).unwrap();
        // Moves after release do nothing.
        let (x, y) = point(&grid, 5, 1);
        grid.handle(GridEvent::PointerMove { x, y }, &mut out).unwrap();

        assert_eq!(
            grid.state().selections,
            vec![Selection::cell(0, 1, 0).with_end(3, 2)]
        );
        assert!(out.is_empty());
    }

    #[test]
    fn header_click_selects_column() {
        let mut grid = grid();
        click(&mut grid, -1, 1, Modifiers::NONE);
        assert_eq!(grid.state().selections, vec![Selection::columns(0, 1, 1)]);
    }

    #[test]
    fn corner_click_is_ignored() {
        let mut grid = grid();
        click(&mut grid, 2, 2, Modifiers::NONE);
        let mut out = Vec::new();
        grid.handle(
            GridEvent::PointerDown {
                x: 5.0,
                y: 5.0,
                modifiers: Modifiers::NONE,
            },
            &mut out,
        )
        .unwrap();
        assert_eq!(grid.state().selections, vec![Selection::cell(0, 2, 2)]);
    }

    #[test]
    fn scroll_is_clamped_and_viewport_follows() {
        let mut grid = grid();
        let mut out = Vec::new();
        grid.handle(
            GridEvent::ResizeViewport {
                width: 200.0,
                height: 100.0,
            },
            &mut out,
        )
        .unwrap();
        grid.handle(
            GridEvent::Scroll {
                scroll_left: 10_000.0,
                scroll_top: 130.0,
            },
            &mut out,
        )
        .unwrap();
        // 3 columns of 120 in a 200-wide viewport; 20 rows of 25 in 100.
        assert_eq!(grid.state().scroll_position.scroll_left, 160.0);
        assert_eq!(grid.state().scroll_position.scroll_top, 130.0);
        let view = grid.sheet_view();
        assert_eq!(view.starting_row_index, 5);
        assert_eq!(view.starting_column_index, 1);
        assert_eq!(grid.translate().y, 5.0);
    }

    #[test]
    fn copy_marks_selection_until_escape() {
        let mut grid = grid();
        click(&mut grid, 1, 1, Modifiers::NONE);
        let mut out = Vec::new();
        grid.handle(GridEvent::Copy, &mut out).unwrap();
        assert_eq!(grid.state().copied_selections, vec![Selection::cell(0, 1, 1)]);
        assert_eq!(
            grid.cell_borders(1, 1).top,
            crate::selection::EdgeStyle::Copied
        );
        grid.handle(
            GridEvent::KeyDown {
                key: crate::types::Key::Escape,
                modifiers: Modifiers::NONE,
            },
            &mut out,
        )
        .unwrap();
        assert!(grid.state().copied_selections.is_empty());
    }

    #[test]
    fn switching_to_unknown_sheet_is_an_error() {
        let mut grid = grid();
        let mut out = Vec::new();
        assert!(matches!(
            grid.handle(GridEvent::SwitchSheet { sheet_index: 9 }, &mut out),
            Err(GridError::SheetIndex(9))
        ));
        assert_eq!(grid.state().sheet_index, 0);
    }

    #[test]
    fn switching_sheet_resets_view() {
        let mut grid = grid();
        click(&mut grid, 3, 1, Modifiers::NONE);
        let mut out = Vec::new();
        grid.handle(GridEvent::Copy, &mut out).unwrap();
        grid.handle(GridEvent::SwitchSheet { sheet_index: 1 }, &mut out)
            .unwrap();
        assert_eq!(grid.state().sheet_index, 1);
        assert_eq!(grid.state().selections, vec![Selection::default_for(1)]);
        assert!(grid.state().copied_selections.is_empty());
        assert_eq!(grid.dims(), GridDims::new(2, 1));
    }

    #[test]
    fn transition_returns_issued_commands() {
        let mut grid = grid();
        click(&mut grid, -1, 0, Modifiers::NONE);
        let (grid, issued) = SheetGrid::transition(
            grid,
            GridEvent::KeyDown {
                key: crate::types::Key::Delete,
                modifiers: Modifiers::NONE,
            },
        )
        .unwrap();
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].0, CommandId(1));
        assert!(!grid.editor().is_open());
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let json = serde_json::to_value(grid().snapshot()).unwrap();
        assert!(json["sheetView"]["numRowsRendered"].is_number());
        assert_eq!(json["columnWidths"].as_array().unwrap().len(), 3);
        assert_eq!(json["editor"]["state"], "idle");
    }
}
