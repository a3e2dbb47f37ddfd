//! Column resizes, reorders and backend shape changes.

use std::mem;

use log::debug;

use super::SheetGrid;
use crate::commands::{Command, CommandChannel};
use crate::editor::discard_pending;
use crate::reconcile::{reconcile_selections, reconcile_widths, PreviousColumns};
use crate::types::{from_index, last_index, EditorState, GridState, Selection, SheetData, HEADER_INDEX};

impl SheetGrid {
    /// Resize a column locally. The backend only hears about it when the
    /// host persists widths.
    pub(super) fn resize_column(&mut self, col: i64, width: f32, channel: &mut dyn CommandChannel) {
        let sheet_index = self.state.sheet_index;
        if !self.widths.set_width(sheet_index, col, width) {
            return;
        }
        if self.config.persist_column_widths {
            if let Some(column_id) = self
                .sheets
                .get(sheet_index)
                .and_then(|s| s.column_id(col))
                .cloned()
            {
                let width = self.widths.width_of(sheet_index, col);
                self.issue(
                    Command::ResizeColumn {
                        sheet_index,
                        column_id,
                        width,
                    },
                    channel,
                );
            }
        }
        self.scroll_to(self.state.scroll_position);
    }

    /// Ask the backend to move a column; the selection follows it.
    pub(super) fn reorder_column(
        &mut self,
        col: i64,
        new_index: usize,
        channel: &mut dyn CommandChannel,
    ) {
        let sheet_index = self.state.sheet_index;
        let Some(sheet) = self.sheets.get(sheet_index) else {
            return;
        };
        let Some(column_id) = sheet.column_id(col).cloned() else {
            return;
        };
        let new_index = new_index.min(sheet.num_columns().saturating_sub(1));
        self.issue(
            Command::ReorderColumn {
                sheet_index,
                column_id,
                new_index,
            },
            channel,
        );
        let dest = from_index(new_index);
        self.state
            .set_selections(vec![Selection::columns(sheet_index, dest, dest)]);
        self.state.copied_selections.clear();
    }

    /// Take a fresh snapshot of every sheet and carry selections, widths and
    /// the editor over to it.
    pub(super) fn sheet_data_changed(&mut self, sheets: Vec<SheetData>) {
        let old = mem::replace(&mut self.sheets, sheets);

        for (index, sheet) in self.sheets.iter().enumerate() {
            match old.get(index) {
                Some(previous) if self.widths.sheet(index).is_some() => reconcile_widths(
                    &mut self.widths,
                    index,
                    &previous.column_ids(),
                    &sheet.column_ids(),
                ),
                _ => self.widths.initialize(index, sheet.num_columns()),
            }
        }
        for index in self.sheets.len()..old.len() {
            self.widths.remove_sheet(index);
        }

        let sheet_index = self.state.sheet_index;
        if sheet_index < self.sheets.len() {
            let previous_ids = old.get(sheet_index).map(SheetData::column_ids);
            let previous = previous_ids.as_deref().map(|column_ids| PreviousColumns {
                sheet_index,
                column_ids,
            });
            let new_ids = self
                .sheets
                .get(sheet_index)
                .map(SheetData::column_ids)
                .unwrap_or_default();
            let selections = reconcile_selections(
                &self.state.selections,
                previous,
                sheet_index,
                &new_ids,
                self.dims(),
            );
            self.state.set_selections(selections);
        } else {
            let fallback = self.sheets.len().saturating_sub(1);
            debug!("engine: sheet {sheet_index} removed, showing sheet {fallback}");
            let viewport = self.state.viewport;
            self.state = GridState::new(fallback);
            self.state.viewport = viewport;
        }
        self.state.copied_selections.clear();
        self.pointer_down = false;

        let editor = mem::take(&mut self.editor);
        self.editor = self.carry_editor(editor, &old);
        self.scroll_to(self.state.scroll_position);
    }

    /// Follow the edited column by identity; close the editor when its
    /// column or row is gone.
    fn carry_editor(&self, editor: EditorState, old: &[SheetData]) -> EditorState {
        let mut editor = discard_pending(editor);
        let Some(session) = editor.session_mut() else {
            return editor;
        };
        let sheet = self.sheets.get(session.sheet_index);
        let column_id = old
            .get(session.sheet_index)
            .and_then(|s| s.column_id(session.column_index));
        let new_col = match (sheet, column_id) {
            (Some(sheet), Some(id)) => sheet.columns.iter().position(|c| &c.column_id == id),
            _ => None,
        };
        let row_exists = session.row_index == HEADER_INDEX
            || sheet.is_some_and(|s| session.row_index <= last_index(s.num_rows));
        match new_col {
            Some(col) if row_exists => {
                session.column_index = from_index(col);
                editor
            }
            _ => {
                debug!("engine: edited cell no longer exists, closing editor");
                EditorState::Idle
            }
        }
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
    use super::super::tests::{click, grid, sheets};
    use super::super::{GridEvent, SheetGrid};
    use crate::commands::{Command, CommandId};
    use crate::config::GridConfig;
    use crate::types::{ColumnData, ColumnId, Key, Modifiers, Selection};

    fn handle(grid: &mut SheetGrid, event: GridEvent) -> Vec<(CommandId, Command)> {
        let mut out = Vec::new();
        grid.handle(event, &mut out).unwrap();
        out
    }

    #[test]
    fn resize_is_local_unless_persisted() {
        let mut grid = grid();
        let out = handle(
            &mut grid,
            GridEvent::ResizeColumn {
                column_index: 1,
                width: 200.0,
            },
        );
        assert!(out.is_empty());
        assert_eq!(grid.widths().width_of(0, 1), 200.0);

        let config = GridConfig {
            persist_column_widths: true,
            ..GridConfig::default()
        };
        let mut grid = SheetGrid::new(config, sheets()).unwrap();
        let out = handle(
            &mut grid,
            GridEvent::ResizeColumn {
                column_index: 0,
                width: 1.0,
            },
        );
        assert_eq!(
            out,
            vec![(
                CommandId(1),
                Command::ResizeColumn {
                    sheet_index: 0,
                    column_id: ColumnId::from("r"),
                    width: crate::layout::MIN_COLUMN_WIDTH,
                }
            )]
        );
    }

    #[test]
    fn reorder_moves_selection_and_survives_reconcile() {
        let mut grid = grid();
        let out = handle(
            &mut grid,
            GridEvent::ReorderColumn {
                column_index: 0,
                new_index: 9,
            },
        );
        assert_eq!(
            out,
            vec![(
                CommandId(1),
                Command::ReorderColumn {
                    sheet_index: 0,
                    column_id: ColumnId::from("r"),
                    new_index: 2,
                }
            )]
        );
        assert_eq!(grid.state().selections, vec![Selection::columns(0, 2, 2)]);

        let mut reordered = sheets();
        reordered[0].columns.rotate_left(1);
        handle(&mut grid, GridEvent::SheetDataChanged { sheets: reordered });
        assert_eq!(grid.state().selections, vec![Selection::columns(0, 2, 2)]);
    }

    #[test]
    fn deleted_column_shifts_selection_and_widths() {
        let mut grid = grid();
        handle(
            &mut grid,
            GridEvent::ResizeColumn {
                column_index: 2,
                width: 300.0,
            },
        );
        click(&mut grid, 1, 2, Modifiers::NONE);
        handle(&mut grid, GridEvent::Copy);

        let mut changed = sheets();
        changed[0].columns.remove(1);
        handle(&mut grid, GridEvent::SheetDataChanged { sheets: changed });

        assert_eq!(grid.state().selections, vec![Selection::cell(0, 1, 1)]);
        assert!(grid.state().copied_selections.is_empty());
        assert_eq!(
            grid.widths().sheet(0).unwrap().width_array,
            vec![120.0, 300.0]
        );
    }

    #[test]
    fn inserted_column_keeps_selection_on_same_column() {
        let mut grid = grid();
        click(&mut grid, 0, 1, Modifiers::NONE);
        let mut changed = sheets();
        changed[0].columns.insert(0, ColumnData::new("n", "New"));
        handle(&mut grid, GridEvent::SheetDataChanged { sheets: changed });
        assert_eq!(grid.state().selections, vec![Selection::cell(0, 0, 2)]);
        assert_eq!(grid.widths().sheet(0).unwrap().len(), 4);
    }

    #[test]
    fn editor_follows_its_column() {
        let mut grid = grid();
        click(&mut grid, 0, 2, Modifiers::NONE);
        handle(
            &mut grid,
            GridEvent::KeyDown {
                key: Key::Enter,
                modifiers: Modifiers::NONE,
            },
        );
        let mut changed = sheets();
        changed[0].columns.remove(0);
        handle(&mut grid, GridEvent::SheetDataChanged { sheets: changed.clone() });
        assert_eq!(grid.editor().session().unwrap().column_index, 1);

        changed[0].columns.pop();
        handle(&mut grid, GridEvent::SheetDataChanged { sheets: changed });
        assert!(!grid.editor().is_open());
    }

    #[test]
    fn removed_sheet_falls_back() {
        let mut grid = grid();
        handle(&mut grid, GridEvent::SwitchSheet { sheet_index: 1 });
        let mut changed = sheets();
        changed.truncate(1);
        handle(&mut grid, GridEvent::SheetDataChanged { sheets: changed });
        assert_eq!(grid.state().sheet_index, 0);
        assert!(grid.widths().sheet(1).is_none());
        assert_eq!(grid.state().selections, vec![Selection::default_for(0)]);
    }
}
