//! Keyboard handling for the grid and the open editor.

use std::mem;

use log::debug;

use super::SheetGrid;
use crate::commands::{Command, CommandChannel};
use crate::editor::{input, pick_with_key, PickTarget};
use crate::selection::{
    column_ids_of_full_column_selections, is_only_full_columns, is_only_full_rows,
    row_labels_of_full_row_selections, selection_after_key_press,
};
use crate::types::{EditorState, Key, Modifiers, Selection};

impl SheetGrid {
    pub(super) fn key_down(&mut self, key: &Key, modifiers: Modifiers, channel: &mut dyn CommandChannel) {
        if self.editor.is_open() {
            self.editor_key(key, modifiers, channel);
        } else {
            self.grid_key(key, modifiers, channel);
        }
    }

    fn grid_key(&mut self, key: &Key, modifiers: Modifiers, channel: &mut dyn CommandChannel) {
        match key {
            Key::Arrow(_) | Key::Tab => self.navigate(key, modifiers),
            Key::Escape => self.state.copied_selections.clear(),
            Key::Character(c) if modifiers.jump() => {
                if c.eq_ignore_ascii_case(&'c') {
                    self.copy();
                }
            }
            Key::Enter => {
                self.open_editor(None, None);
            }
            Key::Backspace | Key::Delete => self.delete_selection(channel),
            Key::Character(c) if !modifiers.alt => {
                self.open_editor(Some(c.encode_utf8(&mut [0; 4])), None);
            }
            Key::Character(_) | Key::Other(_) => {}
        }
    }

    fn navigate(&mut self, key: &Key, modifiers: Modifiers) {
        let selections =
            selection_after_key_press(&self.state.selections, self.dims(), key, modifiers);
        self.state.set_selections(selections);
        if let Some((row, col)) = self.state.active_selection().map(Selection::end) {
            self.reveal(row, col);
        }
    }

    /// Header selections delete what they cover; anything else clears the
    /// active cell through the editor.
    fn delete_selection(&mut self, channel: &mut dyn CommandChannel) {
        let sheet_index = self.state.sheet_index;
        let Some(sheet) = self.sheets.get(sheet_index) else {
            return;
        };
        let selections = &self.state.selections;
        let command = if is_only_full_columns(selections) {
            let column_ids = column_ids_of_full_column_selections(selections, sheet);
            (!column_ids.is_empty()).then_some(Command::DeleteColumns {
                sheet_index,
                column_ids,
            })
        } else if is_only_full_rows(selections) {
            let labels = row_labels_of_full_row_selections(selections, sheet);
            (!labels.is_empty()).then_some(Command::DeleteRows {
                sheet_index,
                labels,
            })
        } else {
            self.open_editor(Some(""), None);
            return;
        };
        if let Some(command) = command {
            self.issue(command, channel);
            self.state.copied_selections.clear();
        }
    }

    fn editor_key(&mut self, key: &Key, modifiers: Modifiers, channel: &mut dyn CommandChannel) {
        let loading = match self.editor.session_mut() {
            Some(session) => {
                session.cell_editor_error = None;
                session.loading.is_some()
            }
            None => return,
        };
        if loading && *key != Key::Escape {
            return;
        }

        match key {
            Key::Escape => {
                debug!("engine: editor cancelled");
                self.close_editor();
                self.state.copied_selections.clear();
            }
            Key::Enter | Key::Tab => {
                if !self.accept_suggestion(0) {
                    self.submit(channel);
                }
            }
            Key::Arrow(direction) => {
                if self.picking() {
                    self.pick_with_arrow(key, modifiers);
                } else if let Some(session) = self.editor.session_mut() {
                    input::move_caret(session, *direction);
                }
            }
            Key::Backspace => self.edit(input::backspace),
            Key::Delete => self.edit(input::delete_forward),
            Key::Character(c) if !modifiers.jump() => {
                let mut buf = [0; 4];
                let text: &str = c.encode_utf8(&mut buf);
                self.edit(|session| input::insert_text(session, text));
            }
            Key::Character(_) | Key::Other(_) => {}
        }
    }

    fn pick_with_arrow(&mut self, key: &Key, modifiers: Modifiers) {
        let target = PickTarget {
            sheet_index: self.state.sheet_index,
            dims: self.dims(),
            selections: &self.state.selections,
        };
        let editor = mem::take(&mut self.editor);
        self.editor = pick_with_key(editor, target, key, modifiers);
        let picked = match &self.editor {
            EditorState::Picking { pending, .. } => pending.selections.last().map(Selection::end),
            _ => None,
        };
        if let Some((row, col)) = picked {
            self.reveal(row, col);
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
    use super::super::tests::{click, grid, point};
    use super::super::{GridEvent, SheetGrid};
    use crate::commands::{Command, CommandId};
    use crate::types::{ColumnId, Direction, EditingMode, Key, Modifiers, Selection};

    fn press(grid: &mut SheetGrid, key: Key, modifiers: Modifiers) -> Vec<(CommandId, Command)> {
        let mut out = Vec::new();
        grid.handle(GridEvent::KeyDown { key, modifiers }, &mut out)
            .unwrap();
        out
    }

    #[test]
    fn arrows_move_and_scroll() {
        let mut grid = grid();
        grid.handle(
            GridEvent::ResizeViewport {
                width: 400.0,
                height: 100.0,
            },
            &mut Vec::new(),
        )
        .unwrap();
        for _ in 0..6 {
            press(&mut grid, Key::Arrow(Direction::Down), Modifiers::NONE);
        }
        assert_eq!(grid.state().selections, vec![Selection::cell(0, 5, 0)]);
        // Row 5 spans 125..150 in a 100-high viewport.
        assert_eq!(grid.state().scroll_position.scroll_top, 50.0);
    }

    #[test]
    fn shift_arrow_extends() {
        let mut grid = grid();
        click(&mut grid, 1, 1, Modifiers::NONE);
        press(&mut grid, Key::Arrow(Direction::Right), Modifiers::SHIFT);
        press(&mut grid, Key::Arrow(Direction::Down), Modifiers::SHIFT);
        assert_eq!(
            grid.state().selections,
            vec![Selection::cell(0, 1, 1).with_end(2, 2)]
        );
    }

    #[test]
    fn ctrl_c_copies() {
        let mut grid = grid();
        click(&mut grid, 2, 2, Modifiers::NONE);
        press(&mut grid, Key::Character('c'), Modifiers::CTRL);
        assert_eq!(grid.state().copied_selections, grid.state().selections);
        assert!(!grid.editor().is_open());
    }

    #[test]
    fn delete_on_full_columns_issues_delete_columns() {
        let mut grid = grid();
        click(&mut grid, -1, 0, Modifiers::NONE);
        click(&mut grid, -1, 2, Modifiers::CTRL);
        let out = press(&mut grid, Key::Backspace, Modifiers::NONE);
        assert_eq!(
            out,
            vec![(
                CommandId(1),
                Command::DeleteColumns {
                    sheet_index: 0,
                    column_ids: vec![ColumnId::from("r"), ColumnId::from("p")],
                }
            )]
        );
    }

    #[test]
    fn delete_on_full_rows_issues_delete_rows() {
        let mut grid = grid();
        click(&mut grid, 4, -1, Modifiers::NONE);
        click(&mut grid, 6, -1, Modifiers::SHIFT);
        let out = press(&mut grid, Key::Delete, Modifiers::NONE);
        assert_eq!(
            out,
            vec![(
                CommandId(1),
                Command::DeleteRows {
                    sheet_index: 0,
                    labels: vec!["4".into(), "5".into(), "6".into()],
                }
            )]
        );
    }

    #[test]
    fn delete_on_cell_opens_empty_editor() {
        let mut grid = grid();
        click(&mut grid, 1, 0, Modifiers::NONE);
        let out = press(&mut grid, Key::Delete, Modifiers::NONE);
        assert!(out.is_empty());
        let session = grid.editor().session().unwrap();
        assert_eq!(session.formula, "");
        assert_eq!(session.original_formula, "10");
    }

    #[test]
    fn arrow_picks_reference_while_editing_formula() {
        let mut grid = grid();
        click(&mut grid, 3, 2, Modifiers::NONE);
        press(&mut grid, Key::Character('='), Modifiers::NONE);
        press(&mut grid, Key::Arrow(Direction::Left), Modifiers::NONE);
        assert_eq!(grid.display_formula().unwrap(), "=Cost3");
        press(&mut grid, Key::Arrow(Direction::Left), Modifiers::SHIFT);
        assert_eq!(grid.display_formula().unwrap(), "=Revenue3:Cost3");
        // The grid selection itself does not move while picking.
        assert_eq!(grid.state().selections, vec![Selection::cell(0, 3, 2)]);

        press(&mut grid, Key::Character('+'), Modifiers::NONE);
        let session = grid.editor().session().unwrap();
        assert!(grid.editor().pending().is_none());
        assert_eq!(session.formula, "=Revenue3:Cost3+");
    }

    #[test]
    fn arrows_move_caret_after_set_cursor() {
        let mut grid = grid();
        click(&mut grid, 0, 2, Modifiers::NONE);
        press(&mut grid, Key::Enter, Modifiers::NONE);
        assert_eq!(
            grid.editor().session().unwrap().editing_mode,
            EditingMode::SetColumnFormula
        );
        grid.handle(GridEvent::SetCursor { start: 3, end: 3 }, &mut Vec::new())
            .unwrap();
        press(&mut grid, Key::Arrow(Direction::Left), Modifiers::NONE);
        let session = grid.editor().session().unwrap();
        assert!(grid.editor().pending().is_none());
        assert_eq!(session.cursor.end, 2);
    }

    #[test]
    fn pointer_picks_while_editing_formula() {
        let mut grid = grid();
        click(&mut grid, 0, 2, Modifiers::NONE);
        press(&mut grid, Key::Character('='), Modifiers::NONE);
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
        let (x, y) = point(&grid, 4, 0);
        grid.handle(GridEvent::PointerMove { x, y }, &mut out).unwrap();
        grid.handle(GridEvent::PointerUp, &mut out).unwrap();
        assert_eq!(grid.display_formula().unwrap(), "=Revenue1:Revenue4");
        assert!(out.is_empty());

        let issued = press(&mut grid, Key::Enter, Modifiers::NONE);
        assert_eq!(issued.len(), 1);
        assert!(grid.editor().session().unwrap().loading.is_some());
    }

    #[test]
    fn clicking_away_from_value_editor_submits_it() {
        let mut grid = grid();
        let mut out = Vec::new();
        click(&mut grid, 0, 1, Modifiers::NONE);
        press(&mut grid, Key::Character('5'), Modifiers::NONE);
        let (x, y) = point(&grid, 2, 0);
        grid.handle(
            GridEvent::PointerDown {
                x,
                y,
                modifiers: Modifiers::NONE,
            },
            &mut out,
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(grid.state().selections, vec![Selection::cell(0, 2, 0)]);
    }

    #[test]
    fn escape_cancels_picks_and_editor() {
        let mut grid = grid();
        click(&mut grid, 0, 2, Modifiers::NONE);
        press(&mut grid, Key::Character('='), Modifiers::NONE);
        press(&mut grid, Key::Arrow(Direction::Up), Modifiers::NONE);
        assert!(grid.editor().pending().is_some());
        let out = press(&mut grid, Key::Escape, Modifiers::NONE);
        assert!(out.is_empty());
        assert!(!grid.editor().is_open());
    }
}
