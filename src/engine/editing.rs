//! Editor lifecycle: open, edit, submit, and the backend's answer.

use std::mem;

use log::{debug, warn};

use super::SheetGrid;
use crate::commands::{CommandChannel, CommandResponse};
use crate::editor::{build_command, freeze_pending, input, open_session, refresh_suggestions, Submission};
use crate::formula::accept_suggestion;
use crate::types::{CursorSpan, EditSession, EditingMode, EditorState, Selection};

impl SheetGrid {
    /// Open an editor on the active cell, replacing any open one. Returns
    /// false when the active cell cannot be edited.
    pub(super) fn open_editor(&mut self, initial_text: Option<&str>, mode: Option<EditingMode>) -> bool {
        let Some((row, col)) = self.state.active_selection().map(Selection::start) else {
            return false;
        };
        let Some(mut session) =
            open_session(&self.sheets, self.state.sheet_index, row, col, initial_text, mode)
        else {
            debug!("engine: ({row}, {col}) is not editable");
            return false;
        };
        if initial_text.is_some() {
            refresh_suggestions(&mut session, &self.sheets, &self.config);
        }
        self.editor = EditorState::Editing(session);
        self.reveal(row, col);
        true
    }

    pub(super) fn close_editor(&mut self) {
        self.editor = EditorState::Idle;
    }

    fn loading(&self) -> bool {
        self.editor.session().is_some_and(|s| s.loading.is_some())
    }

    /// Text typed while idle opens the editor with it.
    pub(super) fn type_text(&mut self, text: &str) {
        if self.editor.is_open() {
            self.edit(|session| input::insert_text(session, text));
        } else {
            self.open_editor(Some(text), None);
        }
    }

    /// Freeze pending picks, apply a text edit, then refresh suggestions.
    pub(super) fn edit(&mut self, apply: impl FnOnce(&mut EditSession)) {
        if self.loading() {
            return;
        }
        self.editor = freeze_pending(mem::take(&mut self.editor), &self.sheets);
        let Some(session) = self.editor.session_mut() else {
            return;
        };
        apply(session);
        session.arrow_keys_scroll_in_formula = false;
        refresh_suggestions(session, &self.sheets, &self.config);
    }

    /// Caret placed by the user: arrows now move the caret, not the pick.
    pub(super) fn set_cursor(&mut self, start: usize, end: usize) {
        if self.loading() {
            return;
        }
        self.editor = freeze_pending(mem::take(&mut self.editor), &self.sheets);
        if let Some(session) = self.editor.session_mut() {
            input::set_cursor(session, start, end);
            session.arrow_keys_scroll_in_formula = true;
            refresh_suggestions(session, &self.sheets, &self.config);
        }
    }

    /// Splice suggestion `index` over the matched text. Returns false when no
    /// such suggestion is showing.
    pub(super) fn accept_suggestion(&mut self, index: usize) -> bool {
        if self.loading() {
            return false;
        }
        let EditorState::Editing(session) = &mut self.editor else {
            return false;
        };
        let Some(suggestions) = &session.suggestions else {
            return false;
        };
        let Some((formula, caret)) =
            accept_suggestion(&session.formula, session.cursor.end, suggestions, index)
        else {
            return false;
        };
        session.formula = formula;
        session.cursor = CursorSpan::caret(caret);
        session.suggestions = None;
        session.arrow_keys_scroll_in_formula = false;
        true
    }

    /// Commit the open editor: picks are frozen, then the session becomes a
    /// command, an inline error, or simply closes when nothing changed.
    pub(super) fn submit(&mut self, channel: &mut dyn CommandChannel) {
        if self.loading() {
            return;
        }
        self.editor = freeze_pending(mem::take(&mut self.editor), &self.sheets);
        let Some(session) = self.editor.session() else {
            return;
        };
        // Index-label scoping only makes sense against the editor's own sheet.
        let grid_selections: &[Selection] = if session.sheet_index == self.state.sheet_index {
            &self.state.selections
        } else {
            &[]
        };
        match build_command(session, &self.sheets, grid_selections) {
            Submission::Unchanged => {
                debug!("engine: editor closed without changes");
                self.close_editor();
            }
            Submission::Rejected(message) => {
                debug!("engine: submission rejected: {message}");
                if let Some(session) = self.editor.session_mut() {
                    session.cell_editor_error = Some(message);
                }
            }
            Submission::Send(command) => {
                let id = self.issue(command, channel);
                if let Some(session) = self.editor.session_mut() {
                    session.loading = Some(id);
                    session.suggestions = None;
                }
                self.state.copied_selections.clear();
            }
        }
    }

    /// Apply the backend's answer to the in-flight submission. Responses for
    /// anything else are stale and ignored.
    pub(super) fn command_response(&mut self, response: &CommandResponse) {
        let awaited = self.editor.session().and_then(|s| s.loading);
        if awaited != Some(response.id) {
            debug!("engine: ignoring stale response {}", response.id);
            return;
        }
        match &response.error {
            None => {
                debug!("engine: command {} applied", response.id);
                self.close_editor();
            }
            Some(error) => {
                warn!("engine: command {} failed: {error}", response.id);
                if let Some(session) = self.editor.session_mut() {
                    session.loading = None;
                    session.cell_editor_error = Some(error.clone());
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::super::tests::{click, grid};
    use super::super::GridEvent;
    use crate::commands::{Command, CommandId, CommandResponse};
    use crate::types::{ColumnId, EditingMode, Key, Modifiers};

    fn key(grid: &mut super::SheetGrid, key: Key, out: &mut Vec<(CommandId, Command)>) {
        grid.handle(
            GridEvent::KeyDown {
                key,
                modifiers: Modifiers::NONE,
            },
            out,
        )
        .unwrap();
    }

    fn type_text(grid: &mut super::SheetGrid, text: &str) {
        grid.handle(GridEvent::TypeText { text: text.into() }, &mut Vec::new())
            .unwrap();
    }

    #[test]
    fn submit_waits_for_response() {
        let mut grid = grid();
        let mut out = Vec::new();
        click(&mut grid, 2, 0, Modifiers::NONE);
        key(&mut grid, Key::Character('7'), &mut out);
        assert_eq!(grid.editor().session().unwrap().formula, "7");

        key(&mut grid, Key::Enter, &mut out);
        assert_eq!(
            out,
            vec![(
                CommandId(1),
                Command::SetCellValue {
                    sheet_index: 0,
                    column_id: ColumnId::from("r"),
                    row_label: "2".into(),
                    old_value: "20".into(),
                    new_value: "7".into(),
                }
            )]
        );
        assert_eq!(grid.editor().session().unwrap().loading, Some(CommandId(1)));

        // Typing while the submission is in flight is ignored.
        type_text(&mut grid, "9");
        assert_eq!(grid.editor().session().unwrap().formula, "7");

        grid.handle(
            GridEvent::CommandResponse(CommandResponse {
                id: CommandId(1),
                error: None,
            }),
            &mut out,
        )
        .unwrap();
        assert!(!grid.editor().is_open());
    }

    #[test]
    fn error_response_stays_open_until_next_key() {
        let mut grid = grid();
        let mut out = Vec::new();
        click(&mut grid, 0, 2, Modifiers::NONE);
        key(&mut grid, Key::Enter, &mut out);
        assert_eq!(
            grid.editor().session().unwrap().editing_mode,
            EditingMode::SetColumnFormula
        );
        type_text(&mut grid, "+");
        key(&mut grid, Key::Enter, &mut out);
        grid.handle(
            GridEvent::CommandResponse(CommandResponse {
                id: CommandId(1),
                error: Some("Syntax error".into()),
            }),
            &mut out,
        )
        .unwrap();
        let session = grid.editor().session().unwrap();
        assert_eq!(session.cell_editor_error.as_deref(), Some("Syntax error"));
        assert!(session.loading.is_none());

        key(&mut grid, Key::Backspace, &mut out);
        let session = grid.editor().session().unwrap();
        assert!(session.cell_editor_error.is_none());
        assert_eq!(session.formula, "=Revenue0 - Cost0");
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut grid = grid();
        let mut out = Vec::new();
        click(&mut grid, 1, 1, Modifiers::NONE);
        type_text(&mut grid, "3");
        key(&mut grid, Key::Enter, &mut out);
        key(&mut grid, Key::Escape, &mut out);
        assert!(!grid.editor().is_open());

        click(&mut grid, 1, 0, Modifiers::NONE);
        type_text(&mut grid, "4");
        grid.handle(
            GridEvent::CommandResponse(CommandResponse {
                id: CommandId(1),
                error: Some("late".into()),
            }),
            &mut out,
        )
        .unwrap();
        let session = grid.editor().session().unwrap();
        assert!(session.cell_editor_error.is_none());
        assert_eq!(session.formula, "4");
    }

    #[test]
    fn unchanged_submit_closes_silently() {
        let mut grid = grid();
        let mut out = Vec::new();
        click(&mut grid, -1, 1, Modifiers::NONE);
        key(&mut grid, Key::Enter, &mut out);
        assert_eq!(grid.editor().session().unwrap().formula, "Cost");
        key(&mut grid, Key::Enter, &mut out);
        assert!(out.is_empty());
        assert!(!grid.editor().is_open());
    }

    #[test]
    fn rejected_rename_shows_error() {
        let mut grid = grid();
        let mut out = Vec::new();
        click(&mut grid, -1, 0, Modifiers::NONE);
        type_text(&mut grid, " ");
        key(&mut grid, Key::Enter, &mut out);
        assert!(out.is_empty());
        assert!(grid.editor().session().unwrap().cell_editor_error.is_some());
    }

    #[test]
    fn enter_accepts_suggestion_before_submitting() {
        let mut grid = grid();
        let mut out = Vec::new();
        click(&mut grid, 0, 0, Modifiers::NONE);
        type_text(&mut grid, "=Co");
        let suggestions = grid.editor().session().unwrap().suggestions.clone().unwrap();
        assert_eq!(suggestions.items[0].text, "Cost");

        key(&mut grid, Key::Enter, &mut out);
        assert!(out.is_empty());
        let session = grid.editor().session().unwrap();
        assert_eq!(session.formula, "=Cost");
        assert_eq!(session.cursor.end, 5);

        key(&mut grid, Key::Enter, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn select_suggestion_inserts_function_call() {
        let mut grid = grid();
        click(&mut grid, 0, 0, Modifiers::NONE);
        type_text(&mut grid, "=SQ");
        grid.handle(GridEvent::SelectSuggestion { index: 0 }, &mut Vec::new())
            .unwrap();
        assert_eq!(grid.editor().session().unwrap().formula, "=SQRT(");
    }

    #[test]
    fn open_editor_event_honours_mode() {
        let mut grid = grid();
        click(&mut grid, 3, 1, Modifiers::NONE);
        grid.handle(
            GridEvent::OpenEditor {
                editing_mode: Some(EditingMode::SpecificIndexLabels),
                initial_text: Some("=1".into()),
            },
            &mut Vec::new(),
        )
        .unwrap();
        let session = grid.editor().session().unwrap();
        assert_eq!(session.editing_mode, EditingMode::SpecificIndexLabels);
        assert_eq!(session.formula, "=1");
    }
}
