//! Cell/column editor sessions.
//!
//! `EditorState` moves between three shapes:
//! - `Idle`: nothing open
//! - `Editing`: text input only
//! - `Picking`: cells picked with arrows/clicks, staged over a cursor span
//!
//! Picks are "frozen" into the formula text as soon as the user does
//! anything other than navigate.

pub mod input;
pub mod mutation;

use log::debug;

use crate::config::GridConfig;
use crate::formula::{commit_pending, resolve_references, suggestions_for, FormulaScope};
use crate::selection::{on_mouse_down, on_mouse_drag, selection_after_key_press};
use crate::types::{
    CursorSpan, EditSession, EditingMode, EditorState, GridDims, Key, Modifiers, PendingSelections,
    Selection, SheetData, HEADER_INDEX,
};

pub use mutation::{build_command, Submission};

/// Open an editor on `(row, col)` of `sheet_index`.
///
/// A header cell renames the column; a data cell edits the column formula
/// when the column has one and the cell value otherwise. `initial_text`
/// replaces the existing text (typing to open). `mode` forces a mode, which
/// is how index-label-scoped formulas are started. Returns `None` when the
/// target is not an editable cell.
pub fn open_session(
    sheets: &[SheetData],
    sheet_index: usize,
    row: i64,
    col: i64,
    initial_text: Option<&str>,
    mode: Option<EditingMode>,
) -> Option<EditSession> {
    let sheet = sheets.get(sheet_index)?;
    let column = sheet.column(col)?;

    let (default_mode, existing) = if row == HEADER_INDEX {
        (EditingMode::RenameColumn, column.header.clone())
    } else {
        if sheet.row_label(row).is_none() {
            return None;
        }
        match &column.formula {
            Some(formula) => (EditingMode::SetColumnFormula, formula.clone()),
            None => (
                EditingMode::SetCellValue,
                sheet.cell_value(row, col).unwrap_or_default().to_string(),
            ),
        }
    };
    let editing_mode = match mode {
        Some(EditingMode::RenameColumn) if row != HEADER_INDEX => default_mode,
        Some(mode) if row != HEADER_INDEX || mode == EditingMode::RenameColumn => mode,
        _ => default_mode,
    };
    let mut session = EditSession::new(sheet_index, row, col, existing, editing_mode);
    if let Some(text) = initial_text {
        session.formula = text.to_string();
        session.cursor = CursorSpan::caret(text.chars().count());
    }
    debug!(
        "editor: open {:?} at sheet {sheet_index} ({row}, {col})",
        session.editing_mode
    );
    Some(session)
}

/// Recompute autocomplete for the text before the caret.
pub fn refresh_suggestions(session: &mut EditSession, sheets: &[SheetData], config: &GridConfig) {
    if !session.is_formula() {
        session.suggestions = None;
        return;
    }
    let before_caret: String = session.formula.chars().take(session.cursor.end).collect();
    let headers: Vec<&str> = sheets
        .get(session.sheet_index)
        .map(|s| s.columns.iter().map(|c| c.header.as_str()).collect())
        .unwrap_or_default();
    session.suggestions = suggestions_for(
        &before_caret,
        &headers,
        &config.function_names,
        config.max_suggestion_length,
    );
}

/// Where references picked into `session` resolve against.
pub fn scope_of(session: &EditSession) -> FormulaScope {
    FormulaScope {
        sheet_index: session.sheet_index,
        row_index: session.row_index,
    }
}

/// Splice any pending picks into the text, leaving a plain `Editing` state.
pub fn freeze_pending(state: EditorState, sheets: &[SheetData]) -> EditorState {
    match state {
        EditorState::Picking {
            mut session,
            pending,
        } => {
            let (formula, caret) = commit_pending(&session.formula, &pending, sheets, scope_of(&session));
            session.formula = formula;
            session.cursor = CursorSpan::caret(caret);
            session.suggestions = None;
            EditorState::Editing(session)
        }
        other => other,
    }
}

/// Drop pending picks without touching the text.
pub fn discard_pending(state: EditorState) -> EditorState {
    match state {
        EditorState::Picking { session, .. } => EditorState::Editing(session),
        other => other,
    }
}

/// Formula text as displayed: pending picks resolved in place.
pub fn display_formula(state: &EditorState, sheets: &[SheetData]) -> Option<String> {
    match state {
        EditorState::Idle => None,
        EditorState::Editing(session) => Some(session.formula.clone()),
        EditorState::Picking { session, pending } => {
            Some(commit_pending(&session.formula, pending, sheets, scope_of(session)).0)
        }
    }
}

/// Text the pending picks resolve to, if any.
pub fn pending_reference_text(state: &EditorState, sheets: &[SheetData]) -> Option<String> {
    match state {
        EditorState::Picking { session, pending } => Some(resolve_references(
            &pending.selections,
            sheets,
            scope_of(session),
        )),
        _ => None,
    }
}

/// The grid being viewed while picking.
#[derive(Debug, Clone, Copy)]
pub struct PickTarget<'a> {
    pub sheet_index: usize,
    pub dims: GridDims,
    /// The grid's own selections, used as the starting point when picking
    /// on a sheet other than the editor's.
    pub selections: &'a [Selection],
}

/// Begin or extend a keyboard pick.
pub fn pick_with_key(
    state: EditorState,
    target: PickTarget<'_>,
    key: &Key,
    modifiers: Modifiers,
) -> EditorState {
    match state {
        EditorState::Editing(session) => {
            let base = if target.sheet_index == session.sheet_index {
                vec![Selection::cell(
                    session.sheet_index,
                    session.row_index,
                    session.column_index,
                )]
            } else {
                target.selections.to_vec()
            };
            let selections = selection_after_key_press(&base, target.dims, key, modifiers);
            begin_pick(session, selections)
        }
        EditorState::Picking {
            session,
            mut pending,
        } => {
            pending.selections =
                selection_after_key_press(&pending.selections, target.dims, key, modifiers);
            EditorState::Picking { session, pending }
        }
        EditorState::Idle => EditorState::Idle,
    }
}

/// Begin or extend a pointer pick at `(row, col)`.
pub fn pick_with_pointer(
    state: EditorState,
    target: PickTarget<'_>,
    row: i64,
    col: i64,
    modifiers: Modifiers,
) -> EditorState {
    match state {
        EditorState::Editing(session) => {
            let selections = on_mouse_down(&[], target.sheet_index, target.dims, row, col, modifiers);
            if selections.is_empty() {
                return EditorState::Editing(session);
            }
            begin_pick(session, selections)
        }
        EditorState::Picking {
            session,
            mut pending,
        } => {
            pending.selections = on_mouse_down(
                &pending.selections,
                target.sheet_index,
                target.dims,
                row,
                col,
                modifiers,
            );
            EditorState::Picking { session, pending }
        }
        EditorState::Idle => EditorState::Idle,
    }
}

/// Drag the last pending pick.
pub fn drag_pick(state: EditorState, dims: GridDims, row: i64, col: i64) -> EditorState {
    match state {
        EditorState::Picking {
            session,
            mut pending,
        } => {
            pending.selections = on_mouse_drag(&pending.selections, dims, row, col);
            EditorState::Picking { session, pending }
        }
        other => other,
    }
}

fn begin_pick(mut session: EditSession, selections: Vec<Selection>) -> EditorState {
    let (start, end) = session.cursor.ordered();
    session.suggestions = None;
    EditorState::Picking {
        session,
        pending: PendingSelections {
            selections,
            input_selection_start: start,
            input_selection_end: end,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{ColumnData, Direction};

    fn sheets() -> Vec<SheetData> {
        let mut revenue = ColumnData::new("r", "Revenue");
        revenue.values = vec!["5".into(), "6".into()];
        let mut cost = ColumnData::new("c", "Cost");
        cost.formula = Some("=Revenue0 * 2".into());
        vec![
            SheetData {
                name: "df1".into(),
                columns: vec![revenue, cost],
                index_labels: vec!["0".into(), "1".into()],
                num_rows: 2,
            },
            SheetData {
                name: "df2".into(),
                columns: vec![ColumnData::new("x", "Name")],
                index_labels: vec!["a".into()],
                num_rows: 1,
            },
        ]
    }

    #[test]
    fn open_picks_mode_from_target() {
        let s = sheets();
        let value = open_session(&s, 0, 1, 0, None, None).unwrap();
        assert_eq!(value.editing_mode, EditingMode::SetCellValue);
        assert_eq!(value.formula, "6");
        assert_eq!(value.cursor.end, 1);

        let formula = open_session(&s, 0, 0, 1, None, None).unwrap();
        assert_eq!(formula.editing_mode, EditingMode::SetColumnFormula);
        assert_eq!(formula.formula, "=Revenue0 * 2");

        let rename = open_session(&s, 0, -1, 1, None, None).unwrap();
        assert_eq!(rename.editing_mode, EditingMode::RenameColumn);
        assert_eq!(rename.formula, "Cost");

        assert!(open_session(&s, 0, 1, -1, None, None).is_none());
        assert!(open_session(&s, 0, 5, 0, None, None).is_none());
        assert!(open_session(&s, 3, 0, 0, None, None).is_none());
    }

    #[test]
    fn typed_text_replaces_existing() {
        let s = sheets();
        let session = open_session(&s, 0, 1, 0, Some("="), None).unwrap();
        assert_eq!(session.formula, "=");
        assert_eq!(session.original_formula, "6");
        assert!(session.picks_enabled());
    }

    #[test]
    fn forced_mode_is_ignored_when_it_does_not_fit() {
        let s = sheets();
        let session =
            open_session(&s, 0, 0, 0, None, Some(EditingMode::SpecificIndexLabels)).unwrap();
        assert_eq!(session.editing_mode, EditingMode::SpecificIndexLabels);
        let session = open_session(&s, 0, 0, 0, None, Some(EditingMode::RenameColumn)).unwrap();
        assert_eq!(session.editing_mode, EditingMode::SetCellValue);
    }

    #[test]
    fn keyboard_pick_starts_from_editor_cell() {
        let s = sheets();
        let session = open_session(&s, 0, 1, 1, Some("="), None).unwrap();
        let target = PickTarget {
            sheet_index: 0,
            dims: s[0].dims(),
            selections: &[],
        };
        let state = pick_with_key(
            EditorState::Editing(session),
            target,
            &Key::Arrow(Direction::Left),
            Modifiers::NONE,
        );
        let pending = state.pending().unwrap();
        assert_eq!(pending.selections, vec![Selection::cell(0, 1, 0)]);
        assert_eq!((pending.input_selection_start, pending.input_selection_end), (1, 1));
        assert_eq!(display_formula(&state, &s).unwrap(), "=Revenue1");

        let state = pick_with_key(state, target, &Key::Arrow(Direction::Up), Modifiers::NONE);
        assert_eq!(display_formula(&state, &s).unwrap(), "=Revenue0");

        let state = freeze_pending(state, &s);
        let session = state.session().unwrap();
        assert!(state.pending().is_none());
        assert_eq!(session.formula, "=Revenue0");
        assert_eq!(session.cursor.end, 9);
    }

    #[test]
    fn cross_sheet_pick_uses_grid_selection() {
        let s = sheets();
        let session = open_session(&s, 0, 1, 1, Some("="), None).unwrap();
        let grid = [Selection::cell(1, 0, 0)];
        let target = PickTarget {
            sheet_index: 1,
            dims: s[1].dims(),
            selections: &grid,
        };
        let state = pick_with_key(
            EditorState::Editing(session),
            target,
            &Key::Arrow(Direction::Up),
            Modifiers::NONE,
        );
        assert_eq!(pending_reference_text(&state, &s).unwrap(), "df2!Name");
    }

    #[test]
    fn pointer_pick_and_drag() {
        let s = sheets();
        let session = open_session(&s, 0, 0, 1, Some("=SUM("), None).unwrap();
        let target = PickTarget {
            sheet_index: 0,
            dims: s[0].dims(),
            selections: &[],
        };
        let state = pick_with_pointer(EditorState::Editing(session), target, 0, 0, Modifiers::NONE);
        let state = drag_pick(state, s[0].dims(), 1, 0);
        assert_eq!(display_formula(&state, &s).unwrap(), "=SUM(Revenue0:Revenue1");
        assert_eq!(discard_pending(state).session().unwrap().formula, "=SUM(");
    }

    #[test]
    fn suggestions_only_for_formulas() {
        let s = sheets();
        let config = GridConfig::default();
        let mut session = open_session(&s, 0, 0, 0, Some("=Rev"), None).unwrap();
        refresh_suggestions(&mut session, &s, &config);
        let suggestions = session.suggestions.clone().unwrap();
        assert_eq!(suggestions.match_length, 3);
        assert_eq!(suggestions.items[0].text, "Revenue");

        let mut session = open_session(&s, 0, 0, 0, Some("Rev"), None).unwrap();
        refresh_suggestions(&mut session, &s, &config);
        assert!(session.suggestions.is_none());
    }
}
