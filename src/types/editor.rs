//! Cell/column editor state.
//!
//! The editor is a tagged variant so that a pending pick cannot exist
//! without an open editor.

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::commands::CommandId;
use crate::formula::Suggestions;

/// What a commit of the editor sends to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditingMode {
    /// Formula applied to the whole column.
    SetColumnFormula,
    /// Literal value for one cell.
    SetCellValue,
    /// Formula applied to the selected index labels only.
    SpecificIndexLabels,
    /// New header text for the column.
    RenameColumn,
}

/// Text cursor span in character offsets (`start == end` for a caret).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CursorSpan {
    pub start: usize,
    pub end: usize,
}

impl CursorSpan {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    /// Ordered `(min, max)`.
    pub fn ordered(self) -> (usize, usize) {
        (self.start.min(self.end), self.start.max(self.end))
    }
}

/// An open editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSession {
    pub sheet_index: usize,
    pub row_index: i64,
    pub column_index: i64,
    pub formula: String,
    /// Text when the editor opened; committing it unchanged sends nothing.
    pub original_formula: String,
    pub editing_mode: EditingMode,
    /// Set once the user places the caret in the input: arrow keys then move
    /// the caret instead of picking cells.
    pub arrow_keys_scroll_in_formula: bool,
    pub cursor: CursorSpan,
    #[serde(default)]
    pub suggestions: Option<Suggestions>,
    #[serde(default)]
    pub cell_editor_error: Option<String>,
    /// Submission awaiting a backend response.
    #[serde(default)]
    pub loading: Option<CommandId>,
}

impl EditSession {
    pub fn new(
        sheet_index: usize,
        row_index: i64,
        column_index: i64,
        formula: String,
        editing_mode: EditingMode,
    ) -> Self {
        let cursor = CursorSpan::caret(formula.chars().count());
        Self {
            sheet_index,
            row_index,
            column_index,
            original_formula: formula.clone(),
            formula,
            editing_mode,
            arrow_keys_scroll_in_formula: false,
            cursor,
            suggestions: None,
            cell_editor_error: None,
            loading: None,
        }
    }

    /// Whether the text is a formula that cell references can be picked into.
    pub fn is_formula(&self) -> bool {
        match self.editing_mode {
            EditingMode::SetColumnFormula | EditingMode::SpecificIndexLabels => true,
            EditingMode::SetCellValue => self.formula.trim_start().starts_with('='),
            EditingMode::RenameColumn => false,
        }
    }

    /// Whether arrow keys and clicks currently pick cells into the formula.
    pub fn picks_enabled(&self) -> bool {
        !self.arrow_keys_scroll_in_formula && self.is_formula()
    }
}

/// Cells picked while authoring a formula, not yet spliced into the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSelections {
    pub selections: Vec<Selection>,
    pub input_selection_start: usize,
    pub input_selection_end: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum EditorState {
    #[default]
    Idle,
    Editing(EditSession),
    Picking {
        session: EditSession,
        pending: PendingSelections,
    },
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditorState::Idle)
    }

    pub fn session(&self) -> Option<&EditSession> {
        match self {
            EditorState::Idle => None,
            EditorState::Editing(session) | EditorState::Picking { session, .. } => Some(session),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut EditSession> {
        match self {
            EditorState::Idle => None,
            EditorState::Editing(session) | EditorState::Picking { session, .. } => Some(session),
        }
    }

    pub fn pending(&self) -> Option<&PendingSelections> {
        match self {
            EditorState::Picking { pending, .. } => Some(pending),
            _ => None,
        }
    }
}
