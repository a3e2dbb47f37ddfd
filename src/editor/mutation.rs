//! Turning a committed session into a backend command.

use crate::commands::Command;
use crate::selection::index_labels_in_selections;
use crate::types::{EditSession, EditingMode, Selection, SheetData};

/// Outcome of committing a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Text unchanged: close without sending anything.
    Unchanged,
    Send(Command),
    /// Cannot be sent; the message is shown on the editor.
    Rejected(String),
}

/// Build the command for `session`.
///
/// Index-label formulas are scoped to the row labels covered by the grid's
/// current selections.
pub fn build_command(
    session: &EditSession,
    sheets: &[SheetData],
    grid_selections: &[Selection],
) -> Submission {
    let scoped = session.editing_mode == EditingMode::SpecificIndexLabels;
    if session.formula == session.original_formula && !scoped {
        return Submission::Unchanged;
    }
    let Some(sheet) = sheets.get(session.sheet_index) else {
        return Submission::Rejected(format!("Sheet {} no longer exists", session.sheet_index));
    };
    let Some(column) = sheet.column(session.column_index) else {
        return Submission::Rejected("Column no longer exists".into());
    };
    let sheet_index = session.sheet_index;
    let column_id = column.column_id.clone();

    let command = match session.editing_mode {
        EditingMode::RenameColumn => {
            let new_header = session.formula.trim();
            if new_header.is_empty() {
                return Submission::Rejected("Column headers cannot be empty".into());
            }
            Command::RenameColumn {
                sheet_index,
                column_id,
                old_header: column.header.clone(),
                new_header: new_header.to_string(),
            }
        }
        EditingMode::SetColumnFormula => Command::SetColumnFormula {
            sheet_index,
            column_id,
            old_formula: session.original_formula.clone(),
            new_formula: session.formula.clone(),
            index_labels: None,
        },
        EditingMode::SpecificIndexLabels => {
            let labels = index_labels_in_selections(grid_selections, sheet);
            if labels.is_empty() {
                return Submission::Rejected("Select the rows to apply this formula to".into());
            }
            Command::SetColumnFormula {
                sheet_index,
                column_id,
                old_formula: session.original_formula.clone(),
                new_formula: session.formula.clone(),
                index_labels: Some(labels),
            }
        }
        EditingMode::SetCellValue => {
            let Some(row_label) = sheet.row_label(session.row_index) else {
                return Submission::Rejected("Row no longer exists".into());
            };
            Command::SetCellValue {
                sheet_index,
                column_id,
                row_label: row_label.into_owned(),
                old_value: session.original_formula.clone(),
                new_value: session.formula.clone(),
            }
        }
    };
    Submission::Send(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{ColumnData, ColumnId};

    fn sheets() -> Vec<SheetData> {
        vec![SheetData {
            name: "df1".into(),
            columns: vec![ColumnData::new("a", "A")],
            index_labels: vec!["x".into(), "y".into(), "z".into()],
            num_rows: 3,
        }]
    }

    #[test]
    fn unchanged_text_sends_nothing() {
        let session = EditSession::new(0, 1, 0, "5".into(), EditingMode::SetCellValue);
        assert_eq!(build_command(&session, &sheets(), &[]), Submission::Unchanged);
    }

    #[test]
    fn cell_value_carries_row_label() {
        let mut session = EditSession::new(0, 1, 0, "5".into(), EditingMode::SetCellValue);
        session.formula = "6".into();
        assert_eq!(
            build_command(&session, &sheets(), &[]),
            Submission::Send(Command::SetCellValue {
                sheet_index: 0,
                column_id: ColumnId::from("a"),
                row_label: "y".into(),
                old_value: "5".into(),
                new_value: "6".into(),
            })
        );
    }

    #[test]
    fn index_label_formula_uses_grid_rows() {
        let session = EditSession::new(0, 0, 0, "=1".into(), EditingMode::SpecificIndexLabels);
        let grid = [Selection::cell(0, 0, 0).with_end(1, 0)];
        let Submission::Send(Command::SetColumnFormula { index_labels, .. }) =
            build_command(&session, &sheets(), &grid)
        else {
            panic!("expected a set-column-formula command");
        };
        assert_eq!(index_labels, Some(vec!["x".to_string(), "y".to_string()]));
    }

    #[test]
    fn rename_rejects_empty_header() {
        let mut session = EditSession::new(0, -1, 0, "A".into(), EditingMode::RenameColumn);
        session.formula = "  ".into();
        assert!(matches!(
            build_command(&session, &sheets(), &[]),
            Submission::Rejected(_)
        ));
    }

    #[test]
    fn missing_column_is_rejected() {
        let mut session = EditSession::new(0, 0, 4, String::new(), EditingMode::SetColumnFormula);
        session.formula = "=1".into();
        assert!(matches!(
            build_command(&session, &sheets(), &[]),
            Submission::Rejected(_)
        ));
    }
}
