//! Outbound commands to the computation backend.
//!
//! The engine issues commands fire-and-forget through a [`CommandChannel`];
//! the only thing it reads back is a [`CommandResponse`] for the editor's
//! in-flight submission.

use serde::{Deserialize, Serialize};

use crate::types::ColumnId;

/// Identifies one submission so its response can be matched (or ignored
/// when stale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(pub u64);

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    DeleteColumns {
        sheet_index: usize,
        column_ids: Vec<ColumnId>,
    },
    #[serde(rename_all = "camelCase")]
    DeleteRows {
        sheet_index: usize,
        labels: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    RenameColumn {
        sheet_index: usize,
        column_id: ColumnId,
        old_header: String,
        new_header: String,
    },
    #[serde(rename_all = "camelCase")]
    ReorderColumn {
        sheet_index: usize,
        column_id: ColumnId,
        new_index: usize,
    },
    /// Column formula; `index_labels` restricts it to those rows.
    #[serde(rename_all = "camelCase")]
    SetColumnFormula {
        sheet_index: usize,
        column_id: ColumnId,
        old_formula: String,
        new_formula: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index_labels: Option<Vec<String>>,
    },
    #[serde(rename_all = "camelCase")]
    SetCellValue {
        sheet_index: usize,
        column_id: ColumnId,
        row_label: String,
        old_value: String,
        new_value: String,
    },
    #[serde(rename_all = "camelCase")]
    ResizeColumn {
        sheet_index: usize,
        column_id: ColumnId,
        width: f32,
    },
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::DeleteColumns { .. } => "delete_columns",
            Command::DeleteRows { .. } => "delete_rows",
            Command::RenameColumn { .. } => "rename_column",
            Command::ReorderColumn { .. } => "reorder_column",
            Command::SetColumnFormula { .. } => "set_column_formula",
            Command::SetCellValue { .. } => "set_cell_value",
            Command::ResizeColumn { .. } => "resize_column",
        }
    }
}

/// Backend answer to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    pub id: CommandId,
    #[serde(default)]
    pub error: Option<String>,
}

/// Sink for outbound commands.
pub trait CommandChannel {
    fn send(&mut self, id: CommandId, command: Command);
}

/// Recording channel used by tests and the CLI.
impl CommandChannel for Vec<(CommandId, Command)> {
    fn send(&mut self, id: CommandId, command: Command) {
        self.push((id, command));
    }
}

/// A command paired with its id, as handed to hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedCommand {
    pub id: CommandId,
    pub command: Command,
}

impl From<(CommandId, Command)> for IssuedCommand {
    fn from((id, command): (CommandId, Command)) -> Self {
        Self { id, command }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_is_tagged_camel_case() {
        let cmd = Command::SetCellValue {
            sheet_index: 0,
            column_id: ColumnId::from("c1"),
            row_label: "3".into(),
            old_value: "1".into(),
            new_value: "2".into(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "setCellValue",
                "sheetIndex": 0,
                "columnId": "c1",
                "rowLabel": "3",
                "oldValue": "1",
                "newValue": "2"
            })
        );
    }

    #[test]
    fn vec_channel_records_in_order() {
        let mut sent: Vec<(CommandId, Command)> = Vec::new();
        let delete = Command::DeleteRows {
            sheet_index: 1,
            labels: vec!["a".into()],
        };
        sent.send(CommandId(1), delete.clone());
        sent.send(
            CommandId(2),
            Command::ReorderColumn {
                sheet_index: 1,
                column_id: ColumnId::from("x"),
                new_index: 0,
            },
        );
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], (CommandId(1), delete));
        assert_eq!(sent[1].1.name(), "reorder_column");
    }

    #[test]
    fn response_error_defaults_to_none() {
        let r: CommandResponse = serde_json::from_str(r#"{"id": 4}"#).unwrap();
        assert_eq!(r.id, CommandId(4));
        assert!(r.error.is_none());
    }
}
