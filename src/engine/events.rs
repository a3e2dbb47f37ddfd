//! Host events consumed by [`SheetGrid::handle`](super::SheetGrid::handle).

use serde::{Deserialize, Serialize};

use crate::commands::CommandResponse;
use crate::types::{EditingMode, Key, Modifiers, SheetData};

/// One input to the grid's state transition.
///
/// Pointer coordinates are pixels relative to the grid's top-left corner,
/// header bands included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GridEvent {
    #[serde(rename_all = "camelCase")]
    PointerDown {
        x: f32,
        y: f32,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp,
    #[serde(rename_all = "camelCase")]
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Text typed or pasted into the grid or the open editor.
    TypeText {
        text: String,
    },
    /// The user placed the cursor inside the editor input.
    SetCursor {
        start: usize,
        end: usize,
    },
    #[serde(rename_all = "camelCase")]
    Scroll {
        scroll_left: f32,
        scroll_top: f32,
    },
    ResizeViewport {
        width: f32,
        height: f32,
    },
    #[serde(rename_all = "camelCase")]
    ResizeColumn {
        column_index: i64,
        width: f32,
    },
    #[serde(rename_all = "camelCase")]
    ReorderColumn {
        column_index: i64,
        new_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    SwitchSheet {
        sheet_index: usize,
    },
    /// Fresh snapshot of every sheet after the backend changed them.
    SheetDataChanged {
        sheets: Vec<SheetData>,
    },
    Copy,
    /// Open the editor on the active cell.
    #[serde(rename_all = "camelCase")]
    OpenEditor {
        #[serde(default)]
        editing_mode: Option<EditingMode>,
        #[serde(default)]
        initial_text: Option<String>,
    },
    SelectSuggestion {
        index: usize,
    },
    CommandResponse(CommandResponse),
}

impl GridEvent {
    /// Parse one event from JSON.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::error::GridError::Event(e.to_string()))
    }
}
