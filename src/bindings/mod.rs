//! Host boundary.
//!
//! In the browser the grid is driven through [`GridView`]: events arrive as
//! plain JS objects, commands leave through a registered callback. Native
//! builds (tests, the CLI) get the same type with JSON string entry points.

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use log::warn;
#[cfg(target_arch = "wasm32")]
use web_sys::{KeyboardEvent, MouseEvent};

use crate::commands::IssuedCommand;
#[cfg(target_arch = "wasm32")]
use crate::commands::{Command, CommandChannel, CommandId};
use crate::config::GridConfig;
use crate::engine::{GridEvent, SheetGrid};
#[cfg(not(target_arch = "wasm32"))]
use crate::error::Result;
use crate::types::SheetData;
#[cfg(target_arch = "wasm32")]
use crate::types::{Key, Modifiers};

/// The grid exported to JavaScript.
#[wasm_bindgen]
pub struct GridView {
    grid: SheetGrid,
    #[cfg(target_arch = "wasm32")]
    command_callback: Option<Function>,
}

impl GridView {
    pub fn grid(&self) -> &SheetGrid {
        &self.grid
    }
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

/// Forwards each command to the host callback as `{ id, command }`.
#[cfg(target_arch = "wasm32")]
struct CallbackChannel<'a> {
    callback: Option<&'a Function>,
}

#[cfg(target_arch = "wasm32")]
impl CommandChannel for CallbackChannel<'_> {
    fn send(&mut self, id: CommandId, command: Command) {
        let Some(callback) = self.callback else {
            warn!("bindings: no command callback registered, dropping {id}");
            return;
        };
        let issued = IssuedCommand::from((id, command));
        match serde_wasm_bindgen::to_value(&issued) {
            Ok(value) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    warn!("bindings: command callback threw for {id}: {e:?}");
                }
            }
            Err(e) => warn!("bindings: could not serialize {id}: {e}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn mouse_modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
    }
}

#[cfg(target_arch = "wasm32")]
fn keyboard_modifiers(event: &KeyboardEvent) -> Modifiers {
    Modifiers {
        shift: event.shift_key(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
    }
}

#[cfg(target_arch = "wasm32")]
fn to_js<T: serde::Serialize>(value: &T) -> std::result::Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Create a grid from a config object (or `undefined` for defaults) and
    /// an array of sheets.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, sheets: JsValue) -> std::result::Result<GridView, JsValue> {
        console_error_panic_hook::set_once();
        let config: GridConfig = if config.is_undefined() || config.is_null() {
            GridConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {e}")))?
        };
        let sheets: Vec<SheetData> = serde_wasm_bindgen::from_value(sheets)
            .map_err(|e| JsValue::from_str(&format!("Invalid sheets: {e}")))?;
        Ok(GridView {
            grid: SheetGrid::new(config, sheets)?,
            command_callback: None,
        })
    }

    /// Register the function receiving `{ id, command }` for every command.
    #[wasm_bindgen(js_name = "setCommandCallback")]
    pub fn set_command_callback(&mut self, callback: Option<Function>) {
        self.command_callback = callback;
    }

    #[wasm_bindgen(js_name = "handleEvent")]
    pub fn handle_event(&mut self, event: JsValue) -> std::result::Result<(), JsValue> {
        let event: GridEvent = serde_wasm_bindgen::from_value(event)
            .map_err(|e| crate::error::GridError::Event(e.to_string()))?;
        self.dispatch(event)
    }

    fn dispatch(&mut self, event: GridEvent) -> std::result::Result<(), JsValue> {
        let mut channel = CallbackChannel {
            callback: self.command_callback.as_ref(),
        };
        self.grid.handle(event, &mut channel)?;
        Ok(())
    }

    /// Feed a DOM `mousedown` whose target is the grid element.
    #[wasm_bindgen(js_name = "handleMouseDown")]
    pub fn handle_mouse_down(&mut self, event: &MouseEvent) -> std::result::Result<(), JsValue> {
        self.dispatch(GridEvent::PointerDown {
            x: event.offset_x() as f32,
            y: event.offset_y() as f32,
            modifiers: mouse_modifiers(event),
        })
    }

    #[wasm_bindgen(js_name = "handleMouseMove")]
    pub fn handle_mouse_move(&mut self, event: &MouseEvent) -> std::result::Result<(), JsValue> {
        self.dispatch(GridEvent::PointerMove {
            x: event.offset_x() as f32,
            y: event.offset_y() as f32,
        })
    }

    #[wasm_bindgen(js_name = "handleMouseUp")]
    pub fn handle_mouse_up(&mut self) -> std::result::Result<(), JsValue> {
        self.dispatch(GridEvent::PointerUp)
    }

    /// Feed a DOM `keydown`. Keys the grid acts on have their default
    /// action prevented.
    #[wasm_bindgen(js_name = "handleKeyDown")]
    pub fn handle_key_down(&mut self, event: &KeyboardEvent) -> std::result::Result<(), JsValue> {
        let key = Key::from(event.key());
        if !matches!(key, Key::Other(_)) {
            event.prevent_default();
        }
        self.dispatch(GridEvent::KeyDown {
            key,
            modifiers: keyboard_modifiers(event),
        })
    }

    #[wasm_bindgen(js_name = "sheetView")]
    pub fn sheet_view(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.grid.sheet_view())
    }

    #[wasm_bindgen]
    pub fn translate(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.grid.translate())
    }

    #[wasm_bindgen]
    pub fn selections(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.grid.state().selections)
    }

    #[wasm_bindgen(js_name = "copiedSelections")]
    pub fn copied_selections(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.grid.state().copied_selections)
    }

    #[wasm_bindgen(js_name = "editorState")]
    pub fn editor_state(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(self.grid.editor())
    }

    /// Editor text with pending picks resolved, `undefined` when closed.
    #[wasm_bindgen(js_name = "displayFormula")]
    pub fn display_formula(&self) -> Option<String> {
        self.grid.display_formula()
    }

    #[wasm_bindgen(js_name = "cellBorders")]
    pub fn cell_borders(&self, row: i32, col: i32) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.grid.cell_borders(i64::from(row), i64::from(col)))
    }

    #[wasm_bindgen]
    pub fn snapshot(&self) -> std::result::Result<JsValue, JsValue> {
        to_js(&self.grid.snapshot())
    }
}

// ============================================================================
// Non-WASM32 Implementation (for testing/CLI)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl GridView {
    /// Create a view (non-wasm version for testing).
    pub fn new_test(config: GridConfig, sheets: Vec<SheetData>) -> Result<Self> {
        Ok(GridView {
            grid: SheetGrid::new(config, sheets)?,
        })
    }

    /// Create a view from a JSON config (empty for defaults) and a JSON
    /// array of sheets.
    pub fn from_json(config_json: &str, sheets_json: &str) -> Result<Self> {
        let config = if config_json.trim().is_empty() {
            GridConfig::default()
        } else {
            GridConfig::from_json(config_json)?
        };
        let sheets: Vec<SheetData> = serde_json::from_str(sheets_json)?;
        Self::new_test(config, sheets)
    }

    /// Apply one JSON-encoded event, returning the commands it issued.
    pub fn handle_event_json(&mut self, event_json: &str) -> Result<Vec<IssuedCommand>> {
        let event = GridEvent::from_json(event_json)?;
        let mut issued = Vec::new();
        self.grid.handle(event, &mut issued)?;
        Ok(issued.into_iter().map(IssuedCommand::from).collect())
    }

    pub fn sheet_view_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.grid.sheet_view())?)
    }

    pub fn selections_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.grid.state().selections)?)
    }

    pub fn editor_state_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.grid.editor())?)
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.grid.snapshot())?)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::error::GridError;

    const SHEETS: &str = r#"[
        {
            "name": "df1",
            "columns": [
                {"columnId": "a", "header": "A", "values": ["1", "2"]},
                {"columnId": "b", "header": "B", "formula": "=A0", "values": ["1", "2"]}
            ],
            "indexLabels": ["0", "1"],
            "numRows": 2
        }
    ]"#;

    #[test]
    fn json_round_trip_through_events() {
        let mut view = GridView::from_json("", SHEETS).unwrap();
        view.handle_event_json(r#"{"type":"pointerDown","x":100,"y":70}"#)
            .unwrap();
        assert_eq!(
            view.selections_json().unwrap(),
            r#"[{"sheetIndex":0,"startingRowIndex":1,"endingRowIndex":1,"startingColumnIndex":0,"endingColumnIndex":0}]"#
        );

        view.handle_event_json(r#"{"type":"typeText","text":"9"}"#)
            .unwrap();
        let issued = view
            .handle_event_json(r#"{"type":"keyDown","key":"Enter"}"#)
            .unwrap();
        assert_eq!(issued.len(), 1);
        assert!(matches!(issued[0].command, Command::SetCellValue { .. }));

        let editor: serde_json::Value =
            serde_json::from_str(&view.editor_state_json().unwrap()).unwrap();
        assert_eq!(editor["state"], "editing");
        assert_eq!(editor["loading"], 1);
    }

    #[test]
    fn config_json_is_validated() {
        assert!(matches!(
            GridView::from_json(r#"{"rowHeight": -1}"#, SHEETS),
            Err(GridError::Config(_))
        ));
        let view = GridView::from_json(r#"{"rowHeight": 50}"#, SHEETS).unwrap();
        assert_eq!(view.grid().config().row_height, 50.0);
    }

    #[test]
    fn bad_event_json_is_reported() {
        let mut view = GridView::from_json("", SHEETS).unwrap();
        assert!(matches!(
            view.handle_event_json(r#"{"type":"keyDown"}"#),
            Err(GridError::Event(_))
        ));
    }
}
