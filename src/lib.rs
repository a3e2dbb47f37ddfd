//! sheetgrid - selection and viewport engine for a spreadsheet grid
//!
//! Drives the interactive grid of a dataframe editor, compiled to
//! WebAssembly:
//! - Multi-region selections over a virtual grid with header bands
//! - Virtualized viewport from scroll offset and per-column widths
//! - Selections and widths carried across column insert/delete/reorder
//! - Cell picks turned into formula reference text while typing
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'sheetgrid';
//! await init();
//! const grid = new GridView(undefined, sheets);
//! grid.setCommandCallback(({ id, command }) => backend.send(id, command));
//! grid.handleEvent({ type: 'pointerDown', x: 120, y: 80 });
//! render(grid.sheetView(), grid.translate(), grid.selections());
//! ```

// Model
pub mod commands;
pub mod config;
pub mod error;
pub mod types;

// Algorithms
pub mod editor;
pub mod formula;
pub mod layout;
pub mod reconcile;
pub mod selection;

// State machine and host surface
pub mod bindings;
pub mod engine;

use wasm_bindgen::prelude::*;

pub use bindings::GridView;
pub use commands::{Command, CommandChannel, CommandId, CommandResponse, IssuedCommand};
pub use config::GridConfig;
pub use engine::{GridEvent, GridSnapshot, SheetGrid};
pub use error::{GridError, Result};

pub use types::*;

/// Default configuration as JSON, for hosts that want to tweak a copy.
///
/// # Errors
/// Returns an error if serialization fails.
#[wasm_bindgen(js_name = "defaultConfig")]
pub fn default_config() -> std::result::Result<String, JsValue> {
    serde_json::to_string(&GridConfig::default())
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Resolve selections to formula reference text without a live grid.
///
/// # Errors
/// Returns an error if the arguments cannot be decoded.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = "resolveReferences")]
pub fn resolve_references_js(
    selections: JsValue,
    sheets: JsValue,
    sheet_index: usize,
    row_index: i32,
) -> std::result::Result<String, JsValue> {
    let selections: Vec<Selection> = serde_wasm_bindgen::from_value(selections)
        .map_err(|e| JsValue::from_str(&format!("Invalid selections: {e}")))?;
    let sheets: Vec<SheetData> = serde_wasm_bindgen::from_value(sheets)
        .map_err(|e| JsValue::from_str(&format!("Invalid sheets: {e}")))?;
    Ok(formula::resolve_references(
        &selections,
        &sheets,
        formula::FormulaScope {
            sheet_index,
            row_index: i64::from(row_index),
        },
    ))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
