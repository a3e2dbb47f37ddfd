//! Browser-side tests for the `GridView` bindings.
//!
//! Run with: wasm-pack test --headless --chrome
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use js_sys::{Array, Function, Reflect};
use serde_json::json;
use sheetgrid::GridView;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_js(value: &serde_json::Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap()
}

fn sheets() -> JsValue {
    to_js(&json!([{
        "name": "df1",
        "columns": [
            { "columnId": "r", "header": "Revenue", "values": ["10", "20", "30", "40"] },
            { "columnId": "c", "header": "Cost", "values": ["1", "2", "3", "4"] }
        ],
        "indexLabels": ["0", "1", "2", "3"],
        "numRows": 4
    }]))
}

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn constructs_with_default_config() {
    let grid = GridView::new(JsValue::UNDEFINED, sheets()).unwrap();
    let view = grid.sheet_view().unwrap();
    assert_eq!(get(&view, "startingRowIndex").as_f64(), Some(0.0));
    assert_eq!(get(&view, "numColumnsRendered").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn rejects_bad_config() {
    assert!(GridView::new(to_js(&json!({ "rowHeight": 0 })), sheets()).is_err());
}

#[wasm_bindgen_test]
fn events_move_selection() {
    let mut grid = GridView::new(JsValue::UNDEFINED, sheets()).unwrap();
    // Row label band is 60 wide, header 40 high, rows 25, columns 120.
    grid.handle_event(to_js(&json!({ "type": "pointerDown", "x": 200.0, "y": 60.0 })))
        .unwrap();
    grid.handle_event(to_js(&json!({ "type": "pointerUp" }))).unwrap();

    let selections = Array::from(&grid.selections().unwrap());
    assert_eq!(selections.length(), 1);
    let first = selections.get(0);
    assert_eq!(get(&first, "startingRowIndex").as_f64(), Some(0.0));
    assert_eq!(get(&first, "startingColumnIndex").as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn submissions_reach_the_callback() {
    let mut grid = GridView::new(JsValue::UNDEFINED, sheets()).unwrap();
    let sink = Array::new();
    let callback = Function::new_with_args("command", "this.push(command)").bind(&sink);
    grid.set_command_callback(Some(callback));

    grid.handle_event(to_js(&json!({ "type": "pointerDown", "x": 100.0, "y": 90.0 })))
        .unwrap();
    grid.handle_event(to_js(&json!({ "type": "typeText", "text": "99" })))
        .unwrap();
    grid.handle_event(to_js(&json!({ "type": "keyDown", "key": "Enter" })))
        .unwrap();

    assert_eq!(sink.length(), 1);
    let issued = sink.get(0);
    let command = get(&issued, "command");
    assert_eq!(get(&command, "type").as_string().as_deref(), Some("setCellValue"));
    assert_eq!(get(&command, "newValue").as_string().as_deref(), Some("99"));

    let id = get(&issued, "id");
    grid.handle_event(to_js(&json!({ "type": "commandResponse", "id": id.as_f64().unwrap() })))
        .unwrap();
    let editor = grid.editor_state().unwrap();
    assert_eq!(get(&editor, "state").as_string().as_deref(), Some("idle"));
    assert!(grid.display_formula().is_none());
}

#[wasm_bindgen_test]
fn default_config_is_json() {
    let text = sheetgrid::default_config().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["rowHeight"], 25.0);
}
