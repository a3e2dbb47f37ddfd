//! Structured error types for sheetgrid.
//!
//! Grid operations themselves degrade to defaults; errors only surface at the
//! configuration and host-decoding boundary.

/// All errors that can occur while configuring or driving the grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization failure.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reference to a sheet that does not exist.
    #[error("Unknown sheet index: {0}")]
    SheetIndex(usize),

    /// Host event that could not be decoded.
    #[error("Invalid event: {0}")]
    Event(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
