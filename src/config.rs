//! Grid configuration supplied by the host.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::formula::FUNCTION_NAMES;

/// Default column width in pixels.
pub const DEFAULT_COLUMN_WIDTH: f32 = 120.0;

/// Fixed row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 25.0;

/// Extra rows rendered below the viewport to hide seams during fast scroll.
pub const DEFAULT_OVERSCAN_ROWS: usize = 3;

/// Longest trailing substring tried when matching suggestions.
pub const DEFAULT_MAX_SUGGESTION_LENGTH: usize = 50;

/// Host-facing grid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Width given to columns without a known width
    pub default_column_width: f32,
    pub row_height: f32,
    pub overscan_rows: usize,
    /// Height of the column-header band above the data area
    pub column_header_height: f32,
    /// Width of the row-label band left of the data area
    pub row_label_width: f32,
    pub max_suggestion_length: usize,
    /// Function names offered as formula suggestions
    pub function_names: Vec<String>,
    /// Also send resize-column commands (widths are otherwise UI-local)
    pub persist_column_widths: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_column_width: DEFAULT_COLUMN_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
            column_header_height: 40.0,
            row_label_width: 60.0,
            max_suggestion_length: DEFAULT_MAX_SUGGESTION_LENGTH,
            function_names: FUNCTION_NAMES.iter().map(|s| (*s).to_string()).collect(),
            persist_column_widths: false,
        }
    }
}

impl GridConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes that would break the pixel arithmetic.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("defaultColumnWidth", self.default_column_width, false),
            ("rowHeight", self.row_height, false),
            ("columnHeaderHeight", self.column_header_height, true),
            ("rowLabelWidth", self.row_label_width, true),
        ];
        for (name, value, zero_ok) in sizes {
            let valid = value.is_finite() && (value > 0.0 || (zero_ok && value >= 0.0));
            if !valid {
                return Err(GridError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.max_suggestion_length == 0 {
            return Err(GridError::Config(
                "maxSuggestionLength must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
