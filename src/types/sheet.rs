//! Snapshot of a sheet's shape as reported by the backend.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::selection::{to_index, GridDims};

/// Stable identity of a column. Survives renames and reorders.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ColumnId(pub String);

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One column of a sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnData {
    pub column_id: ColumnId,
    /// Header text shown in the header band and used in formula references.
    pub header: String,
    /// Column formula, when the column is computed.
    #[serde(default)]
    pub formula: Option<String>,
    /// Display values for the rows that have been fetched.
    #[serde(default)]
    pub values: Vec<String>,
}

impl ColumnData {
    pub fn new(column_id: impl Into<ColumnId>, header: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            header: header.into(),
            formula: None,
            values: Vec::new(),
        }
    }
}

/// Shape and labels of a sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetData {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnData>,
    /// Row labels (the dataframe index). Rows past the end fall back to
    /// their position.
    #[serde(default)]
    pub index_labels: Vec<String>,
    #[serde(default)]
    pub num_rows: usize,
}

impl SheetData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn dims(&self) -> GridDims {
        GridDims::new(self.num_rows, self.columns.len())
    }

    /// Column identities in display order.
    pub fn column_ids(&self) -> Vec<ColumnId> {
        self.columns.iter().map(|c| c.column_id.clone()).collect()
    }

    pub fn column(&self, col: i64) -> Option<&ColumnData> {
        self.columns.get(to_index(col)?)
    }

    pub fn column_id(&self, col: i64) -> Option<&ColumnId> {
        self.column(col).map(|c| &c.column_id)
    }

    pub fn header(&self, col: i64) -> Option<&str> {
        self.column(col).map(|c| c.header.as_str())
    }

    /// Label of data row `row`, or `None` outside `0..num_rows`.
    pub fn row_label(&self, row: i64) -> Option<Cow<'_, str>> {
        let idx = to_index(row)?;
        if idx >= self.num_rows {
            return None;
        }
        Some(
            self.index_labels
                .get(idx)
                .map_or_else(|| Cow::Owned(idx.to_string()), |l| Cow::Borrowed(l.as_str())),
        )
    }

    /// Display value of a data cell, `None` when unknown or out of range.
    pub fn cell_value(&self, row: i64, col: i64) -> Option<&str> {
        let column = self.column(col)?;
        column.values.get(to_index(row)?).map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn sheet() -> SheetData {
        let mut col = ColumnData::new("id-a", "Revenue");
        col.values = vec!["10".into(), "20".into()];
        SheetData {
            name: "df1".into(),
            columns: vec![col, ColumnData::new("id-b", "Cost")],
            index_labels: vec!["x".into()],
            num_rows: 2,
        }
    }

    #[test]
    fn lookups_degrade_to_none() {
        let s = sheet();
        assert_eq!(s.header(0), Some("Revenue"));
        assert_eq!(s.header(-1), None);
        assert_eq!(s.header(2), None);
        assert_eq!(s.cell_value(1, 0), Some("20"));
        assert_eq!(s.cell_value(1, 1), None);
        assert_eq!(s.cell_value(-1, 0), None);
    }

    #[test]
    fn row_label_falls_back_to_position() {
        let s = sheet();
        assert_eq!(s.row_label(0).as_deref(), Some("x"));
        assert_eq!(s.row_label(1).as_deref(), Some("1"));
        assert_eq!(s.row_label(2), None);
        assert_eq!(s.row_label(-1), None);
    }

    #[test]
    fn deserializes_with_defaults() {
        let s: SheetData = serde_json::from_str(
            r#"{"name":"S","columns":[{"columnId":"c","header":"A"}],"numRows":4}"#,
        )
        .unwrap();
        assert_eq!(s.dims(), GridDims::new(4, 1));
        assert_eq!(s.column_ids(), vec![ColumnId::from("c")]);
    }

    #[test]
    fn default_column_is_blank() {
        let column = ColumnData::default();
        assert_eq!(column.column_id, ColumnId::default());
        assert!(column.column_id.0.is_empty());
        assert!(column.header.is_empty());
        assert_eq!(column.formula, None);
    }
}
