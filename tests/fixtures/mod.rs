//! Test fixtures for building sheets and grids in memory.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::SheetBuilder;
//!
//! let sheet = SheetBuilder::new("df1")
//!     .column("Revenue", &["10", "20"])
//!     .formula_column("Margin", "=Revenue0 * 0.2")
//!     .rows(2)
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use sheetgrid::{ColumnData, ColumnId, GridConfig, SheetData, SheetGrid};

/// Builder for one sheet. Column ids are derived from the header
/// (`Revenue` -> `revenue`) unless given explicitly.
#[derive(Debug, Clone)]
pub struct SheetBuilder {
    name: String,
    columns: Vec<ColumnData>,
    index_labels: Option<Vec<String>>,
    num_rows: usize,
}

impl SheetBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            index_labels: None,
            num_rows: 0,
        }
    }

    /// Add a value column.
    pub fn column(mut self, header: &str, values: &[&str]) -> Self {
        let mut column = ColumnData::new(header.to_lowercase(), header);
        column.values = values.iter().map(|v| (*v).to_string()).collect();
        self.num_rows = self.num_rows.max(values.len());
        self.columns.push(column);
        self
    }

    /// Add a column with an explicit id.
    pub fn column_with_id(mut self, id: &str, header: &str) -> Self {
        self.columns.push(ColumnData::new(id, header));
        self
    }

    /// Add a computed column.
    pub fn formula_column(mut self, header: &str, formula: &str) -> Self {
        let mut column = ColumnData::new(header.to_lowercase(), header);
        column.formula = Some(formula.to_string());
        self.columns.push(column);
        self
    }

    /// Add `n` empty columns named `C0`, `C1`, ...
    pub fn columns(mut self, n: usize) -> Self {
        for i in 0..n {
            self.columns
                .push(ColumnData::new(format!("c{i}").as_str(), format!("C{i}")));
        }
        self
    }

    pub fn rows(mut self, num_rows: usize) -> Self {
        self.num_rows = num_rows;
        self
    }

    pub fn index_labels(mut self, labels: &[&str]) -> Self {
        self.index_labels = Some(labels.iter().map(|l| (*l).to_string()).collect());
        self.num_rows = self.num_rows.max(labels.len());
        self
    }

    pub fn build(self) -> SheetData {
        let index_labels = self
            .index_labels
            .unwrap_or_else(|| (0..self.num_rows).map(|i| i.to_string()).collect());
        SheetData {
            name: self.name,
            columns: self.columns,
            index_labels,
            num_rows: self.num_rows,
        }
    }
}

/// The column ids of a sheet, in order.
pub fn ids(sheet: &SheetData) -> Vec<ColumnId> {
    sheet.column_ids()
}

/// Column ids from string literals.
pub fn id_list(ids: &[&str]) -> Vec<ColumnId> {
    ids.iter().map(|id| ColumnId::from(*id)).collect()
}

/// `df1`: Revenue, Cost (values) and Profit (formula) over 10 rows; `df2`:
/// Name over rows labelled `a`, `b`, `c`.
pub fn finance_sheets() -> Vec<SheetData> {
    let revenue: Vec<String> = (0..10).map(|i| (i * 100).to_string()).collect();
    let cost: Vec<String> = (0..10).map(|i| (i * 40).to_string()).collect();
    let revenue: Vec<&str> = revenue.iter().map(String::as_str).collect();
    let cost: Vec<&str> = cost.iter().map(String::as_str).collect();
    vec![
        SheetBuilder::new("df1")
            .column("Revenue", &revenue)
            .column("Cost", &cost)
            .formula_column("Profit", "=Revenue0 - Cost0")
            .rows(10)
            .build(),
        SheetBuilder::new("df2")
            .column("Name", &["ann", "bob", "cy"])
            .index_labels(&["a", "b", "c"])
            .build(),
    ]
}

/// A grid over [`finance_sheets`] with the default configuration.
pub fn finance_grid() -> SheetGrid {
    SheetGrid::new(GridConfig::default(), finance_sheets()).unwrap()
}

/// A grid with `rows` x `cols` empty cells.
pub fn blank_grid(rows: usize, cols: usize) -> SheetGrid {
    let sheet = SheetBuilder::new("blank").columns(cols).rows(rows).build();
    SheetGrid::new(GridConfig::default(), vec![sheet]).unwrap()
}
