//! Selection-to-reference text.
//!
//! References concatenate a column header and a row label with no
//! separator (`Revenue3`); ranges join two of those with `:`.

use crate::types::{Selection, SheetData};

/// Where the formula being edited lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaScope {
    pub sheet_index: usize,
    /// Row being edited, or `-1` for a header/column-level edit.
    pub row_index: i64,
}

/// Reference text for every selection, joined with `", "`.
///
/// Selections that cannot be resolved (unknown sheet, no columns, nothing
/// but header bands) are skipped.
pub fn resolve_references(
    selections: &[Selection],
    sheets: &[SheetData],
    scope: FormulaScope,
) -> String {
    let scope_label = sheets
        .get(scope.sheet_index)
        .and_then(|s| s.row_label(scope.row_index))
        .map(|l| l.into_owned());

    selections
        .iter()
        .filter_map(|sel| {
            let sheet = sheets.get(sel.sheet_index)?;
            if sel.sheet_index == scope.sheet_index {
                resolve_one(sel, sheet, scope_label.as_deref())
            } else {
                // The edited row only scopes picks on the formula's own sheet.
                let text = resolve_one(sel, sheet, None)?;
                Some(format!("{}!{text}", sheet.name))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn resolve_one(sel: &Selection, sheet: &SheetData, scope_label: Option<&str>) -> Option<String> {
    if sel.is_degenerate() {
        return None;
    }
    let (min_col, max_col) = sel.column_range();

    if sel.is_full_column() {
        let first = sheet.header(min_col)?;
        let last = sheet.header(max_col)?;
        // Formulas are evaluated per row, so a whole-column pick resolves to
        // the row being edited when there is one.
        return Some(match (scope_label, min_col == max_col) {
            (Some(label), true) => format!("{first}{label}"),
            (Some(label), false) => format!("{first}{label}:{last}{label}"),
            (None, true) => first.to_string(),
            (None, false) => format!("{first}:{last}"),
        });
    }

    let (min_row, max_row) = sel.row_range();

    if sel.is_full_row() {
        let last_col = i64::try_from(sheet.num_columns()).ok()? - 1;
        let first = sheet.header(0)?;
        let last = sheet.header(last_col)?;
        let top = sheet.row_label(min_row)?;
        let bottom = sheet.row_label(max_row)?;
        return Some(format!("{first}{top}:{last}{bottom}"));
    }

    // Mixed header/data rectangles reference their data part only.
    let (min_row, min_col) = (min_row.max(0), min_col.max(0));
    let upper_left = cell_reference(sheet, min_row, min_col)?;
    if (min_row, min_col) == (max_row, max_col) {
        return Some(upper_left);
    }
    let lower_right = cell_reference(sheet, max_row, max_col)?;
    Some(format!("{upper_left}:{lower_right}"))
}

fn cell_reference(sheet: &SheetData, row: i64, col: i64) -> Option<String> {
    Some(format!("{}{}", sheet.header(col)?, sheet.row_label(row)?))
}
