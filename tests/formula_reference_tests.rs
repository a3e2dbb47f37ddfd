//! Picking cells into a formula and autocompleting headers/functions.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

mod common;
mod fixtures;

use common::*;
use fixtures::*;
use sheetgrid::formula::{resolve_references, FormulaScope};
use sheetgrid::{Command, EditorState, GridEvent, Modifiers, Selection};

/// Open an editor on `(row, col)` with `=` typed.
fn start_formula(grid: &mut sheetgrid::SheetGrid, row: i64, col: i64) {
    click(grid, row, col);
    type_text(grid, "=");
}

#[test]
fn single_cell_pick_uses_edited_row_label() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 3, 1);
    click(&mut grid, 3, 0);
    assert_eq!(display(&grid), "=Revenue3");
    // Still pending until the next keystroke.
    assert_eq!(formula(&grid), "=");
    assert!(matches!(grid.editor(), EditorState::Picking { .. }));
}

#[test]
fn whole_column_pick_resolves_to_edited_row() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 7, 0);
    click(&mut grid, -1, 1);
    assert_eq!(display(&grid), "=Cost7");
}

#[test]
fn multi_column_pick_is_a_row_range() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 2, 2);
    click(&mut grid, -1, 0);
    click_with(&mut grid, -1, 1, Modifiers::SHIFT);
    assert_eq!(display(&grid), "=Revenue2:Cost2");
}

#[test]
fn dragged_rectangle_is_upper_left_to_lower_right() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 9, 2);
    drag(&mut grid, (6, 1), (4, 0));
    assert_eq!(display(&grid), "=Revenue4:Cost6");
}

#[test]
fn ctrl_click_joins_references_with_commas() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 0, 2);
    type_text(&mut grid, "SUM(");
    click(&mut grid, 1, 0);
    click_with(&mut grid, 2, 1, Modifiers::CTRL);
    assert_eq!(display(&grid), "=SUM(Revenue1, Cost2");
}

#[test]
fn typing_after_a_pick_freezes_it() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 3, 2);
    click(&mut grid, 3, 0);
    type_text(&mut grid, "-");
    click(&mut grid, 3, 1);
    assert_eq!(formula(&grid), "=Revenue3-");
    assert_eq!(display(&grid), "=Revenue3-Cost3");

    let issued = press(&mut grid, "Enter");
    assert_eq!(issued.len(), 1);
    let Command::SetColumnFormula {
        new_formula,
        old_formula,
        index_labels,
        ..
    } = &issued[0].1
    else {
        panic!("expected a column formula, got {:?}", issued[0].1);
    };
    assert_eq!(new_formula, "=Revenue3-Cost3");
    assert_eq!(old_formula, "=Revenue0 - Cost0");
    assert!(index_labels.is_none());
}

#[test]
fn escape_discards_pending_pick() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 3, 1);
    click(&mut grid, 5, 0);
    press(&mut grid, "Escape");
    assert!(!grid.editor().is_open());
    // The grid selection never moved during the pick.
    assert_selections(&grid, &[Selection::cell(0, 3, 1)]);
}

#[test]
fn plain_value_edit_does_not_pick() {
    let mut grid = finance_grid();
    click(&mut grid, 2, 0);
    type_text(&mut grid, "5");
    let issued = pointer_down(&mut grid, 4, 1, Modifiers::NONE);
    send(&mut grid, GridEvent::PointerUp);

    assert_eq!(issued.len(), 1);
    assert!(matches!(
        &issued[0].1,
        Command::SetCellValue { row_label, new_value, .. } if row_label == "2" && new_value == "5"
    ));
    assert_selections(&grid, &[Selection::cell(0, 4, 1)]);
}

#[test]
fn cross_sheet_pick_is_prefixed_with_sheet_name() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 3, 1);
    send(&mut grid, GridEvent::SwitchSheet { sheet_index: 1 });
    assert!(grid.editor().is_open());

    click(&mut grid, 1, 0);
    assert_eq!(display(&grid), "=df2!Nameb");
}

#[test]
fn header_suggestion_replaces_typed_prefix() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 1, 2);
    type_text(&mut grid, "rev");

    let suggestions = grid.editor().session().unwrap().suggestions.clone().unwrap();
    assert_eq!(suggestions.match_length, 3);
    assert_eq!(suggestions.items[0].text, "Revenue");

    press(&mut grid, "Tab");
    assert_eq!(formula(&grid), "=Revenue");
    assert!(grid.editor().session().unwrap().suggestions.is_none());
}

#[test]
fn enter_keeps_fully_typed_header() {
    let sheet = SheetBuilder::new("df1")
        .column("Revenue Growth", &["1", "2", "3"])
        .column("Revenue", &["10", "20", "30"])
        .formula_column("Margin", "=Revenue0")
        .build();
    let mut grid =
        sheetgrid::SheetGrid::new(sheetgrid::GridConfig::default(), vec![sheet]).unwrap();
    start_formula(&mut grid, 0, 2);
    type_text(&mut grid, "Revenue");

    // First Enter settles on the exact header, the second submits.
    assert!(press(&mut grid, "Enter").is_empty());
    assert_eq!(formula(&grid), "=Revenue");
    let issued = press(&mut grid, "Enter");
    assert!(matches!(
        &issued[0].1,
        Command::SetColumnFormula { new_formula, .. } if new_formula == "=Revenue"
    ));
}

#[test]
fn function_suggestion_opens_call() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 1, 2);
    type_text(&mut grid, "AVER");
    send(&mut grid, GridEvent::SelectSuggestion { index: 0 });
    assert_eq!(formula(&grid), "=AVERAGE(");
}

#[test]
fn suggestions_skip_mid_identifier_matches() {
    let mut grid = finance_grid();
    start_formula(&mut grid, 1, 2);
    type_text(&mut grid, "xCo");
    assert!(grid.editor().session().unwrap().suggestions.is_none());
}

#[test]
fn resolver_handles_rows_and_unknown_sheets() {
    let sheets = finance_sheets();
    let scope = FormulaScope {
        sheet_index: 0,
        row_index: 4,
    };
    assert_eq!(
        resolve_references(&[Selection::rows(0, 2, 3)], &sheets, scope),
        "Revenue2:Profit3"
    );
    assert_eq!(
        resolve_references(&[Selection::cell(5, 0, 0), Selection::cell(0, 0, 0)], &sheets, scope),
        "Revenue0"
    );
    assert_eq!(
        resolve_references(&[Selection::cell(1, 2, 0)], &sheets, scope),
        "df2!Namec"
    );
}
