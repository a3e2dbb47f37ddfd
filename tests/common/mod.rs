//! Common test utilities: event drivers and assertion helpers.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_precision_loss
)]

use sheetgrid::{
    Command, CommandId, CommandResponse, GridEvent, Key, Modifiers, Selection, SheetGrid,
};

// ============================================================================
// Event Drivers
// ============================================================================

/// Apply an event, returning the commands it issued.
pub fn send(grid: &mut SheetGrid, event: GridEvent) -> Vec<(CommandId, Command)> {
    let mut issued = Vec::new();
    grid.handle(event, &mut issued).unwrap();
    issued
}

/// Pointer coordinates of the centre of `(row, col)`, given the grid's
/// current widths and scroll. `-1` targets the header bands.
pub fn cell_point(grid: &SheetGrid, row: i64, col: i64) -> (f32, f32) {
    let config = grid.config();
    let scroll = grid.state().scroll_position;
    let x = match usize::try_from(col) {
        Ok(c) => {
            let widths = grid.widths().sheet(grid.state().sheet_index).unwrap();
            config.row_label_width + widths.column_left(c) + widths.width(c).unwrap() / 2.0
                - scroll.scroll_left
        }
        Err(_) => config.row_label_width / 2.0,
    };
    let y = match usize::try_from(row) {
        Ok(r) => {
            config.column_header_height + config.row_height * (r as f32 + 0.5) - scroll.scroll_top
        }
        Err(_) => config.column_header_height / 2.0,
    };
    (x, y)
}

pub fn pointer_down(grid: &mut SheetGrid, row: i64, col: i64, modifiers: Modifiers) -> Vec<(CommandId, Command)> {
    let (x, y) = cell_point(grid, row, col);
    send(grid, GridEvent::PointerDown { x, y, modifiers })
}

pub fn pointer_move(grid: &mut SheetGrid, row: i64, col: i64) {
    let (x, y) = cell_point(grid, row, col);
    send(grid, GridEvent::PointerMove { x, y });
}

/// Press and release on a cell.
pub fn click(grid: &mut SheetGrid, row: i64, col: i64) {
    click_with(grid, row, col, Modifiers::NONE);
}

pub fn click_with(grid: &mut SheetGrid, row: i64, col: i64, modifiers: Modifiers) {
    pointer_down(grid, row, col, modifiers);
    send(grid, GridEvent::PointerUp);
}

/// Press, drag to a second cell, release.
pub fn drag(grid: &mut SheetGrid, from: (i64, i64), to: (i64, i64)) {
    pointer_down(grid, from.0, from.1, Modifiers::NONE);
    pointer_move(grid, to.0, to.1);
    send(grid, GridEvent::PointerUp);
}

pub fn press(grid: &mut SheetGrid, key: &str) -> Vec<(CommandId, Command)> {
    press_with(grid, key, Modifiers::NONE)
}

pub fn press_with(grid: &mut SheetGrid, key: &str, modifiers: Modifiers) -> Vec<(CommandId, Command)> {
    send(
        grid,
        GridEvent::KeyDown {
            key: Key::from(key),
            modifiers,
        },
    )
}

pub fn type_text(grid: &mut SheetGrid, text: &str) {
    send(grid, GridEvent::TypeText { text: text.into() });
}

pub fn respond(grid: &mut SheetGrid, id: CommandId, error: Option<&str>) {
    send(
        grid,
        GridEvent::CommandResponse(CommandResponse {
            id,
            error: error.map(str::to_string),
        }),
    );
}

// ============================================================================
// Assertion Helpers
// ============================================================================

pub fn assert_selections(grid: &SheetGrid, expected: &[Selection]) {
    assert_eq!(
        grid.state().selections,
        expected,
        "selections differ from expected"
    );
}

/// Assert the single selection spans rows `r0..=r1` and columns `c0..=c1`
/// in that direction.
pub fn assert_single(grid: &SheetGrid, start: (i64, i64), end: (i64, i64)) {
    let sheet = grid.state().sheet_index;
    assert_selections(grid, &[Selection::cell(sheet, start.0, start.1).with_end(end.0, end.1)]);
}

pub fn formula(grid: &SheetGrid) -> String {
    grid.editor()
        .session()
        .map(|s| s.formula.clone())
        .expect("editor should be open")
}

pub fn display(grid: &SheetGrid) -> String {
    grid.display_formula().expect("editor should be open")
}
