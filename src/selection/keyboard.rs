//! Arrow-key and Tab navigation.

use super::clamp_end_to_anchor;
use crate::types::{Direction, GridDims, Key, Modifiers, Selection, HEADER_INDEX};

/// Selection list after a navigation key press.
///
/// Arrows move the active cell (collapsing any multi-select) or, with shift,
/// move the end of the last region. The jump modifier first stops at index
/// `0` and then at the sheet edge. Tab walks row-major across data columns.
/// Keys that do not navigate, and moves that would land on the corner,
/// return the list unchanged.
pub fn selection_after_key_press(
    selections: &[Selection],
    dims: GridDims,
    key: &Key,
    modifiers: Modifiers,
) -> Vec<Selection> {
    let Some((last, rest)) = selections.split_last() else {
        return selections.to_vec();
    };
    let next = match key {
        Key::Arrow(direction) if modifiers.shift => {
            let (row, col) = step(last.end(), *direction, modifiers.jump(), dims);
            let row = clamp_end_to_anchor(last.starting_row_index, row);
            let col = clamp_end_to_anchor(last.starting_column_index, col);
            if (row, col) == last.end() {
                return selections.to_vec();
            }
            let mut next = rest.to_vec();
            next.push(last.with_end(row, col));
            return next;
        }
        Key::Arrow(direction) => step(last.start(), *direction, modifiers.jump(), dims),
        Key::Tab => match tab(last.start(), modifiers.shift, dims) {
            Some(cell) => cell,
            None => return selections.to_vec(),
        },
        _ => return selections.to_vec(),
    };
    if next == (HEADER_INDEX, HEADER_INDEX) {
        return selections.to_vec();
    }
    vec![Selection::cell(last.sheet_index, next.0, next.1)]
}

fn step((row, col): (i64, i64), direction: Direction, jump: bool, dims: GridDims) -> (i64, i64) {
    match direction {
        Direction::Up => (backward(row, jump), col),
        Direction::Down => (forward(row, jump, dims.max_row()), col),
        Direction::Left => (row, backward(col, jump)),
        Direction::Right => (row, forward(col, jump, dims.max_column())),
    }
}

fn backward(index: i64, jump: bool) -> i64 {
    let next = match (jump, index > 0) {
        (true, true) => 0,
        (true, false) => HEADER_INDEX,
        (false, _) => index - 1,
    };
    next.max(HEADER_INDEX)
}

fn forward(index: i64, jump: bool, max: i64) -> i64 {
    let next = match (jump, index == HEADER_INDEX) {
        (true, true) => 0,
        (true, false) => max,
        (false, _) => index + 1,
    };
    next.min(max).max(HEADER_INDEX)
}

/// Next Tab stop, or `None` when there is nowhere to go.
///
/// Wrapping happens between data rows only; the header row never wraps
/// into the data and Shift+Tab from the first data cell stays put.
fn tab((row, col): (i64, i64), backwards: bool, dims: GridDims) -> Option<(i64, i64)> {
    let max_col = dims.max_column();
    if max_col < 0 {
        return None;
    }
    if backwards {
        if col > 0 {
            Some((row, col.min(max_col + 1) - 1))
        } else if row > 0 {
            Some((row - 1, max_col))
        } else {
            None
        }
    } else if col < max_col {
        Some((row, (col + 1).max(0)))
    } else if row >= 0 && row < dims.max_row() {
        Some((row + 1, 0))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    const DIMS: GridDims = GridDims {
        num_rows: 5,
        num_columns: 4,
    };

    fn press(sel: Selection, key: &str, modifiers: Modifiers) -> Vec<Selection> {
        selection_after_key_press(&[sel], DIMS, &Key::from(key), modifiers)
    }

    #[test_case((2, 2), "ArrowUp", (1, 2))]
    #[test_case((2, 2), "ArrowDown", (3, 2))]
    #[test_case((2, 2), "ArrowLeft", (2, 1))]
    #[test_case((2, 2), "ArrowRight", (2, 3))]
    #[test_case((0, 2), "ArrowUp", (-1, 2))]
    #[test_case((4, 3), "ArrowDown", (4, 3))]
    #[test_case((4, 3), "ArrowRight", (4, 3))]
    #[test_case((2, 0), "ArrowLeft", (2, -1))]
    fn arrows_move_one_cell(from: (i64, i64), key: &str, to: (i64, i64)) {
        let next = press(Selection::cell(0, from.0, from.1), key, Modifiers::NONE);
        assert_eq!(next, vec![Selection::cell(0, to.0, to.1)]);
    }

    #[test]
    fn arrow_into_corner_is_ignored() {
        let sel = Selection::cell(0, -1, 0);
        assert_eq!(press(sel, "ArrowLeft", Modifiers::NONE), vec![sel]);
    }

    #[test_case((3, 2), "ArrowUp", (0, 2); "up stops at first row")]
    #[test_case((0, 2), "ArrowUp", (-1, 2); "up then reaches header")]
    #[test_case((1, 1), "ArrowDown", (4, 1); "down reaches last row")]
    #[test_case((-1, 1), "ArrowDown", (0, 1); "down from header stops at first row")]
    #[test_case((2, 3), "ArrowLeft", (2, 0); "left stops at first column")]
    #[test_case((2, 0), "ArrowRight", (2, 3); "right reaches last column")]
    fn jump_modifier(from: (i64, i64), key: &str, to: (i64, i64)) {
        let next = press(Selection::cell(0, from.0, from.1), key, Modifiers::CTRL);
        assert_eq!(next, vec![Selection::cell(0, to.0, to.1)]);
    }

    #[test]
    fn shift_extends_end_and_keeps_anchor() {
        let next = press(Selection::cell(0, 2, 2), "ArrowDown", Modifiers::SHIFT);
        assert_eq!(next[0].start(), (2, 2));
        assert_eq!(next[0].end(), (3, 2));

        let mods = Modifiers {
            shift: true,
            ctrl: true,
            ..Modifiers::NONE
        };
        let next = press(next[0], "ArrowRight", mods);
        assert_eq!(next[0].end(), (3, 3));
    }

    #[test]
    fn shift_extension_keeps_other_regions() {
        let sels = [Selection::cell(0, 0, 0), Selection::cell(0, 2, 2)];
        let next = selection_after_key_press(
            &sels,
            DIMS,
            &Key::Arrow(Direction::Left),
            Modifiers::SHIFT,
        );
        assert_eq!(next.len(), 2);
        assert_eq!(next[1].end(), (2, 1));
    }

    #[test]
    fn shift_on_full_column_stays_in_header_band() {
        let sel = Selection::columns(0, 1, 1);
        assert_eq!(press(sel, "ArrowDown", Modifiers::SHIFT), vec![sel]);
        let next = press(sel, "ArrowRight", Modifiers::SHIFT);
        assert_eq!(next, vec![Selection::columns(0, 1, 2)]);
    }

    #[test]
    fn plain_arrow_collapses_multi_select() {
        let sels = [Selection::cell(0, 0, 0), Selection::cell(0, 2, 2).with_end(3, 3)];
        let next =
            selection_after_key_press(&sels, DIMS, &Key::Arrow(Direction::Down), Modifiers::NONE);
        assert_eq!(next, vec![Selection::cell(0, 3, 2)]);
    }

    #[test_case((1, 1), false, Some((1, 2)); "forward")]
    #[test_case((1, 3), false, Some((2, 0)); "forward wraps")]
    #[test_case((4, 3), false, None; "forward at end")]
    #[test_case((1, -1), false, Some((1, 0)); "forward from label")]
    #[test_case((-1, 3), false, None; "header does not wrap")]
    #[test_case((1, 1), true, Some((1, 0)); "backward")]
    #[test_case((2, 0), true, Some((1, 3)); "backward wraps")]
    #[test_case((0, 0), true, None; "backward at start")]
    fn tab_order(from: (i64, i64), backwards: bool, to: Option<(i64, i64)>) {
        assert_eq!(tab(from, backwards, DIMS), to);
    }

    #[test]
    fn tab_never_lands_on_corner() {
        let sel = Selection::cell(0, -1, 0);
        let mods = Modifiers::SHIFT;
        assert_eq!(press(sel, "Tab", mods), vec![sel]);
    }

    #[test]
    fn other_keys_do_nothing() {
        let sel = Selection::cell(0, 1, 1);
        assert_eq!(press(sel, "a", Modifiers::NONE), vec![sel]);
    }
}
