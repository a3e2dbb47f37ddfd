//! Text-buffer edits on an open session.
//!
//! These only touch `formula` and `cursor`. Freezing pending picks and
//! refreshing suggestions is the caller's job.

use crate::formula::splice;
use crate::types::{CursorSpan, Direction, EditSession};

/// Replace the cursor span with `text`.
pub fn insert_text(session: &mut EditSession, text: &str) {
    let (start, end) = session.cursor.ordered();
    let (formula, caret) = splice(&session.formula, start, end, text);
    session.formula = formula;
    session.cursor = CursorSpan::caret(caret);
}

/// Delete the span, or the character before the caret.
pub fn backspace(session: &mut EditSession) {
    let (start, end) = session.cursor.ordered();
    if start == end {
        if start == 0 {
            return;
        }
        remove(session, start - 1, start);
    } else {
        remove(session, start, end);
    }
}

/// Delete the span, or the character after the caret.
pub fn delete_forward(session: &mut EditSession) {
    let (start, end) = session.cursor.ordered();
    if start == end {
        if start >= char_len(session) {
            return;
        }
        remove(session, start, start + 1);
    } else {
        remove(session, start, end);
    }
}

/// Place the cursor, clamped to the text.
pub fn set_cursor(session: &mut EditSession, start: usize, end: usize) {
    let len = char_len(session);
    session.cursor = CursorSpan {
        start: start.min(len),
        end: end.min(len),
    };
}

/// Move the caret one character left or right, collapsing any span.
/// Up and Down leave the cursor alone.
pub fn move_caret(session: &mut EditSession, direction: Direction) {
    let (start, end) = session.cursor.ordered();
    let at = match direction {
        Direction::Left if start == end => start.saturating_sub(1),
        Direction::Left => start,
        Direction::Right if start == end => (end + 1).min(char_len(session)),
        Direction::Right => end,
        Direction::Up | Direction::Down => return,
    };
    session.cursor = CursorSpan::caret(at);
}

fn remove(session: &mut EditSession, start: usize, end: usize) {
    let (formula, caret) = splice(&session.formula, start, end, "");
    session.formula = formula;
    session.cursor = CursorSpan::caret(caret);
}

fn char_len(session: &EditSession) -> usize {
    session.formula.chars().count()
}
