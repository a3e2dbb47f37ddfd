//! Formula-reference resolution and autocomplete.
//!
//! Cursor positions are character offsets into the formula text; they are
//! converted to byte offsets only at the point of splicing.

mod functions;
mod references;
mod suggestions;

pub use functions::FUNCTION_NAMES;
pub use references::{resolve_references, FormulaScope};
pub use suggestions::{accept_suggestion, suggestions_for, Suggestion, SuggestionKind, Suggestions};

use crate::types::{PendingSelections, SheetData};

/// Replace characters `start..end` of `text` with `insert`.
///
/// Offsets past the end clamp to the end. Returns the new text and the
/// caret position just after the inserted text.
pub fn splice(text: &str, start: usize, end: usize, insert: &str) -> (String, usize) {
    let (start, end) = (start.min(end), start.max(end));
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end);
    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(text.get(..start_byte).unwrap_or(text));
    out.push_str(insert);
    out.push_str(text.get(end_byte..).unwrap_or_default());
    let caret = text.get(..start_byte).map_or(0, |s| s.chars().count()) + insert.chars().count();
    (out, caret)
}

/// Byte offset of character `index`, or the text length past the end.
pub fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Splice the resolved pending picks into `formula`.
/// Returns the new text and the caret after the inserted references.
pub fn commit_pending(
    formula: &str,
    pending: &PendingSelections,
    sheets: &[SheetData],
    scope: FormulaScope,
) -> (String, usize) {
    let references = resolve_references(&pending.selections, sheets, scope);
    splice(
        formula,
        pending.input_selection_start,
        pending.input_selection_end,
        &references,
    )
}
