//! Column-header and function-name autocomplete.

use serde::{Deserialize, Serialize};

use super::splice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionKind {
    ColumnHeader,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub text: String,
}

impl Suggestion {
    /// Text inserted when the suggestion is accepted.
    pub fn insert_text(&self) -> String {
        match self.kind {
            SuggestionKind::ColumnHeader => self.text.clone(),
            SuggestionKind::Function => format!("{}(", self.text),
        }
    }
}

/// Matches for the longest matching suffix of the text before the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    /// Characters before the cursor replaced on accept.
    pub match_length: usize,
    pub items: Vec<Suggestion>,
}

/// Suggestions for `text` (the formula up to the cursor).
///
/// Tries suffixes from `max_length` characters down to one. A suffix counts
/// only when the character before it is not alphanumeric, so matches never
/// start inside another identifier. The first length with a case-insensitive
/// prefix match wins. A name equal to the suffix is listed first, so
/// accepting the top item leaves a fully typed name alone.
pub fn suggestions_for(
    text: &str,
    headers: &[&str],
    functions: &[String],
    max_length: usize,
) -> Option<Suggestions> {
    let chars: Vec<char> = text.chars().collect();
    let longest = max_length.min(chars.len());

    for length in (1..=longest).rev() {
        let start = chars.len() - length;
        if start > 0 && chars.get(start - 1).is_some_and(|c| c.is_alphanumeric()) {
            continue;
        }
        let suffix: String = chars.get(start..).unwrap_or_default().iter().collect();
        let needle = suffix.to_lowercase();
        if needle.trim().is_empty() {
            continue;
        }

        let matches = |name: &str| {
            let name = name.to_lowercase();
            name.starts_with(&needle)
        };
        let mut items: Vec<Suggestion> = headers
            .iter()
            .filter(|h| matches(**h))
            .map(|h| Suggestion {
                kind: SuggestionKind::ColumnHeader,
                text: (*h).to_string(),
            })
            .collect();
        items.extend(
            functions
                .iter()
                .filter(|f| matches(f.as_str()))
                .map(|f| Suggestion {
                    kind: SuggestionKind::Function,
                    text: f.clone(),
                }),
        );
        items.dedup();
        items.sort_by_key(|item| item.text.to_lowercase() != needle);

        if !items.is_empty() {
            return Some(Suggestions {
                match_length: length,
                items,
            });
        }
    }
    None
}

/// Replace the matched span before `cursor` with suggestion `index`.
/// Returns the new text and caret, or `None` for an unknown index.
pub fn accept_suggestion(
    formula: &str,
    cursor: usize,
    suggestions: &Suggestions,
    index: usize,
) -> Option<(String, usize)> {
    let suggestion = suggestions.items.get(index)?;
    let start = cursor.saturating_sub(suggestions.match_length);
    Some(splice(formula, start, cursor, &suggestion.insert_text()))
}
