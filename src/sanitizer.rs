/*!
 * Mapping between human-readable labels and filesystem-safe name tokens.
 *
 * Labels coming from marker lines may contain spaces; on disk the words are
 * joined with the configured delimiter. Characters that cannot appear in a
 * single path segment are replaced so a label never creates extra nesting.
 */

use serde::{Deserialize, Serialize};

/// Replacement for characters that are unsafe in a path segment
const UNSAFE_REPLACEMENT: char = '-';

/// Word separator used in stored names
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `01_Act_One`
    #[default]
    Underscore,
    /// `01 Act One`
    Space,
}

impl Delimiter {
    // @returns: Delimiter character
    pub fn as_char(self) -> char {
        match self {
            Self::Underscore => '_',
            Self::Space => ' ',
        }
    }
}

/// Converts labels to stored names and back
#[derive(Debug, Clone, Copy, Default)]
pub struct Sanitizer {
    delimiter: Delimiter,
}

impl Sanitizer {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Convert a label into a token usable as (part of) a file name
    pub fn to_storage_name(&self, label: &str) -> String {
        let delimiter = self.delimiter.as_char();
        label
            .trim()
            .chars()
            .map(|ch| {
                if ch == ' ' {
                    delimiter
                } else if is_unsafe_in_segment(ch) {
                    UNSAFE_REPLACEMENT
                } else {
                    ch
                }
            })
            .collect()
    }

    /// Convert a stored token back into a human-readable label
    pub fn to_display_name(&self, token: &str) -> String {
        token.replace(self.delimiter.as_char(), " ")
    }
}

fn is_unsafe_in_segment(ch: char) -> bool {
    matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || ch.is_control()
}

/// Insert a blank line after every non-blank line that is followed by another non-blank line
pub fn expand_paragraphs(lines: &[String]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(lines.len() * 2);
    for (i, line) in lines.iter().enumerate() {
        expanded.push(line.clone());
        let next_is_text = lines.get(i + 1).is_some_and(|next| !next.trim().is_empty());
        if !line.trim().is_empty() && next_is_text {
            expanded.push(String::new());
        }
    }
    expanded
}

/// Remove every blank line
pub fn collapse_blank_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .cloned()
        .collect()
}
