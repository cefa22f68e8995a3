use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// @module: Numeric sibling prefixes for split tree names

// @const: Leading digits, then an optional delimiter and the remaining name
static PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)(?:[_ ](.*))?$").expect("Invalid numeric prefix regex")
});

/// Largest accepted prefix width
pub const MAX_NUMBERING_WIDTH: usize = 12;

/// Largest accepted step between siblings
pub const MAX_NUMBERING_INCREMENT: u64 = 1_000_000;

/// Named numbering conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingMode {
    /// Two digits, one step per sibling: `01`, `02`, ...
    PerLevel,
    /// Four digits, steps of one hundred: `0100`, `0200`, ...
    Flat,
}

/// Width and step of the zero-padded sibling number
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct NumberingScheme {
    /// Minimum number of digits
    pub width: usize,
    /// Distance between consecutive siblings
    pub increment: u64,
}

impl NumberingScheme {
    pub fn from_mode(mode: NumberingMode) -> Self {
        match mode {
            NumberingMode::PerLevel => Self { width: 2, increment: 1 },
            NumberingMode::Flat => Self { width: 4, increment: 100 },
        }
    }

    // @returns: Sibling number for a 1-based position, saturating at u64::MAX
    pub fn number_for(&self, position: usize) -> u64 {
        (position as u64).saturating_mul(self.increment)
    }

    // @returns: Zero-padded prefix for a 1-based position
    pub fn format_prefix(&self, position: usize) -> String {
        format!("{:0width$}", self.number_for(position), width = self.width)
    }

    /// Build a full stored name, e.g. `03_Climax`
    pub fn name_for(&self, position: usize, delimiter: char, token: &str) -> String {
        format!("{}{}{}", self.format_prefix(position), delimiter, token)
    }
}

impl Default for NumberingScheme {
    fn default() -> Self {
        Self::from_mode(NumberingMode::PerLevel)
    }
}

/// Split a stored name into its sibling number and the remaining token.
///
/// Returns `None` when the name does not start with digits.
pub fn split_prefix(name: &str) -> Option<(u64, &str)> {
    let caps = PREFIX_REGEX.captures(name)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    let rest = caps.get(2).map_or("", |m| m.as_str());
    Some((number, rest))
}

/// Shorten a four-digit prefix to its first two digits (`0300 Act` -> `03 Act`).
///
/// Returns `None` when the name has no four-digit prefix.
pub fn shorten_prefix(name: &str) -> Option<String> {
    let (digits, rest) = name.split_at_checked(4)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut chars = rest.chars();
    let delimiter = chars.next().filter(|c| *c == ' ' || *c == '_')?;
    Some(format!("{}{}{}", &digits[..2], delimiter, chars.as_str()))
}
