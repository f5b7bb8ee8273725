//! The string table: elided literals and their reinjection.
//!
//! The very first pass over the source replaces every string, character, and
//! regex literal with a placeholder of the form `'N'` (the table index in
//! single quotes). Literals re-enter the output verbatim in the very last
//! pass, after identifier substitution can no longer touch them — which is
//! what guarantees string fidelity end to end.
//!
//! Reinjection performs one semantic rewrite: a character literal holding a
//! single character (or a single escape such as `'\n'` or `'A'`) comes
//! back boxed as `(new $p.Character('c'))`, so the emitted code keeps Java's
//! char/String distinction at runtime.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(\d+)'").expect("valid regex"));

static CHAR_LITERAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^'(?:[^'\\\n]|\\.[0-9A-Fa-f]*)'$").expect("valid regex")
});

/// The append-only table of elided literals.
#[derive(Debug, Default)]
pub struct StringTable {
    entries: Vec<String>,
}

impl StringTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        StringTable { entries: Vec::new() }
    }

    /// Appends a literal and returns its placeholder, e.g. `'4'`.
    pub fn add(&mut self, literal: String) -> String {
        let index = self.entries.len();
        self.entries.push(literal);
        format!("'{index}'")
    }

    /// Returns the literal at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Number of stored literals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no literals were elided.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every `'N'` placeholder in `code` with its stored literal.
    ///
    /// Regex literals (stored starting with `/`) and string literals return
    /// verbatim; bare character literals are boxed into `$p.Character`.
    /// A placeholder with no table entry passes through unchanged.
    pub fn reinject(&self, code: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(code, |caps: &Captures<'_>| {
                let index: usize = match caps[1].parse() {
                    Ok(index) => index,
                    Err(_) => return caps[0].to_string(),
                };
                let literal = match self.entries.get(index) {
                    Some(literal) => literal,
                    None => return caps[0].to_string(),
                };
                if literal.starts_with('/') {
                    return literal.clone();
                }
                if CHAR_LITERAL_RE.is_match(literal) {
                    return format!("(new $p.Character({literal}))");
                }
                literal.clone()
            })
            .into_owned()
    }
}
