//! The atom table: masked source fragments addressed by integer index.
//!
//! During lexing every balanced bracket group is cut out of the token stream
//! and replaced by a quoted marker such as `"B3"` — a kind letter followed by
//! the fragment's index in this table. Later passes mint further atoms for
//! extracted declarations (methods, classes, constructors, ...) using the
//! same encoding, so a single flat table maps every marker back to its text.
//!
//! The table is append-only: atoms are created during lexing and extraction
//! and never mutated. Index `0` is reserved for the bracket-free top level of
//! the source, which is stored last but addressed first.
//!
//! ## Example
//!
//! ```
//! use sketchjs_base::{AtomTable, AtomKind};
//!
//! let mut atoms = AtomTable::new();
//! let marker = atoms.add(AtomKind::Brace, "{ x = 1; }".to_string());
//! assert_eq!(marker, "\"A1\"");
//! assert_eq!(AtomTable::parse_marker(&marker), Some((AtomKind::Brace, 1)));
//! assert_eq!(atoms.resolve(1), "{ x = 1; }");
//! ```

/// The kind tag carried by every atom.
///
/// The first three kinds are produced by bracket atomization; the rest are
/// minted by declaration extraction and expression lowering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomKind {
    /// `A` — a `{ ... }` body.
    Brace,
    /// `B` — a `( ... )` group.
    Paren,
    /// `C` — a `[ ... ]` group.
    Bracket,
    /// `D` — an extracted method declaration.
    Method,
    /// `E` — an extracted class or interface declaration.
    Class,
    /// `F` — an anonymous-class `new T() { ... }` expression.
    InlineClass,
    /// `G` — an extracted constructor declaration.
    Constructor,
    /// `H` — a `function` literal.
    Function,
    /// `I` — an inline object literal `{ label: value, ... }`.
    InlineObject,
}

impl AtomKind {
    /// The single-letter tag used inside markers.
    pub fn tag(self) -> char {
        match self {
            AtomKind::Brace => 'A',
            AtomKind::Paren => 'B',
            AtomKind::Bracket => 'C',
            AtomKind::Method => 'D',
            AtomKind::Class => 'E',
            AtomKind::InlineClass => 'F',
            AtomKind::Constructor => 'G',
            AtomKind::Function => 'H',
            AtomKind::InlineObject => 'I',
        }
    }

    /// The inverse of [`AtomKind::tag`].
    pub fn from_tag(tag: char) -> Option<AtomKind> {
        Some(match tag {
            'A' => AtomKind::Brace,
            'B' => AtomKind::Paren,
            'C' => AtomKind::Bracket,
            'D' => AtomKind::Method,
            'E' => AtomKind::Class,
            'F' => AtomKind::InlineClass,
            'G' => AtomKind::Constructor,
            'H' => AtomKind::Function,
            'I' => AtomKind::InlineObject,
            _ => return None,
        })
    }
}

/// A single masked source fragment.
#[derive(Debug, Clone)]
pub struct Atom {
    pub kind: AtomKind,
    pub text: String,
}

/// The append-only table of atoms.
///
/// Markers are quoted so they survive every later regex pass untouched: by
/// the time atomization runs, all real string literals have already been
/// elided, so a double quote can only introduce a marker.
#[derive(Debug)]
pub struct AtomTable {
    atoms: Vec<Atom>,
}

impl Default for AtomTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomTable {
    /// Creates a table with slot `0` reserved for the top-level remainder.
    pub fn new() -> Self {
        AtomTable {
            atoms: vec![Atom {
                kind: AtomKind::Brace,
                text: String::new(),
            }],
        }
    }

    /// Appends a fragment and returns its marker, e.g. `"B7"`.
    pub fn add(&mut self, kind: AtomKind, text: String) -> String {
        let index = self.atoms.len();
        self.atoms.push(Atom { kind, text });
        Self::marker(kind, index)
    }

    /// Builds the marker string for a kind/index pair.
    pub fn marker(kind: AtomKind, index: usize) -> String {
        format!("\"{}{}\"", kind.tag(), index)
    }

    /// Parses a marker back into its kind and index.
    ///
    /// Accepts exactly the strings produced by [`AtomTable::marker`].
    pub fn parse_marker(marker: &str) -> Option<(AtomKind, usize)> {
        let inner = marker.strip_prefix('"')?.strip_suffix('"')?;
        let mut chars = inner.chars();
        let kind = AtomKind::from_tag(chars.next()?)?;
        let index: usize = chars.as_str().parse().ok()?;
        Some((kind, index))
    }

    /// Stores the bracket-free top level of the source in slot `0`.
    pub fn set_root(&mut self, text: String) {
        self.atoms[0].text = text;
    }

    /// The bracket-free top level of the source.
    pub fn root(&self) -> &str {
        &self.atoms[0].text
    }

    /// Returns the fragment at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.atoms.get(index).map(|atom| atom.text.as_str())
    }

    /// Returns the fragment at `index`.
    ///
    /// A missing index is a programmer bug (a marker that was never minted);
    /// it trips a debug assertion and renders as empty text in release
    /// builds, keeping the translator best-effort.
    pub fn resolve(&self, index: usize) -> &str {
        match self.atoms.get(index) {
            Some(atom) => &atom.text,
            None => {
                debug_assert!(false, "atom index {index} was never minted");
                ""
            }
        }
    }

    /// Returns the kind recorded for `index`, if present.
    pub fn kind(&self, index: usize) -> Option<AtomKind> {
        self.atoms.get(index).map(|atom| atom.kind)
    }

    /// Number of atoms, including the reserved root slot.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// `true` when only the reserved root slot exists.
    pub fn is_empty(&self) -> bool {
        self.atoms.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_one_based() {
        let mut atoms = AtomTable::new();
        assert_eq!(atoms.add(AtomKind::Paren, "(a)".into()), "\"B1\"");
        assert_eq!(atoms.add(AtomKind::Brace, "{b}".into()), "\"A2\"");
        assert_eq!(atoms.resolve(1), "(a)");
        assert_eq!(atoms.resolve(2), "{b}");
    }

    #[test]
    fn root_lives_in_slot_zero() {
        let mut atoms = AtomTable::new();
        atoms.add(AtomKind::Paren, "(a)".into());
        atoms.set_root("top \"B1\"".into());
        assert_eq!(atoms.root(), "top \"B1\"");
        assert_eq!(atoms.resolve(0), "top \"B1\"");
    }

    #[test]
    fn marker_round_trip() {
        for kind in [
            AtomKind::Brace,
            AtomKind::Paren,
            AtomKind::Bracket,
            AtomKind::Method,
            AtomKind::Class,
            AtomKind::InlineClass,
            AtomKind::Constructor,
            AtomKind::Function,
            AtomKind::InlineObject,
        ] {
            let marker = AtomTable::marker(kind, 17);
            assert_eq!(AtomTable::parse_marker(&marker), Some((kind, 17)));
        }
    }

    #[test]
    fn parse_marker_rejects_garbage() {
        assert_eq!(AtomTable::parse_marker("\"Z9\""), None);
        assert_eq!(AtomTable::parse_marker("\"B\""), None);
        assert_eq!(AtomTable::parse_marker("B9"), None);
    }
}
