//! The transformer: atomized text in, AST out.
//!
//! Submodules split the work the way the pipeline stages do:
//!
//! - [`declarations`] — header pattern matching and extraction atoms
//! - [`statements`] — the statement scanner and control-flow nodes
//! - [`expressions`] — expression expansion and the Java-ism rewrites
//! - [`classes`] — class and interface body assembly
//!
//! Everything runs through a [`Transformer`], which borrows the session so
//! each pass can mint atoms, declare classes, and read literals without any
//! global state.

pub mod classes;
pub mod declarations;
pub mod expressions;
pub mod statements;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::ast::Root;
use crate::session::TransformSession;

/// An identifier in the dialect (post-escape, so `$` only occurs in text the
/// translator itself minted). The trailing `\b` keeps backtracking from
/// splitting one identifier into type-and-name.
pub(crate) const IDENT: &str = r"[A-Za-z_$][0-9A-Za-z_$]*\b";

/// A dotted type or package path.
pub(crate) const DOTTED: &str =
    r"[A-Za-z_$][0-9A-Za-z_$]*\b(?:\s*\.\s*[A-Za-z_$][0-9A-Za-z_$]*\b)*";

static IMPORT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bimport\s+[^;]+;").expect("valid regex"));

/// Drives all transformation passes over one session.
pub struct Transformer<'s> {
    pub(crate) sess: &'s mut TransformSession,
}

impl<'s> Transformer<'s> {
    pub fn new(sess: &'s mut TransformSession) -> Self {
        Transformer { sess }
    }

    /// Transforms the atomized top level (atom 0) into the document root.
    ///
    /// Imports vanish here: the target language has no module system for
    /// them to map onto, and the host supplies every library global.
    pub fn transform_main(&mut self) -> Root {
        let top = self.sess.atoms.root().to_string();
        let extracted = declarations::extract_classes_and_methods(self, &top);
        let without_imports = IMPORT_RE.replace_all(&extracted, "").into_owned();
        Root {
            statements: self.transform_statements(&without_imports),
        }
    }
}

/// A string split into leading whitespace, content, and trailing whitespace,
/// so a rewritten middle can be spliced back without disturbing layout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Trimmed<'a> {
    pub left: &'a str,
    pub middle: &'a str,
    pub right: &'a str,
}

impl Trimmed<'_> {
    pub fn untrim(&self, middle: &str) -> String {
        format!("{}{}{}", self.left, middle, self.right)
    }
}

pub(crate) fn trim_spaces(text: &str) -> Trimmed<'_> {
    let start = text.len() - text.trim_start().len();
    if start == text.len() {
        return Trimmed {
            left: text,
            middle: "",
            right: "",
        };
    }
    let end = text.trim_end().len();
    Trimmed {
        left: &text[..start],
        middle: &text[start..end],
        right: &text[end..],
    }
}

/// `replace_all` with a veto: the callback returns `None` to reject a match,
/// and scanning resumes one byte past the match start — the behavior a
/// negative lookahead would produce, which the regex engine here does not
/// support directly.
pub(crate) fn rewrite_filtered<F>(re: &Regex, text: &str, mut f: F) -> String
where
    F: FnMut(&Captures<'_>) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while pos <= text.len() {
        let caps = match re.captures_at(text, pos) {
            Some(caps) => caps,
            None => break,
        };
        let m = caps.get(0).expect("match group 0");
        match f(&caps) {
            Some(replacement) => {
                out.push_str(&text[pos..m.start()]);
                out.push_str(&replacement);
                // Our patterns never match empty, but guard anyway.
                pos = m.end().max(m.start() + 1);
            }
            None => {
                let resume = (m.start() + 1).min(text.len());
                out.push_str(&text[pos..resume]);
                pos = resume;
            }
        }
    }
    out.push_str(&text[pos.min(text.len())..]);
    out
}

/// First identifier segment of a (possibly dotted, possibly array-suffixed)
/// type text.
pub(crate) fn first_type_word(type_text: &str) -> &str {
    let end = type_text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(type_text.len());
    &type_text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_spaces_round_trips() {
        let t = trim_spaces("  x + 1 \n");
        assert_eq!(t.left, "  ");
        assert_eq!(t.middle, "x + 1");
        assert_eq!(t.right, " \n");
        assert_eq!(t.untrim("y"), "  y \n");
    }

    #[test]
    fn trim_spaces_all_whitespace() {
        let t = trim_spaces("   ");
        assert_eq!(t.left, "   ");
        assert_eq!(t.middle, "");
        assert_eq!(t.right, "");
    }

    #[test]
    fn rewrite_filtered_resumes_inside_rejections() {
        let re = Regex::new(r"[a-z]b").unwrap();
        // Reject the first match ("ab"); the scan must still find "cb"
        // starting inside the rejected span's tail.
        let out = rewrite_filtered(&re, "abcb", |caps| {
            if &caps[0] == "ab" {
                None
            } else {
                Some("X".to_string())
            }
        });
        assert_eq!(out, "abX");
    }

    #[test]
    fn first_type_word_stops_at_dots() {
        assert_eq!(first_type_word("java.util.List"), "java");
        assert_eq!(first_type_word("int"), "int");
    }
}
