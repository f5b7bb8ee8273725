//! The `__xHHHH` identifier escape and its reversal.
//!
//! The renderer introduces synthetic identifiers built around `$` (`$p`,
//! `$this_1`, `$superCstr`, ...). To keep them distinguishable from user
//! identifiers, every `$` in the incoming source is rewritten to the escape
//! `__x0024` before any other pattern runs, and the escape is reversed as the
//! last step before literal reinjection.
//!
//! Sources may themselves contain text that looks like an escape, so the
//! escape marker is escaped first: `__xHHHH` becomes `__x005F_xHHHH`
//! (`0x5F` is `_`). Reversal is a single left-to-right pass, which unwinds
//! both layers: `__x005F_x0041` reads back as `__x0041`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ESCAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__x([0-9A-F]{4})").expect("valid regex"));

/// Protects pre-existing escapes, then rewrites `$` to `__x0024`.
pub fn protect(source: &str) -> String {
    let guarded = ESCAPE_RE.replace_all(source, "__x005F_x$1");
    guarded.replace('$', "__x0024")
}

/// Reverses [`protect`]: each `__xHHHH` becomes the character `U+HHHH`.
///
/// Synthetic `$`-identifiers introduced after protection contain no escape
/// sequences, so they pass through untouched.
pub fn restore(code: &str) -> String {
    ESCAPE_RE
        .replace_all(code, |caps: &Captures<'_>| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_round_trips() {
        let source = "int foo$bar = $baz;";
        let protected = protect(source);
        assert!(!protected.contains('$'));
        assert_eq!(restore(&protected), source);
    }

    #[test]
    fn existing_escape_round_trips() {
        let source = "int __x0041 = 1;";
        let protected = protect(source);
        assert_eq!(protected, "int __x005F_x0041 = 1;");
        assert_eq!(restore(&protected), source);
    }

    #[test]
    fn synthetic_identifiers_survive_restore() {
        let code = "$p.extendClassChain($this_1);";
        assert_eq!(restore(code), code);
    }
}
