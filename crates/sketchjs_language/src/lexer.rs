//! Source scrubbing: literal elision, identifier escaping, generics erasure,
//! and bracket atomization.
//!
//! The scrubber operates in stages, each producing plain text for the next:
//!
//! 1. **Line endings** are normalized to `\n`.
//! 2. **Literals and comments** are elided in a single linear scan. Strings,
//!    characters, and regexes move to the string table and leave `'N'`
//!    placeholders; comments collapse to a space, or to a newline when they
//!    spanned one, so statement separation survives.
//! 3. **`$` identifiers** are escaped (see [`sketchjs_base::escape`]) and a
//!    newline directly after `return` is folded away so the emitted code
//!    cannot fall prey to automatic semicolon insertion.
//! 4. **Generic type parameters** are erased to a fixed point.
//! 5. **Bracket groups** are masked bottom-up into the atom table, leaving a
//!    flat token stream in which every `{...}`, `(...)`, `[...]` is a quoted
//!    marker.
//!
//! Stage 5 is the only stage that can fail: a closing bracket with no open
//! group, or an open group never closed, reports "unbalanced brackets" with
//! the byte offset.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sketchjs_base::{escape, AtomKind, AtomTable, Result, SpannedError, StringTable};

/// Characters that put a following `/` into regex position.
const REGEX_CONTEXT: &[char] = &['[', '(', '=', '|', '&', '!', '^', ':', '?'];

static RETURN_NEWLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\breturn\s*\n").expect("valid regex"));

static GENERICS_RE: Lazy<Regex> = Lazy::new(|| {
    let dotted = r"[A-Za-z_$][0-9A-Za-z_$]*\b(?:\s*\.\s*[A-Za-z_$][0-9A-Za-z_$]*\b)*";
    let type_arg = format!(r"(?:\?|{dotted}(?:\[\])*)(?:\s+(?:extends|super)\s+{dotted})?");
    Regex::new(&format!(r"(<?)<\s*({type_arg}(?:\s*,\s*{type_arg})*)\s*>(=?)"))
        .expect("valid regex")
});

/// Runs stages 1-4: everything up to (but not including) atomization.
pub fn scrub(source: &str, strings: &mut StringTable) -> String {
    let normalized = normalize_line_endings(source);
    let elided = elide_literals(&normalized, strings);
    let escaped = escape::protect(&elided);
    let unfolded = fix_return_newlines(&escaped);
    strip_generics(&unfolded)
}

/// Normalizes `\r\n`, `\n\r`, and stray `\r` to `\n`.
pub fn normalize_line_endings(source: &str) -> String {
    source
        .replace("\r\n", "\n")
        .replace("\n\r", "\n")
        .replace('\r', "\n")
}

/// Elides string, character, and regex literals plus comments.
///
/// Recognition order at each position: double-quoted string, single-quoted
/// character/string, `//` line comment, `/* */` block comment, then a regex
/// when a disambiguating context character precedes the `/`. Anything that
/// fails to close (an unterminated literal or comment) passes through raw.
pub fn elide_literals(source: &str, strings: &mut StringTable) -> String {
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut run_start = 0;
    let mut i = 0;
    // Byte scanning is UTF-8 safe here: every structural byte is ASCII, and
    // plain text is copied over as whole slices.
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'') => match scan_quoted(bytes, i, quote) {
                Some(end) => {
                    out.push_str(&source[run_start..i]);
                    let placeholder = strings.add(source[i..end].to_string());
                    out.push_str(&placeholder);
                    i = end;
                    run_start = i;
                }
                None => i += 1,
            },
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                out.push_str(&source[run_start..i]);
                match source[i..].find('\n') {
                    Some(offset) => {
                        // The match swallows the newline, so give one back.
                        out.push('\n');
                        i += offset + 1;
                    }
                    None => {
                        // Unterminated at EOF: leave it.
                        out.push_str(&source[i..]);
                        i = bytes.len();
                    }
                }
                run_start = i;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&source[run_start..i]);
                match source[i + 2..].find("*/") {
                    Some(offset) => {
                        let end = i + 2 + offset + 2;
                        if source[i..end].contains('\n') {
                            out.push('\n');
                        } else {
                            out.push(' ');
                        }
                        i = end;
                    }
                    None => {
                        out.push_str(&source[i..]);
                        i = bytes.len();
                    }
                }
                run_start = i;
            }
            b'/' => {
                let pending = &source[run_start..i];
                if in_regex_position(&out, pending) {
                    if let Some(end) = scan_regex(bytes, i) {
                        out.push_str(pending);
                        let placeholder = strings.add(source[i..end].to_string());
                        out.push_str(&placeholder);
                        i = end;
                        run_start = i;
                        continue;
                    }
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    out.push_str(&source[run_start..]);
    out
}

/// `true` when the last non-whitespace character before the `/` allows a
/// regex literal. `pending` is the text scanned since the last flush.
fn in_regex_position(out: &str, pending: &str) -> bool {
    pending
        .chars()
        .rev()
        .chain(out.chars().rev())
        .find(|c| !c.is_whitespace())
        .is_some_and(|c| REGEX_CONTEXT.contains(&c))
}

/// Scans a quoted literal starting at `start`; returns the end offset past
/// the closing quote, or `None` when the literal never closes on this line.
fn scan_quoted(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Scans a regex literal (body plus `gim` flags) starting at the `/`.
fn scan_regex(bytes: &[u8], start: usize) -> Option<usize> {
    // `//` and `/*` were handled before this is called.
    let mut i = start + 1;
    loop {
        match bytes.get(i)? {
            b'\\' => i += 2,
            b'\n' => return None,
            b'/' => {
                i += 1;
                while matches!(bytes.get(i), Some(b'g' | b'i' | b'm')) {
                    i += 1;
                }
                return Some(i);
            }
            _ => i += 1,
        }
    }
}

/// Folds a newline straight after `return` into a space.
pub fn fix_return_newlines(source: &str) -> String {
    RETURN_NEWLINE_RE.replace_all(source, "return ").into_owned()
}

/// Erases `<...>` type parameter lists to a fixed point.
///
/// A list flanked by `<` on the left or `=` on the right is left alone so
/// shifts and comparisons survive. Nested lists unlock outer ones, hence the
/// iteration.
pub fn strip_generics(source: &str) -> String {
    let mut code = source.to_string();
    loop {
        let mut changed = false;
        let pass = GENERICS_RE.replace_all(&code, |caps: &Captures<'_>| {
            if &caps[1] == "<" || &caps[3] == "=" {
                return caps[0].to_string();
            }
            changed = true;
            String::new()
        });
        if !changed {
            return code;
        }
        code = pass.into_owned();
    }
}

/// Masks every balanced bracket group as an atom, leaving markers behind.
///
/// The bracket-free remainder lands in atom slot `0`. The kind letter comes
/// from the closing bracket, so a mismatched pair still atomizes; only a
/// closer with no open group, or a group still open at EOF, is fatal.
pub fn atomize(code: &str, atoms: &mut AtomTable) -> Result<()> {
    let mut stack: Vec<(String, usize)> = Vec::new();
    let mut current = String::new();
    for (offset, ch) in code.char_indices() {
        match ch {
            '{' | '[' | '(' => {
                stack.push((std::mem::take(&mut current), offset));
                current.push(ch);
            }
            '}' | ']' | ')' => {
                let kind = match ch {
                    '}' => AtomKind::Brace,
                    ')' => AtomKind::Paren,
                    _ => AtomKind::Bracket,
                };
                let (enclosing, _) = stack.pop().ok_or_else(|| {
                    SpannedError::at("unbalanced brackets", offset)
                })?;
                current.push(ch);
                let marker = atoms.add(kind, std::mem::take(&mut current));
                current = enclosing;
                current.push_str(&marker);
            }
            other => current.push(other),
        }
    }
    if let Some((_, offset)) = stack.last() {
        return Err(SpannedError::at("unbalanced brackets", *offset));
    }
    atoms.set_root(current);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_endings_normalize() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n\rd"), "a\nb\nc\nd");
    }

    #[test]
    fn strings_and_chars_are_elided() {
        let mut strings = StringTable::new();
        let out = elide_literals("print(\"a // b\"); char c = 'x';", &mut strings);
        assert_eq!(out, "print('0'); char c = '1';");
        assert_eq!(strings.get(0), Some("\"a // b\""));
        assert_eq!(strings.get(1), Some("'x'"));
    }

    #[test]
    fn line_comment_becomes_newline() {
        let mut strings = StringTable::new();
        let out = elide_literals("a = 1; // note\nb = 2;", &mut strings);
        assert_eq!(out, "a = 1; \nb = 2;");
    }

    #[test]
    fn block_comment_keeps_line_structure() {
        let mut strings = StringTable::new();
        assert_eq!(elide_literals("a /* x */ b", &mut strings), "a   b");
        assert_eq!(elide_literals("a /* x\ny */ b", &mut strings), "a \n b");
    }

    #[test]
    fn regex_requires_context() {
        let mut strings = StringTable::new();
        let out = elide_literals("m = /ab+c/g; q = x / y;", &mut strings);
        assert_eq!(out, "m = '0'; q = x / y;");
        assert_eq!(strings.get(0), Some("/ab+c/g"));
    }

    #[test]
    fn escaped_quote_stays_inside_string() {
        let mut strings = StringTable::new();
        let out = elide_literals(r#"s = "a\"b";"#, &mut strings);
        assert_eq!(out, "s = '0';");
        assert_eq!(strings.get(0), Some(r#""a\"b""#));
    }

    #[test]
    fn return_newline_folds() {
        assert_eq!(fix_return_newlines("return\n  x;"), "return   x;");
        assert_eq!(fix_return_newlines("return x;"), "return x;");
    }

    #[test]
    fn generics_erase_to_fixed_point() {
        assert_eq!(strip_generics("HashMap<String, ArrayList<Integer>> m"), "HashMap m");
        assert_eq!(strip_generics("ArrayList<int[]> a"), "ArrayList a");
        assert_eq!(strip_generics("List<? extends Shape> l"), "List l");
    }

    #[test]
    fn shifts_and_comparisons_survive() {
        assert_eq!(strip_generics("a << b"), "a << b");
        assert_eq!(strip_generics("if (a <b> c) {}"), "if (a  c) {}");
        let idempotent = strip_generics("x <<= 2");
        assert_eq!(idempotent, "x <<= 2");
    }

    #[test]
    fn stripping_is_idempotent() {
        let once = strip_generics("Map<K, V<T>> m");
        assert_eq!(strip_generics(&once), once);
    }

    #[test]
    fn atomize_masks_nested_groups() {
        let mut atoms = AtomTable::new();
        atomize("f(a[0]) { g(); }", &mut atoms).unwrap();
        assert_eq!(atoms.resolve(1), "[0]");
        assert_eq!(atoms.resolve(2), "(a\"C1\")");
        assert_eq!(atoms.resolve(3), "()");
        assert_eq!(atoms.resolve(4), "{ g\"B3\"; }");
        assert_eq!(atoms.root(), "f\"B2\" \"A4\"");
    }

    #[test]
    fn unbalanced_close_is_fatal() {
        let mut atoms = AtomTable::new();
        let err = atomize("a)", &mut atoms).unwrap_err();
        assert!(err.to_string().contains("unbalanced brackets"));
        assert_eq!(err.span.start, 1);
    }

    #[test]
    fn unclosed_open_is_fatal() {
        let mut atoms = AtomTable::new();
        let err = atomize("f(a", &mut atoms).unwrap_err();
        assert_eq!(err.span.start, 1);
    }
}
