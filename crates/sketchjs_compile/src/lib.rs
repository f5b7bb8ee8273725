//! # sketchjs-compile
//!
//! The back end of the Processing-to-JavaScript translator: renders the
//! front end's AST to JavaScript and provides the public entry points.
//!
//! ## Entry points
//!
//! | Function | Use case |
//! |----------|----------|
//! | [`translate`] | One sketch, default options |
//! | [`translate_with_options`] | One sketch, host-configured scope |
//!
//! ## Pipeline
//!
//! ```text
//! source ──scrub──▶ atoms ──transform──▶ AST ──analyze──▶ weights
//!                                                           │
//!        output ◀──reinject literals ◀──unescape ◀──render──┘
//! ```
//!
//! Each call builds a private [`TransformSession`]; nothing is shared
//! between invocations, so translations may run concurrently.
//!
//! ## Example
//!
//! ```
//! let js = sketchjs_compile::translate("int x = 5;").unwrap();
//! assert!(js.contains("var x = 5"));
//! assert!(js.starts_with("// this code was autogenerated from PDE"));
//! ```
//!
//! The emitted text is a single closure the host evaluates, passing its
//! runtime object in as `$p`:
//!
//! ```text
//! // this code was autogenerated from PDE
//! (function($p) {
//!   ...classes, heaviest first...
//!   ...sketch statements...
//! })
//! ```

pub mod codegen;

use once_cell::sync::Lazy;
use regex::Regex;

use sketchjs_base::{escape, Result};
use sketchjs_language::parser::Transformer;
use sketchjs_language::{analysis, lexer, TransformSession};

pub use codegen::Emitter;
pub use sketchjs_language::{DefaultScope, LibraryExports, TranslateOptions};

static BLANK_LINE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*\n(?:[ \t]*\n)+").expect("valid regex"));

/// Translates one Processing-dialect source document with default options.
pub fn translate(source: &str) -> Result<String> {
    translate_with_options(source, &TranslateOptions::default())
}

/// Translates one source document.
///
/// The only error condition is unbalanced brackets in the input; every
/// other construct passes through best-effort.
pub fn translate_with_options(source: &str, options: &TranslateOptions) -> Result<String> {
    let mut session = TransformSession::new();

    let scrubbed = lexer::scrub(source, &mut session.strings);
    lexer::atomize(&scrubbed, &mut session.atoms)?;

    let root = Transformer::new(&mut session).transform_main();
    analysis::resolve_inheritance(&mut session.classes);
    analysis::compute_weights(&mut session.classes);

    let rendered = Emitter::new(&session.classes, options).render(&root);
    let compact = collapse_blank_lines(&rendered);
    let restored = escape::restore(&compact);
    Ok(session.strings.reinject(&restored))
}

/// Collapses runs of blank lines left by declaration extraction down to a
/// single blank line.
fn collapse_blank_lines(code: &str) -> String {
    BLANK_LINE_RUN_RE.replace_all(code, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_lines_collapse() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n  \n\t\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }

    #[test]
    fn output_shape_is_a_host_closure() {
        let js = translate("background(0);").unwrap();
        assert!(js.starts_with("// this code was autogenerated from PDE\n(function($p) {"));
        assert!(js.ends_with("})"));
        assert!(js.contains("$p.background(0);"));
    }

    #[test]
    fn unbalanced_brackets_error() {
        let err = translate("void draw() { fill(0); ").unwrap_err();
        assert!(err.to_string().contains("unbalanced brackets"));
    }
}
