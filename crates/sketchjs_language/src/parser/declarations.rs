//! Declaration extraction: classes, methods, constructors, functions, fields.
//!
//! Over an atomized body text, each declaration form is recognized by a
//! pattern over identifiers and atom markers (a method is `type name "B.."`
//! followed by a `"A.."` body or `;`, a class is `class name .. "A.."`, and
//! so on). Each hit is cut out into an atom of the matching kind and leaves
//! its marker behind, so by the time the statement scanner runs, whole
//! declarations are single tokens.
//!
//! A type position that turns out to be a keyword (`return foo()`,
//! `new Foo()`) vetoes the match; see
//! [`rewrite_filtered`](super::rewrite_filtered) for how the veto resumes
//! scanning.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{first_type_word, rewrite_filtered, Transformer, DOTTED, IDENT};
use sketchjs_base::AtomKind;

/// Keywords that can never open a method/field type.
const TYPE_VETO_METHOD: &[&str] = &[
    "else", "new", "return", "throw", "function", "public", "private", "protected",
];
const TYPE_VETO_FIELD: &[&str] = &["else", "new", "return", "throw"];

static CLASSES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b((?:(?:public|private|final|protected|static|abstract)\s+)*)(class|interface)\s+({IDENT})(\s+extends\s+{DOTTED}(?:\s*,\s*{DOTTED})*)?(\s+implements\s+{DOTTED}(?:\s*,\s*{DOTTED})*)?\s*"A(\d+)""#
    ))
    .expect("valid regex")
});

static METHODS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\b((?:(?:public|private|final|protected|static|abstract|synchronized)\s+)*)({DOTTED}(?:\s*"C\d+")*)\s*({IDENT})\s*"B(\d+)"(\s*throws\s+{DOTTED}(?:\s*,\s*{DOTTED})*)?\s*("A\d+"|;)"#
    ))
    .expect("valid regex")
});

static FUNCTIONS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"\bfunction(?:\s+({IDENT}))?\s*"B(\d+)"\s*"A(\d+)""#
    ))
    .expect("valid regex")
});

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"^((?:(?:public|private|final|protected|static)\s+)*)({DOTTED}(?:\s*"C\d+")*)\s*({IDENT})\s*(?:"C\d+"\s*)*([=,]|$)"#
    ))
    .expect("valid regex")
});

static BODY_INDEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""A(\d+)""#).expect("valid regex"));

/// Extracts class/interface, method, and function declarations, in that
/// order, replacing each with its atom marker.
pub(crate) fn extract_classes_and_methods(t: &mut Transformer<'_>, code: &str) -> String {
    let classes_done = CLASSES_RE
        .replace_all(code, |caps: &Captures<'_>| {
            t.sess.atoms.add(AtomKind::Class, caps[0].to_string())
        })
        .into_owned();
    let methods_done = rewrite_filtered(&METHODS_RE, &classes_done, |caps| {
        if TYPE_VETO_METHOD.contains(&first_type_word(&caps[2])) {
            return None;
        }
        Some(t.sess.atoms.add(AtomKind::Method, caps[0].to_string()))
    });
    FUNCTIONS_RE
        .replace_all(&methods_done, |caps: &Captures<'_>| {
            t.sess.atoms.add(AtomKind::Function, caps[0].to_string())
        })
        .into_owned()
}

/// Extracts constructors: the class's own name in call position with a body.
/// Only meaningful inside a class body whose name is known.
pub(crate) fn extract_constructors(
    t: &mut Transformer<'_>,
    code: &str,
    class_name: &str,
) -> String {
    let re = constructor_re(class_name);
    re.replace_all(code, |caps: &Captures<'_>| {
        t.sess.atoms.add(AtomKind::Constructor, caps[0].to_string())
    })
    .into_owned()
}

fn constructor_re(class_name: &str) -> Regex {
    let name = regex::escape(class_name);
    Regex::new(&format!(
        r#"\b((?:(?:public|private|final|protected|static|abstract)\s+)*)(?:{name})\s*"B(\d+)"(\s*throws\s+{DOTTED}(?:\s*,\s*{DOTTED})*)?\s*"A(\d+)""#
    ))
    .expect("valid regex")
}

/// A parsed class/interface header.
pub(crate) struct ClassHeader {
    pub is_interface: bool,
    pub is_static: bool,
    pub name: String,
    /// Dotted names from the `extends` clause, in order.
    pub extends: Vec<String>,
    /// Dotted names from the `implements` clause, in order.
    pub implements: Vec<String>,
    pub body_atom: usize,
}

pub(crate) fn parse_class_header(atom_text: &str) -> Option<ClassHeader> {
    let caps = CLASSES_RE.captures(atom_text)?;
    Some(ClassHeader {
        is_interface: &caps[2] == "interface",
        is_static: caps[1].contains("static"),
        name: caps[3].to_string(),
        extends: split_name_clause(caps.get(4).map_or("", |m| m.as_str()), "extends"),
        implements: split_name_clause(caps.get(5).map_or("", |m| m.as_str()), "implements"),
        body_atom: caps[6].parse().ok()?,
    })
}

/// `" extends A, B.C"` → `["A", "B.C"]`, whitespace collapsed out of dots.
fn split_name_clause(clause: &str, keyword: &str) -> Vec<String> {
    let trimmed = clause.trim();
    let Some(names) = trimmed.strip_prefix(keyword) else {
        return Vec::new();
    };
    names
        .split(',')
        .map(|name| name.split_whitespace().collect::<String>())
        .filter(|name| !name.is_empty())
        .collect()
}

/// A parsed method header.
pub(crate) struct MethodHeader {
    pub is_static: bool,
    pub name: String,
    pub params_atom: usize,
    /// `None` for an abstract/interface method that ended in `;`.
    pub body_atom: Option<usize>,
}

pub(crate) fn parse_method(atom_text: &str) -> Option<MethodHeader> {
    let caps = METHODS_RE.captures(atom_text)?;
    let body_atom = BODY_INDEX_RE
        .captures(&caps[6])
        .and_then(|body| body[1].parse().ok());
    Some(MethodHeader {
        is_static: caps[1].contains("static"),
        name: caps[3].to_string(),
        params_atom: caps[4].parse().ok()?,
        body_atom,
    })
}

/// A parsed constructor header.
pub(crate) struct ConstructorHeader {
    pub params_atom: usize,
    pub body_atom: usize,
}

pub(crate) fn parse_constructor(atom_text: &str, class_name: &str) -> Option<ConstructorHeader> {
    let caps = constructor_re(class_name).captures(atom_text)?;
    Some(ConstructorHeader {
        params_atom: caps[2].parse().ok()?,
        body_atom: caps[4].parse().ok()?,
    })
}

/// A parsed `function` literal or declaration.
pub(crate) struct FunctionHeader {
    pub name: Option<String>,
    pub params_atom: usize,
    pub body_atom: usize,
}

pub(crate) fn parse_function(atom_text: &str) -> Option<FunctionHeader> {
    let caps = FUNCTIONS_RE.captures(atom_text)?;
    Some(FunctionHeader {
        name: caps.get(1).map(|m| m.as_str().to_string()),
        params_atom: caps[2].parse().ok()?,
        body_atom: caps[3].parse().ok()?,
    })
}

/// A statement that parses as a field/variable declaration list.
pub(crate) struct FieldHeader<'a> {
    pub is_static: bool,
    /// Declared type text, array suffix markers included — an array type
    /// must not look like `int` to the default-value lookup.
    pub var_type: String,
    /// The `name [= expr], ..` remainder.
    pub definitions: &'a str,
}

pub(crate) fn parse_field(statement: &str) -> Option<FieldHeader<'_>> {
    let caps = FIELD_RE.captures(statement)?;
    if TYPE_VETO_FIELD.contains(&first_type_word(&caps[2])) {
        return None;
    }
    let type_end = caps.get(2).expect("type group").end();
    let after_type = &statement[type_end..];
    let defs_start = type_end + (after_type.len() - after_type.trim_start().len());
    Some(FieldHeader {
        is_static: caps[1].contains("static"),
        var_type: caps[2].to_string(),
        definitions: &statement[defs_start..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TransformSession;
    use pretty_assertions::assert_eq;

    fn atomized(source: &str, sess: &mut TransformSession) -> String {
        let scrubbed = crate::lexer::scrub(source, &mut sess.strings);
        crate::lexer::atomize(&scrubbed, &mut sess.atoms).unwrap();
        sess.atoms.root().to_string()
    }

    #[test]
    fn classes_become_atoms() {
        let mut sess = TransformSession::new();
        let top = atomized("class Foo extends Bar { int x; } rest();", &mut sess);
        let mut t = Transformer::new(&mut sess);
        let out = extract_classes_and_methods(&mut t, &top);
        assert!(out.contains("\"E"), "expected a class atom in {out:?}");
        assert!(!out.contains("class Foo"));
        assert!(out.contains("rest\"B"));
    }

    #[test]
    fn methods_become_atoms_but_calls_do_not() {
        let mut sess = TransformSession::new();
        let top = atomized("void draw() { background(0); } draw();", &mut sess);
        let mut t = Transformer::new(&mut sess);
        let out = extract_classes_and_methods(&mut t, &top);
        assert!(out.contains("\"D"), "expected a method atom in {out:?}");
        assert!(out.contains("draw\"B"), "the bare call must survive: {out:?}");
    }

    #[test]
    fn return_is_not_a_method_type() {
        let mut sess = TransformSession::new();
        sess.atoms.add(AtomKind::Paren, "(1)".into()); // "B1"
        sess.atoms.add(AtomKind::Brace, "{ }".into()); // "A2"
        let mut t = Transformer::new(&mut sess);
        let out =
            extract_classes_and_methods(&mut t, "return foo\"B1\"; int g\"B1\" \"A2\"");
        assert!(out.contains("return foo\"B1\";"), "{out:?}");
        assert_eq!(out.matches("\"D").count(), 1, "{out:?}");
    }

    #[test]
    fn class_header_parses_clauses() {
        let mut sess = TransformSession::new();
        let top = atomized(
            "public class Foo extends app.Base implements Runnable, Shape { }",
            &mut sess,
        );
        let mut t = Transformer::new(&mut sess);
        let extracted = extract_classes_and_methods(&mut t, &top);
        let marker_index: usize = extracted
            .split("\"E")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .and_then(|digits| digits.parse().ok())
            .unwrap();
        let header = parse_class_header(sess.atoms.resolve(marker_index)).unwrap();
        assert!(!header.is_interface);
        assert_eq!(header.name, "Foo");
        assert_eq!(header.extends, vec!["app.Base".to_string()]);
        assert_eq!(
            header.implements,
            vec!["Runnable".to_string(), "Shape".to_string()]
        );
    }

    #[test]
    fn array_field_types_keep_their_suffix_markers() {
        let mut sess = TransformSession::new();
        let top = atomized("int[] xs = stuff, y;", &mut sess);
        let field = parse_field(top.trim().trim_end_matches(';')).unwrap();
        assert!(field.var_type.starts_with("int"));
        assert!(field.var_type.contains("\"C"), "{}", field.var_type);
        assert!(field.definitions.starts_with("xs"));
    }

    #[test]
    fn field_veto_rejects_keywords() {
        assert!(parse_field("return x").is_none());
        assert!(parse_field("throw err").is_none());
    }

    #[test]
    fn constructor_extraction_matches_only_the_class_name() {
        let mut sess = TransformSession::new();
        let top = atomized("Foo() { } Bar() { }", &mut sess);
        let mut t = Transformer::new(&mut sess);
        let out = extract_constructors(&mut t, &top, "Foo");
        assert!(out.contains("\"G"), "{out:?}");
        assert!(out.contains("Bar\"B"), "{out:?}");
    }
}
