//! E2E: cross-cutting guarantees.

mod common;
use common::js;
use pretty_assertions::assert_eq;

use sketchjs_language::{lexer, StringTable};

#[test]
fn every_literal_reappears_verbatim() {
    let source = r#"
String a = "first // string";
String b = "se\"cond";
char c = 'x';
String[] parts = s.split(/a+b/g);
"#;
    let output = js(source);
    for literal in ["\"first // string\"", "\"se\\\"cond\"", "'x'", "/a+b/g"] {
        assert!(output.contains(literal), "missing {literal:?} in:\n{output}");
    }
}

#[test]
fn protect_restore_is_a_round_trip() {
    use sketchjs_base::escape;
    for source in ["$plain", "__x0041 mixed $x", "no dollars at all", "foo$bar$baz"] {
        assert_eq!(escape::restore(&escape::protect(source)), source);
    }
}

#[test]
fn generics_stripping_is_idempotent() {
    let stripped = lexer::strip_generics("HashMap<String, ArrayList<Float>> m = f(a < b, c > d);");
    assert_eq!(lexer::strip_generics(&stripped), stripped);
}

#[test]
fn dollar_identifiers_round_trip() {
    let output = js("int foo$bar = 3;\nprintln(foo$bar);");
    assert!(output.contains("var foo$bar = 3"), "{output}");
    assert!(output.contains("$p.println(foo$bar);"), "{output}");
}

#[test]
fn escape_sequences_in_source_round_trip() {
    let output = js("int __x0041 = 1;");
    assert!(output.contains("var __x0041 = 1"), "{output}");
}

#[test]
fn synthetic_identifiers_never_collide_with_user_dollars() {
    let output = js("class A { int x$ = 1; }");
    assert!(output.contains("$this_1.x$ = 1"), "{output}");
}

#[test]
fn elision_keeps_statement_separation() {
    let mut strings = StringTable::new();
    let out = lexer::elide_literals("a = 1; /* x\ny */ b = 2; // tail\nc = 3;", &mut strings);
    assert_eq!(out.matches('\n').count(), 2);
}

#[test]
fn constructor_dispatch_is_exhaustive() {
    let output = js("class A { A() { } A(int a) { } A(int a, int b) { } }");
    assert_eq!(output.matches("if(arguments.length").count(), 3, "{output}");
    assert!(output.contains("else $superCstr();"), "{output}");
}

#[test]
fn weight_monotonicity_shows_in_emission_order() {
    let output = js(
        "class D extends C { }\nclass C extends B { }\nclass B extends A { }\nclass A { }",
    );
    let positions: Vec<usize> = ["var A = ", "var B = ", "var C = ", "var D = "]
        .iter()
        .map(|needle| output.find(needle).expect(needle))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{output}");
}

#[test]
fn concurrent_translations_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("class T{i} {{ int v = {i}; }}\nbackground({i});");
                sketchjs_compile::translate(&source).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let output = handle.join().unwrap();
        assert!(output.contains(&format!("$this_1.v = {i}")), "{output}");
        assert!(output.contains(&format!("$p.background({i});")), "{output}");
    }
}

#[test]
fn output_is_reproducible() {
    let source = "class B extends A { }\nclass A { }\nvoid draw() { ellipse(1, 2, 3, 4); }";
    assert_eq!(js(source), js(source));
}
