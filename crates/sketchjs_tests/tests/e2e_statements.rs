//! E2E: statement scanning, control flow, imports.

mod common;
use common::{assert_emits, js};
use pretty_assertions::assert_eq;

#[test]
fn sketch_level_declaration_becomes_var() {
    assert_emits("int x = 5;", "var x = 5");
}

#[test]
fn declarations_without_initializers_take_defaults() {
    assert_emits("int n;", "var n = 0");
    assert_emits("boolean ok;", "var ok = false");
    assert_emits("color c;", "var c = 0x00000000");
    assert_emits("PImage img;", "var img = null");
}

#[test]
fn multiple_definitions_share_one_var() {
    assert_emits("int a = 1, b = 2;", "var a = 1,b = 2");
}

#[test]
fn imports_disappear() {
    let output = js("import processing.opengl.*;\nbackground(0);");
    assert!(!output.contains("import"), "{output}");
    assert!(output.contains("$p.background(0);"));
}

#[test]
fn if_else_chain_survives() {
    let output = js("if (x > 0) { fill(255); } else { fill(0); }");
    assert!(output.contains("if (x > 0) {"), "{output}");
    assert!(output.contains("else {"), "{output}");
}

#[test]
fn classic_for_loop() {
    let output = js("for (int i = 0; i < 5; i++) { rect(i, 0, 1, 1); }");
    assert!(output.contains("for (var i = 0;"), "{output}");
    assert!(output.contains("i < 5;"), "{output}");
    assert!(output.contains("$p.rect(i, 0, 1, 1);"), "{output}");
}

#[test]
fn for_each_uses_object_iterator() {
    let output = js("for (int i : list) println(i);");
    assert!(output.contains("new $p.ObjectIterator(list)"), "{output}");
    assert!(output.contains(".hasNext() && (("), "{output}");
}

#[test]
fn for_each_iterators_are_numbered() {
    let output = js("for (int a : xs) println(a);\nfor (int b : ys) println(b);");
    assert!(output.contains("$it0"), "{output}");
    assert!(output.contains("$it1"), "{output}");
}

#[test]
fn for_in_enumerates_keys() {
    let output = js("for (String k in table) { println(k); }");
    assert!(output.contains(" in table)"), "{output}");
}

#[test]
fn switch_cases_and_default() {
    let output = js("switch (n) { case 1: fill(0); break; default: fill(255); break; }");
    assert!(output.contains("switch (n)"), "{output}");
    assert!(output.contains("case 1:"), "{output}");
    assert!(output.contains("default:"), "{output}");
}

#[test]
fn try_with_multiple_catches_keeps_one() {
    let output = js("try { risky(); } catch (IOException e) { a(); } catch (Exception e) { b(); }");
    assert_eq!(output.matches("catch").count(), 1, "{output}");
    assert!(output.contains("catch (e)"), "{output}");
}

#[test]
fn return_with_expression() {
    let output = js("int f() { return 7; }");
    assert!(output.contains("return 7;"), "{output}");
}

#[test]
fn labels_pass_through() {
    let output = js("outer: for (int i = 0; i < 3; i++) { break; }");
    assert!(output.contains("outer:"), "{output}");
}

#[test]
fn sketch_functions_register_on_the_host() {
    let output = js("void setup() { size(200, 200); }\nvoid draw() { background(0); }");
    assert!(output.contains("function setup() {"), "{output}");
    assert!(
        output.contains("$p.addMethod($p, 'setup', setup, false);"),
        "{output}"
    );
    assert!(
        output.contains("$p.addMethod($p, 'draw', draw, false);"),
        "{output}"
    );
    assert!(output.contains("$p.size(200, 200);"), "{output}");
}

#[test]
fn varargs_sketch_function_slices_arguments() {
    let output = js("void tally(String tag, int... values) { println(tag); }");
    assert!(
        output.contains("var values = Array.prototype.slice.call(arguments, 1);"),
        "{output}"
    );
    assert!(
        output.contains("$p.addMethod($p, 'tally', tally, true);"),
        "{output}"
    );
}

#[test]
fn function_declarations_stay_functions() {
    let output = js("function helper(a) { return a; }");
    assert!(output.contains("function helper(a) {"), "{output}");
}
