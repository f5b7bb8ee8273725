//! E2E: identifier resolution and host-supplied scope.

mod common;
use common::js;

use sketchjs_compile::{translate_with_options, LibraryExports, TranslateOptions};

#[test]
fn host_members_route_through_p() {
    let output = js("background(0);\nellipse(mouseX, mouseY, 10, 10);");
    assert!(output.contains("$p.background(0);"), "{output}");
    assert!(output.contains("$p.ellipse($p.mouseX, $p.mouseY, 10, 10);"), "{output}");
}

#[test]
fn locals_shadow_host_members() {
    let output = js("int width = 10;\nrect(0, 0, width, 5);");
    assert!(output.contains("var width = 10"), "{output}");
    assert!(output.contains("$p.rect(0, 0, width, 5);"), "{output}");
}

#[test]
fn method_parameters_shadow_host_members() {
    let output = js("void paint(int fill) { rect(fill, 0, 1, 1); }");
    assert!(output.contains("$p.rect(fill, 0, 1, 1);"), "{output}");
}

#[test]
fn block_locals_shadow_class_fields() {
    let output = js("class A { int x; void f() { int x = 1; x++; } }");
    let body = output.split("function f$0()").nth(1).expect("method body");
    let end = body.find("$p.addMethod").expect("registration");
    assert!(body[..end].contains("x++"), "{output}");
    assert!(!body[..end].contains("$this_1.x++"), "{output}");
}

#[test]
fn unknown_names_stay_untouched() {
    let output = js("mystery(42);");
    assert!(output.contains("mystery(42);"), "{output}");
    assert!(!output.contains("$p.mystery"), "{output}");
}

#[test]
fn member_access_is_never_rewritten() {
    let output = js("thing.width = 5;");
    assert!(output.contains("thing.width = 5"), "{output}");
    assert!(!output.contains("thing.$p"), "{output}");
}

#[test]
fn custom_functions_join_the_global_set() {
    let mut options = TranslateOptions::default();
    options
        .a_functions
        .insert("saveOutput".into(), "function() {}".into());
    let output = translate_with_options("saveOutput();", &options).unwrap();
    assert!(output.contains("$p.saveOutput();"), "{output}");
}

#[test]
fn library_exports_join_the_global_set() {
    let mut options = TranslateOptions::default();
    options.libraries.insert(
        "shapes3d".into(),
        LibraryExports {
            exports: vec!["Ellipsoid".into()],
        },
    );
    let output = translate_with_options("Ellipsoid e = new Ellipsoid();", &options).unwrap();
    assert!(output.contains("new $p.Ellipsoid()"), "{output}");
}

#[test]
fn default_scope_constants_resolve() {
    let mut options = TranslateOptions::default();
    options.default_scope.pconstants.insert("CORNER".into());
    let output = translate_with_options("rectMode(CORNER);", &options).unwrap();
    assert!(output.contains("$p.rectMode($p.CORNER);"), "{output}");
}

#[test]
fn without_options_constants_stay_bare() {
    let output = js("rectMode(CORNER);");
    assert!(output.contains("$p.rectMode(CORNER);"), "{output}");
}

#[test]
fn object_literals_keep_their_this() {
    let output = js("Object o = {ping: function() { return this; }};");
    assert!(output.contains("return this;"), "{output}");
    assert!(!output.contains("return $this"), "{output}");
}
