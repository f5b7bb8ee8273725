//! E2E: class and interface emission.

mod common;
use common::{assert_emits, js};
use pretty_assertions::assert_eq;

#[test]
fn fields_assign_through_the_self_pointer() {
    assert_emits("class A { int x = 5; }", "$this_1.x = 5");
}

#[test]
fn classes_publish_onto_the_host() {
    let output = js("class A { }");
    assert!(output.contains("var A = (function() {"), "{output}");
    assert!(output.contains("$p.A = A;"), "{output}");
    assert!(output.contains("return A;"), "{output}");
}

#[test]
fn constructor_overloads_dispatch_on_arity() {
    let output = js("class A { A() { } A(int x) { } }");
    assert!(output.contains("function $constr_0()"), "{output}");
    assert!(output.contains("function $constr_1(x)"), "{output}");
    assert!(
        output.contains("if(arguments.length === 0) { $constr_0.apply($this_1, arguments); }"),
        "{output}"
    );
    assert!(
        output.contains("else if(arguments.length === 1) { $constr_1.apply($this_1, arguments); }"),
        "{output}"
    );
    assert!(output.contains("else $superCstr();"), "{output}");
    assert!(output.contains("$constr.apply(null, arguments);"), "{output}");
}

#[test]
fn varargs_constructors_dispatch_with_at_least() {
    let output = js("class A { A(int... xs) { } }");
    assert!(output.contains("if(arguments.length >= 0)"), "{output}");
    assert!(
        output.contains("var xs = Array.prototype.slice.call(arguments, 0);"),
        "{output}"
    );
}

#[test]
fn explicit_super_call_suppresses_the_implicit_one() {
    let output = js("class A { }\nclass B extends A { B() { super(); } }");
    assert!(output.contains("B.$base = A;"), "{output}");
    assert!(output.contains("$superCstr()"), "{output}");
    assert!(output.contains("$p.extendStaticMembers(B, A);"), "{output}");
    // exactly one $superCstr() call inside $constr_0: the explicit one
    let constr = output
        .split("function $constr_0()")
        .nth(1)
        .expect("constructor body");
    let body_end = constr.find("function $constr()").expect("dispatcher");
    assert_eq!(constr[..body_end].matches("$superCstr()").count(), 1);
}

#[test]
fn constructors_without_super_get_one_prepended() {
    let output = js("class A { A() { int y = 1; } }");
    let constr = output
        .split("function $constr_0()")
        .nth(1)
        .expect("constructor body");
    assert!(constr.trim_start().starts_with("{\n$superCstr();"), "{output}");
}

#[test]
fn base_classes_emit_before_derived_ones() {
    let output = js("class C extends B { }\nclass B extends A { }\nclass A { }");
    let a = output.find("var A = ").expect("A");
    let b = output.find("var B = ").expect("B");
    let c = output.find("var C = ").expect("C");
    assert!(a < b && b < c, "emission order wrong:\n{output}");
}

#[test]
fn baseless_classes_extend_the_chain_directly() {
    let output = js("class A { }");
    assert!(
        output.contains("function $superCstr(){$p.extendClassChain($this_1)}"),
        "{output}"
    );
}

#[test]
fn based_classes_upcast_through_super() {
    let output = js("class A { }\nclass B extends A { }");
    assert!(output.contains("var $super = { $upcast: $this_1 };"), "{output}");
    assert!(
        output.contains("function $superCstr(){A.apply($super,arguments);"),
        "{output}"
    );
}

#[test]
fn method_overloads_get_distinct_ids() {
    let output = js("class A { void f() { } void f(int a) { } void f(float a) { } }");
    // the first overload keeps the bare arity id; later ones count up
    assert!(output.contains("function f$0()"), "{output}");
    assert!(output.contains("function f$1_2(a)"), "{output}");
    assert!(output.contains("function f$1_3(a)"), "{output}");
    assert!(
        output.contains("$p.addMethod($this_1, 'f', f$0, false);"),
        "{output}"
    );
    assert!(
        output.contains("$p.addMethod($this_1, 'f', f$1_2, false);"),
        "{output}"
    );
}

#[test]
fn static_members_live_on_the_class() {
    let output = js(
        "class Counter { static int count = 0; static void bump() { } void use() { bump(); } }",
    );
    assert!(output.contains("Counter.count = 0;"), "{output}");
    assert!(
        output.contains("$p.defineProperty($this_1, 'count', {get: function(){return Counter.count}"),
        "{output}"
    );
    assert!(
        output.contains("$p.addMethod(Counter, 'bump', bump$0, false);"),
        "{output}"
    );
    // a static method referenced from instance code resolves to the class
    assert!(output.contains("Counter.bump()"), "{output}");
}

#[test]
fn instance_members_resolve_through_this() {
    let output = js("class A { int x; void set(int v) { this.x = v; this.go(); x++; } void go() { } }");
    assert!(output.contains("$this_1.x = v"), "{output}");
    assert!(output.contains("$this_1.$self.go()"), "{output}");
    assert!(output.contains("$this_1.x++"), "{output}");
}

#[test]
fn inner_classes_get_deeper_self_pointers() {
    let output = js("class Outer { class Inner { int q = 1; } }");
    assert!(output.contains("$this_1.Inner = (function() {"), "{output}");
    assert!(output.contains("var $this_2 = this;"), "{output}");
    assert!(output.contains("$this_2.q = 1"), "{output}");
}

#[test]
fn static_inner_classes_publish_on_both() {
    let output = js("class Outer { static class Tool { } }");
    assert!(output.contains("Outer.Tool = (function() {"), "{output}");
    assert!(output.contains("$this_1.Tool = Outer.Tool;"), "{output}");
}

#[test]
fn interfaces_emit_stubs_and_metadata() {
    let output = js("interface Shape { int LAYERS = 3; void draw(); }");
    assert!(
        output.contains("function Shape() { throw \"Unable to create the interface\"; }"),
        "{output}"
    );
    assert!(output.contains("Shape.$isInterface = true;"), "{output}");
    assert!(output.contains("Shape.$methods = ['draw'];"), "{output}");
    assert!(output.contains("Shape.LAYERS = 3;"), "{output}");
}

#[test]
fn implementors_link_their_interfaces() {
    let output = js("interface Shape { void draw(); }\nclass Circle implements Shape { void draw() { } }");
    assert!(output.contains("Circle.$interfaces = [Shape];"), "{output}");
    assert!(
        output.contains("$p.extendInterfaceMembers(Circle, Shape);"),
        "{output}"
    );
    let shape = output.find("var Shape = ").expect("Shape");
    let circle = output.find("var Circle = ").expect("Circle");
    assert!(shape < circle, "interface must emit first:\n{output}");
}

#[test]
fn unknown_bases_keep_their_textual_name() {
    let output = js("class A extends Mystery { }");
    assert!(output.contains("A.$base = Mystery;"), "{output}");
    assert!(!output.contains("extendStaticMembers"), "{output}");
}

#[test]
fn anonymous_classes_get_synthetic_names() {
    let output = js("Runnable r = new Runnable() { void run() { } };");
    assert!(output.contains("var r = new ((function() {"), "{output}");
    assert!(output.contains("function Runnable$class1() {"), "{output}");
    assert!(output.contains("$p.addMethod($this_1, 'run', run$0, false);"), "{output}");
}

#[test]
fn field_initializers_see_other_members() {
    let output = js("class A { int base = 10; int twice = base * 2; }");
    assert!(output.contains("$this_1.twice = $this_1.base * 2"), "{output}");
}

#[test]
fn inherited_fields_resolve_in_subclasses() {
    let output = js("class A { int x; }\nclass B extends A { void touch() { x = 1; } }");
    assert!(output.contains("$this_1.x = 1"), "{output}");
}
