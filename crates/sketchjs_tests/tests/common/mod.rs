//! Shared helpers for the end-to-end suite.

// Not every test binary uses every helper.
#![allow(dead_code)]

/// Translates with default options, panicking on the (only) error case.
pub fn js(source: &str) -> String {
    sketchjs_compile::translate(source).unwrap_or_else(|err| panic!("translate failed: {err}"))
}

/// Asserts `needle` occurs in the translation of `source`.
#[track_caller]
pub fn assert_emits(source: &str, needle: &str) {
    let output = js(source);
    assert!(
        output.contains(needle),
        "expected {needle:?} in output:\n{output}"
    );
}
