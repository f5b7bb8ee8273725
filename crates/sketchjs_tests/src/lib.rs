//! Integration test suite for the sketchjs translator.
//!
//! This crate exists only to run the end-to-end tests in `tests/`; all
//! actual test code lives in `tests/e2e_*.rs` files, with shared helpers in
//! `tests/common/mod.rs`.
//!
//! # Test Organization
//!
//! | File | Covers |
//! |------|--------|
//! | `e2e_statements` | statement scanning, loops, switch, imports |
//! | `e2e_expressions` | the Java-ism rewrites and literal fidelity |
//! | `e2e_classes` | class/interface emission, overloads, constructors |
//! | `e2e_resolution` | identifier resolution and host options |
//! | `e2e_properties` | cross-cutting guarantees (idempotence, escaping) |
