//! # sketchjs-base
//!
//! Pure structural atoms for the sketchjs translator.
//!
//! This crate provides the foundational types used throughout sketchjs:
//!
//! - [`AtomTable`] — The append-only table of masked source fragments
//! - [`StringTable`] — Elided string/char/regex literals and their reinjection
//! - [`Span`] — Source location tracking
//! - [`SpannedError`]/[`Result`] — Errors with source positions
//! - [`escape`] — The `__xHHHH` identifier escape and its reversal
//!
//! # Design Principles
//!
//! This crate has **no knowledge of the Processing dialect or of JavaScript**.
//! It provides only generic, reusable infrastructure that the front end and
//! the renderer build upon.
//!
//! # Example
//!
//! ```
//! use sketchjs_base::{AtomTable, AtomKind, StringTable};
//!
//! let mut atoms = AtomTable::new();
//! let marker = atoms.add(AtomKind::Paren, "(x + 1)".to_string());
//! assert_eq!(marker, "\"B1\"");
//! assert_eq!(atoms.resolve(1), "(x + 1)");
//!
//! let mut strings = StringTable::new();
//! assert_eq!(strings.add("\"hello\"".to_string()), "'0'");
//! ```

pub mod atoms;
pub mod error;
pub mod escape;
pub mod span;
pub mod strings;

pub use atoms::{Atom, AtomKind, AtomTable};
pub use error::{Result, SpannedError};
pub use span::Span;
pub use strings::StringTable;
