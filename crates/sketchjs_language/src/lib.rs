//! # sketchjs-language
//!
//! The front end of the Processing-to-JavaScript translator.
//!
//! This crate turns a source document in the Processing dialect (a Java-like
//! language) into a lightweight AST plus a class registry carrying the
//! metadata the renderer needs (inheritance links, emission weights, member
//! tables).
//!
//! ## Architecture
//!
//! The pipeline consists of several stages, each consuming the previous
//! stage's output and an append-only atom table:
//!
//! 1. **Scrubbing** ([`lexer`]) — elides string/char/regex literals and
//!    comments into the string table, escapes `$` identifiers, erases
//!    generic type parameters, and masks every balanced bracket group as an
//!    indexed atom.
//! 2. **Extraction** ([`parser`]) — pattern-matches class, interface,
//!    method, constructor, and function headers over the atomized text and
//!    replaces each with a typed atom of its own.
//! 3. **Transformation** ([`parser`]) — lowers statements and expressions
//!    into AST nodes ([`ast`]), rewriting Java-isms (array creation, casts,
//!    `instanceof`, `super`/`this` calls, overloaded library methods) into
//!    their JavaScript emulations along the way.
//! 4. **Analysis** ([`analysis`]) — resolves base classes and interfaces
//!    through nested scopes and computes dependency weights so that base
//!    types emit before derived ones.
//!
//! All mutable state lives in a per-invocation [`TransformSession`]; there
//! are no process-global registries, so concurrent translations are
//! independent.
//!
//! ## Example
//!
//! ```
//! use sketchjs_language::ast::Statement;
//! use sketchjs_language::{lexer, parser::Transformer, TransformSession};
//!
//! let mut session = TransformSession::new();
//! let scrubbed = lexer::scrub("int x = 5;", &mut session.strings);
//! lexer::atomize(&scrubbed, &mut session.atoms).unwrap();
//! let root = Transformer::new(&mut session).transform_main();
//! assert!(root
//!     .statements
//!     .iter()
//!     .any(|s| matches!(s, Statement::Var(_))));
//! ```

pub mod analysis;
pub mod ast;
pub mod builtins;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod session;

pub use registry::{ClassId, ClassRecord, ClassRegistry};
pub use session::{DefaultScope, LibraryExports, TransformSession, TranslateOptions};

// Re-export base types for consumers that only depend on this crate.
pub use sketchjs_base::{AtomKind, AtomTable, Result, Span, SpannedError, StringTable};
