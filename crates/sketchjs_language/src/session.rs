//! Per-invocation state and the host-facing options record.
//!
//! The reference architecture this translator emulates kept its registries
//! (atom table, string table, class registry, id seeds) in module-level
//! globals. Here they are fields of a [`TransformSession`] that every
//! transformer call threads by `&mut` — one session per `translate()`
//! invocation, so concurrent translations never share state.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::registry::{ClassId, ClassRegistry};
use sketchjs_base::{AtomTable, StringTable};

/// Mutable state for one translation.
#[derive(Debug, Default)]
pub struct TransformSession {
    /// Masked source fragments (brackets, declarations, minted groups).
    pub atoms: AtomTable,
    /// Elided string/char/regex literals.
    pub strings: StringTable,
    /// Every declared class and interface.
    pub classes: ClassRegistry,
    /// The class whose body is currently being transformed; inner and
    /// anonymous classes declared now take it as their scope.
    pub current_class: Option<ClassId>,
}

impl TransformSession {
    pub fn new() -> Self {
        TransformSession {
            atoms: AtomTable::new(),
            strings: StringTable::new(),
            classes: ClassRegistry::new(),
            current_class: None,
        }
    }
}

/// Host-supplied configuration for one translation.
///
/// All three tables only ever *add* names to the resolver's global set; the
/// built-in member list (see [`crate::builtins`]) is always active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// Names the host injects into sketch scope, plus the `PConstants` set.
    pub default_scope: DefaultScope,
    /// Custom host-global functions, name → definition source. Only the
    /// names matter to the translator; the host evaluates the definitions.
    pub a_functions: BTreeMap<String, String>,
    /// Registered host libraries; each may export additional global names.
    pub libraries: BTreeMap<String, LibraryExports>,
}

/// The default sketch scope: plain names plus the `PConstants` constants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultScope {
    pub names: BTreeSet<String>,
    pub pconstants: BTreeSet<String>,
}

/// A host library's contribution to the global name set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryExports {
    pub exports: Vec<String>,
}

impl TranslateOptions {
    /// Every name the options add to the resolver's global set, in
    /// deterministic order.
    pub fn extra_globals(&self) -> impl Iterator<Item = &str> {
        self.default_scope
            .names
            .iter()
            .map(String::as_str)
            .chain(self.default_scope.pconstants.iter().map(String::as_str))
            .chain(self.a_functions.keys().map(String::as_str))
            .chain(
                self.libraries
                    .values()
                    .flat_map(|lib| lib.exports.iter().map(String::as_str)),
            )
    }
}
