//! The class registry: every declared class and interface, addressed by id.
//!
//! Class records form a graph (inner class ↔ enclosing class, base ↔
//! derived) that owned AST nodes cannot express directly, so the registry is
//! a slab of records cross-referenced by lightweight [`ClassId`] handles.
//! AST nodes carry only their id; the analysis pass fills in the links and
//! weights, and the renderer reads them back.
//!
//! Records are created during parsing (top-down, so an inner class always
//! finds its enclosing scope already declared) and only ever appended.

use rustc_hash::{FxHashMap, FxHashSet};

/// A lightweight handle to a class record.
///
/// Ids are `Copy` and compare in O(1); use [`ClassRegistry::get`] to read
/// the record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ClassId(u32);

impl ClassId {
    /// Returns the internal index of this id.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The tag used to build synthetic anonymous-class names, e.g. `class3`.
    pub fn tag(self) -> String {
        format!("class{}", self.0 + 1)
    }
}

/// One declared class or interface.
#[derive(Debug, Default)]
pub struct ClassRecord {
    /// Declared (or synthetic) name.
    pub name: String,
    pub is_interface: bool,
    /// The enclosing class, when this is an inner or anonymous class.
    pub scope: Option<ClassId>,
    /// Textual base class name from the `extends` clause, dotted.
    pub base_name: Option<String>,
    /// Textual interface names from `implements` (or interface `extends`).
    pub interface_names: Vec<String>,
    /// Resolved base class, if the name resolved to a declared class.
    pub base: Option<ClassId>,
    /// Resolved interfaces; unresolved names stay `None`, position-aligned
    /// with `interface_names`.
    pub interfaces: Vec<Option<ClassId>>,
    /// Classes that extend or implement this one.
    pub derived: Vec<ClassId>,
    /// Classes declared directly inside this one, in source order.
    pub inners: Vec<ClassId>,
    /// Field name → declared static.
    pub fields: FxHashMap<String, bool>,
    /// Method name → declared static.
    pub methods: FxHashMap<String, bool>,
    /// Emission weight; `None` until the analysis pass runs, read as 0.
    pub weight: Option<u32>,
}

/// The slab of class records for one translation.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    records: Vec<ClassRecord>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new class, linking it into its enclosing scope.
    pub fn declare(&mut self, name: String, scope: Option<ClassId>, is_interface: bool) -> ClassId {
        let id = ClassId(self.records.len() as u32);
        self.records.push(ClassRecord {
            name,
            is_interface,
            scope,
            ..ClassRecord::default()
        });
        if let Some(scope) = scope {
            self.records[scope.index()].inners.push(id);
        }
        id
    }

    pub fn get(&self, id: ClassId) -> &ClassRecord {
        &self.records[id.index()]
    }

    pub fn get_mut(&mut self, id: ClassId) -> &mut ClassRecord {
        &mut self.records[id.index()]
    }

    /// All ids, in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.records.len() as u32).map(ClassId)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The emission weight, with unweighted classes reading as zero.
    pub fn weight(&self, id: ClassId) -> u32 {
        self.get(id).weight.unwrap_or(0)
    }

    /// Counts enclosing class scopes, self included: a top-level class has
    /// depth 1, its inner classes depth 2, and so on. Selects the
    /// `$this_<depth>` self pointer.
    pub fn scope_depth(&self, id: ClassId) -> usize {
        let mut depth = 1;
        let mut current = self.get(id).scope;
        while let Some(scope) = current {
            depth += 1;
            current = self.get(scope).scope;
        }
        depth
    }

    /// Looks up a direct inner class of `scope` by name.
    pub fn inner_by_name(&self, scope: ClassId, name: &str) -> Option<ClassId> {
        self.get(scope)
            .inners
            .iter()
            .copied()
            .find(|&inner| self.get(inner).name == name)
    }

    /// Aggregates the member tables visible inside `id`'s body: its own
    /// fields, methods, and inner-class names, preceded by everything
    /// inherited through the resolved base chain (so overrides shadow).
    pub fn collect_members(
        &self,
        id: ClassId,
        fields: &mut FxHashMap<String, bool>,
        methods: &mut FxHashMap<String, bool>,
        inners: &mut FxHashSet<String>,
    ) {
        let record = self.get(id);
        if record.is_interface {
            for base in record.interfaces.iter().flatten() {
                self.collect_members(*base, fields, methods, inners);
            }
        } else if let Some(base) = record.base {
            self.collect_members(base, fields, methods, inners);
        }
        for (name, is_static) in &record.fields {
            fields.insert(name.clone(), *is_static);
        }
        for (name, is_static) in &record.methods {
            methods.insert(name.clone(), *is_static);
        }
        for inner in &record.inners {
            inners.insert(self.get(*inner).name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_links_scope() {
        let mut registry = ClassRegistry::new();
        let outer = registry.declare("Outer".into(), None, false);
        let inner = registry.declare("Inner".into(), Some(outer), false);
        assert_eq!(registry.get(outer).inners, vec![inner]);
        assert_eq!(registry.get(inner).scope, Some(outer));
        assert_eq!(registry.scope_depth(outer), 1);
        assert_eq!(registry.scope_depth(inner), 2);
    }

    #[test]
    fn members_aggregate_through_base_chain() {
        let mut registry = ClassRegistry::new();
        let base = registry.declare("Base".into(), None, false);
        let derived = registry.declare("Derived".into(), None, false);
        registry.get_mut(base).fields.insert("a".into(), false);
        registry.get_mut(base).methods.insert("m".into(), true);
        registry.get_mut(derived).base = Some(base);
        registry.get_mut(derived).fields.insert("b".into(), false);

        let mut fields = FxHashMap::default();
        let mut methods = FxHashMap::default();
        let mut inners = FxHashSet::default();
        registry.collect_members(derived, &mut fields, &mut methods, &mut inners);
        assert!(fields.contains_key("a"));
        assert!(fields.contains_key("b"));
        assert_eq!(methods.get("m"), Some(&true));
    }

    #[test]
    fn synthetic_tags_are_one_based() {
        let mut registry = ClassRegistry::new();
        let first = registry.declare("A".into(), None, false);
        assert_eq!(first.tag(), "class1");
    }
}
