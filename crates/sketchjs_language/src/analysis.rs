//! Inheritance metadata and emission weighting.
//!
//! Runs after the full AST is built, over the class registry alone:
//!
//! 1. **Resolution** — each textual base/interface name is looked up through
//!    the chain of enclosing scopes (innermost first, then the global
//!    scope), with dotted names descending through inner classes. Hits
//!    produce bidirectional base/derived links; misses stay unresolved and
//!    the renderer falls back to the textual name.
//! 2. **Weighting** — a worklist assigns every class a weight strictly
//!    greater than the weight of everything that depends on it (its inner
//!    classes, its derived classes). The renderer emits siblings in
//!    descending weight order, so base types appear before derived ones and
//!    enclosing classes after the inner classes they reference.

use rustc_hash::FxHashMap;

use crate::registry::{ClassId, ClassRegistry};

/// Resolves every `extends`/`implements` name and records derived links.
pub fn resolve_inheritance(registry: &mut ClassRegistry) {
    let mut global_scope: FxHashMap<String, ClassId> = FxHashMap::default();
    for id in registry.ids() {
        let record = registry.get(id);
        if record.scope.is_none() {
            global_scope.entry(record.name.clone()).or_insert(id);
        }
    }

    let ids: Vec<ClassId> = registry.ids().collect();
    for id in ids {
        let base_name = registry.get(id).base_name.clone();
        if let Some(base_name) = base_name {
            if let Some(base) = find_in_scopes(registry, &global_scope, id, &base_name) {
                registry.get_mut(id).base = Some(base);
                registry.get_mut(base).derived.push(id);
            }
        }
        let interface_names = registry.get(id).interface_names.clone();
        let mut interfaces = Vec::with_capacity(interface_names.len());
        for name in &interface_names {
            let found = find_in_scopes(registry, &global_scope, id, name);
            if let Some(interface) = found {
                registry.get_mut(interface).derived.push(id);
            }
            interfaces.push(found);
        }
        registry.get_mut(id).interfaces = interfaces;
    }
}

/// Looks a dotted name up from inside `from`: enclosing scopes first, then
/// the global scope, then descending through inner classes for the
/// remaining parts.
fn find_in_scopes(
    registry: &ClassRegistry,
    global_scope: &FxHashMap<String, ClassId>,
    from: ClassId,
    dotted: &str,
) -> Option<ClassId> {
    let mut parts = dotted.split('.');
    let head = parts.next()?;

    let mut found = None;
    let mut current = registry.get(from).scope;
    while let Some(scope) = current {
        if let Some(hit) = registry.inner_by_name(scope, head) {
            found = Some(hit);
            break;
        }
        current = registry.get(scope).scope;
    }
    let mut found = found.or_else(|| global_scope.get(head).copied())?;
    for part in parts {
        found = registry.inner_by_name(found, part)?;
    }
    Some(found)
}

/// Assigns emission weights with a worklist.
///
/// A class with nothing depending on it (no inner classes, no derived
/// classes) starts at weight 0. Draining the queue, each popped class may
/// complete the pending dependency set of its scope parent, base class, or
/// interfaces; a completed dependent enters the queue one level heavier.
pub fn compute_weights(registry: &mut ClassRegistry) {
    let mut queue: Vec<ClassId> = Vec::new();
    let mut pending: FxHashMap<ClassId, Vec<ClassId>> = FxHashMap::default();

    for id in registry.ids().collect::<Vec<_>>() {
        let record = registry.get(id);
        let mut depends_on: Vec<ClassId> = record.inners.clone();
        depends_on.extend(record.derived.iter().copied());
        if depends_on.is_empty() {
            registry.get_mut(id).weight = Some(0);
            queue.push(id);
        } else {
            pending.insert(id, depends_on);
        }
    }

    let mut head = 0;
    while head < queue.len() {
        let id = queue[head];
        head += 1;
        let weight = registry.weight(id);
        let record = registry.get(id);
        let mut dependents: Vec<ClassId> = Vec::new();
        if let Some(scope) = record.scope {
            dependents.push(scope);
        }
        if let Some(base) = record.base {
            dependents.push(base);
        }
        dependents.extend(record.interfaces.iter().flatten().copied());
        for dependent in dependents {
            if remove_dependency(&mut pending, dependent, id) {
                registry.get_mut(dependent).weight = Some(weight + 1);
                queue.push(dependent);
            }
        }
    }
}

/// Drops `done` from `target`'s pending set; `true` when that emptied it.
fn remove_dependency(
    pending: &mut FxHashMap<ClassId, Vec<ClassId>>,
    target: ClassId,
    done: ClassId,
) -> bool {
    let Some(set) = pending.get_mut(&target) else {
        return false;
    };
    let Some(position) = set.iter().position(|&dep| dep == done) else {
        return false;
    };
    set.remove(position);
    if set.is_empty() {
        pending.remove(&target);
        return true;
    }
    false
}
