//! Builds the participating class graph.
//!
//! The graph is seeded with the classes named as virtual parameters of
//! registered methods, then closed over all of their descendants found
//! through introspection. Unrelated classes never enter the arena, so table
//! sizes track the hierarchies that can actually reach a dispatcher.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{Class, ClassId};
use crate::introspect::{ClassDesc, ClassIntrospection};

/// The materialized arena plus the descriptor side table.
///
/// Arena order is layered: every class appears after all of its bases, and
/// classes within a layer are name-sorted for determinism.
pub(crate) struct ClassGraph {
    pub classes: Vec<Class>,
    pub by_desc: FxHashMap<ClassDesc, ClassId>,
}

/// Materialize the participating set for the given seeds.
pub(crate) fn build(seeds: &[ClassDesc], world: &dyn ClassIntrospection) -> ClassGraph {
    let seed_set: FxHashSet<ClassDesc> = seeds.iter().copied().collect();

    // A class participates iff it is seeded or any ancestor participates,
    // i.e. the set is exactly seeds plus their transitive descendants.
    let mut membership: FxHashMap<ClassDesc, bool> = FxHashMap::default();
    for desc in seed_set.iter().copied().chain(world.all_classes()) {
        scoop(desc, &seed_set, world, &mut membership);
    }
    let member_set: FxHashSet<ClassDesc> = membership
        .iter()
        .filter(|&(_, &hit)| hit)
        .map(|(&desc, _)| desc)
        .collect();

    let order = layer(&member_set, world);

    let mut classes: Vec<Class> = Vec::with_capacity(order.len());
    let mut by_desc: FxHashMap<ClassDesc, ClassId> = FxHashMap::default();
    for desc in order {
        by_desc.insert(desc, classes.len());
        classes.push(Class::new(
            desc,
            world.class_name(desc),
            world.is_concrete(desc),
        ));
    }

    // Wire direct edges between nodes actually in the arena. Bases outside
    // the participating set are simply absent.
    for id in 0..classes.len() {
        let desc = classes[id].desc;
        for parent in parents(world, desc) {
            if let Some(&pid) = by_desc.get(&parent) {
                classes[id].direct_bases.push(pid);
                classes[pid].direct_derived.push(id);
            }
        }
    }

    ClassGraph { classes, by_desc }
}

/// Direct base class followed by direct interfaces, in declaration order.
fn parents(world: &dyn ClassIntrospection, desc: ClassDesc) -> Vec<ClassDesc> {
    let mut out = Vec::new();
    if let Some(base) = world.base(desc) {
        out.push(base);
    }
    out.extend(world.interfaces(desc));
    out
}

fn scoop(
    desc: ClassDesc,
    seeds: &FxHashSet<ClassDesc>,
    world: &dyn ClassIntrospection,
    membership: &mut FxHashMap<ClassDesc, bool>,
) -> bool {
    if let Some(&hit) = membership.get(&desc) {
        return hit;
    }
    // Tentative entry; the host hierarchy is acyclic so re-entry only happens
    // through diamond sharing, which this memoizes.
    membership.insert(desc, false);
    let mut hit = seeds.contains(&desc);
    for parent in parents(world, desc) {
        hit |= scoop(parent, seeds, world, membership);
    }
    membership.insert(desc, hit);
    hit
}

/// Kahn-style topological layering of the participating set.
fn layer(member_set: &FxHashSet<ClassDesc>, world: &dyn ClassIntrospection) -> Vec<ClassDesc> {
    let name_of: FxHashMap<ClassDesc, String> = member_set
        .iter()
        .map(|&desc| (desc, world.class_name(desc)))
        .collect();

    let mut order: Vec<ClassDesc> = Vec::with_capacity(member_set.len());
    let mut emitted: FxHashSet<ClassDesc> = FxHashSet::default();
    let mut remaining: Vec<ClassDesc> = member_set.iter().copied().collect();
    while !remaining.is_empty() {
        let (mut ready, rest): (Vec<_>, Vec<_>) = remaining.into_iter().partition(|&desc| {
            parents(world, desc)
                .into_iter()
                .all(|p| !member_set.contains(&p) || emitted.contains(&p))
        });
        assert!(!ready.is_empty(), "cycle in the participating class graph");
        // Name sort within a layer; descriptor identity breaks name ties.
        ready.sort_by(|a, b| name_of[a].cmp(&name_of[b]).then(a.cmp(b)));
        for desc in ready {
            emitted.insert(desc);
            order.push(desc);
        }
        remaining = rest;
    }
    order
}
