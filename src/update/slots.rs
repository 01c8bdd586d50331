//! Slot allocation.
//!
//! Every (method, virtual parameter) pair gets an integer slot chosen on the
//! declaring class. The slot doubles as the position, within every conforming
//! class's compact index array, where that class stores its group coordinate
//! for the dimension. Two methods whose hierarchies can never see the same
//! object may end up with equal slot numbers; any class reachable from a user
//! of a slot reserves it, which is what keeps reuse collision-free.

use crate::class::{Class, ClassId, ClassSet};
use crate::method::Method;

/// Assign slots to every registered (method, parameter) pair.
///
/// Classes are visited in arena order, bases first, so a class's own
/// allocations always start past everything propagated from its ancestors.
/// Conforming sets must already be computed.
pub(crate) fn allocate(classes: &mut [Class], methods: &mut [Method]) {
    for ci in 0..classes.len() {
        let pairs = classes[ci].method_params.clone();
        for (method, param) in pairs {
            let slot = classes[ci].next_slot;
            classes[ci].next_slot = slot + 1;
            claim_first_used(&mut classes[ci], slot);
            methods[method.0].slots[param] = slot;

            // Reserve the slot across every class that could ever observe
            // it: the declaring class's descendants, their ancestors, and
            // everything reachable onward through base/derived edges.
            let cone = classes[ci].conforming.clone();
            let mut visited = vec![false; classes.len()];
            visited[ci] = true;
            let derived = classes[ci].direct_derived.clone();
            for d in derived {
                reserve(classes, d, slot, &cone, &mut visited);
            }
        }
    }
}

/// Flood the reservation through both edge directions.
///
/// `next_slot` moves past the slot everywhere reached; the index-array range
/// only widens (`first_used_slot`) on classes inside the declaring cone,
/// since only those will hold a coordinate at this slot.
fn reserve(
    classes: &mut [Class],
    id: ClassId,
    slot: usize,
    cone: &ClassSet,
    visited: &mut [bool],
) {
    if visited[id] {
        return;
    }
    visited[id] = true;

    let class = &mut classes[id];
    class.next_slot = class.next_slot.max(slot + 1);
    if cone.contains(id) {
        claim_first_used(class, slot);
    }

    let bases = classes[id].direct_bases.clone();
    for b in bases {
        reserve(classes, b, slot, cone, visited);
    }
    let derived = classes[id].direct_derived.clone();
    for d in derived {
        reserve(classes, d, slot, cone, visited);
    }
}

fn claim_first_used(class: &mut Class, slot: usize) {
    class.first_used_slot = Some(match class.first_used_slot {
        Some(first) => first.min(slot),
        None => slot,
    });
}
