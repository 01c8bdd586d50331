//! Conformance closure over the participating arena.

use super::{Class, ClassSet};

/// Fill every class's conforming set: itself plus all assignable classes.
///
/// Walks the arena leaves-first, so each merge of a derived class's set reads
/// a completed set. Total cost is the sum of all conforming-set sizes.
pub(crate) fn compute(classes: &mut [Class]) {
    let total = classes.len();
    for id in (0..total).rev() {
        let mut set = ClassSet::with_capacity(total);
        set.insert(id);
        // Derived classes sit after their bases in arena order, so their
        // sets are already complete.
        let derived = classes[id].direct_derived.clone();
        for d in derived {
            debug_assert!(d > id);
            set.union_with(&classes[d].conforming);
        }
        classes[id].conforming = set;
    }
}
