//! The "more specific than" partial order over overrides.

use crate::class::{Class, ClassId};
use crate::method::{Method, Spec, SpecId};

/// Is `a` strictly more specific than `b`?
///
/// True when no position of `b` is strictly below the same position of `a`,
/// and at least one position of `a` is strictly below `b`'s. Positions whose
/// classes are unrelated neither help nor block, which is what leaves
/// incomparable override pairs, and ultimately ambiguous table entries.
pub(crate) fn more_specific(classes: &[Class], a: &[ClassId], b: &[ClassId]) -> bool {
    let mut below_somewhere = false;
    for (&pa, &pb) in a.iter().zip(b) {
        if pa == pb {
            continue;
        }
        let a_below = classes[pb].conforming.contains(pa);
        let b_below = classes[pa].conforming.contains(pb);
        if b_below && !a_below {
            return false;
        }
        if a_below {
            below_somewhere = true;
        }
    }
    below_somewhere
}

/// Maximal elements of `candidates` under the specificity order.
///
/// Incremental antichain accumulation: each candidate is skipped when a kept
/// element dominates it, and evicts any kept elements it dominates.
pub(crate) fn best(classes: &[Class], specs: &[Spec], candidates: &[SpecId]) -> Vec<SpecId> {
    let mut kept: Vec<SpecId> = Vec::new();
    for &candidate in candidates {
        let params = &specs[candidate.0].param_classes;
        if kept
            .iter()
            .any(|&k| more_specific(classes, &specs[k.0].param_classes, params))
        {
            continue;
        }
        kept.retain(|&k| !more_specific(classes, params, &specs[k.0].param_classes));
        kept.push(candidate);
    }
    kept
}

/// Fix up every override's next-most-specific link.
///
/// The next of an override is the unique maximal element among the strictly
/// less specific overrides of the same method; with zero or several maximal
/// elements there is no next.
pub(crate) fn link_next(classes: &[Class], methods: &[Method], specs: &mut [Spec]) {
    let mut links: Vec<(SpecId, Option<SpecId>)> = Vec::new();
    for method in methods {
        for &sid in &method.specs {
            let params = &specs[sid.0].param_classes;
            let less_specific: Vec<SpecId> = method
                .specs
                .iter()
                .copied()
                .filter(|&other| {
                    other != sid
                        && more_specific(classes, params, &specs[other.0].param_classes)
                })
                .collect();
            let maximal = best(classes, specs, &less_specific);
            let next = match maximal.as_slice() {
                [only] => Some(*only),
                _ => None,
            };
            links.push((sid, next));
        }
    }
    for (sid, next) in links {
        specs[sid.0].next = next;
    }
}
