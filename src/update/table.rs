//! Dispatch table construction.
//!
//! Each method's table is a flat array indexed by the mixed-radix number
//! formed from its per-dimension group coordinates. Every entry is filled:
//! the unique best override where one exists, an error sentinel otherwise.

use super::groups::DimGroups;
use super::specificity;
use crate::class::Class;
use crate::dispatch::{throw_ambiguous, throw_undefined};
use crate::method::{Method, Spec, SpecId, Target};

/// Build one method's strides and table, and fill the per-class coordinates.
pub(crate) fn build(
    classes: &[Class],
    specs: &[Spec],
    method: &mut Method,
    dims: &[DimGroups],
    gdv: &mut Vec<Target>,
    giv: &mut [usize],
) {
    let arity = method.arity();
    method.dims = dims.iter().map(|d| d.masks.len()).collect();
    method.strides.clear();
    let mut stride = 1usize;
    for i in 0..arity {
        method.strides.push(stride);
        stride *= method.dims[i];
    }
    method.table_base = gdv.len();
    method.table_len = stride;

    for offset in 0..method.table_len {
        // Intersecting the per-dimension masks of this group tuple yields
        // exactly the overrides applicable to every class tuple mapping here.
        let group = |i: usize| (offset / method.strides[i]) % method.dims[i];
        let mut applicable = dims[0].masks[group(0)].clone();
        for i in 1..arity {
            applicable = applicable.intersection(&dims[i].masks[group(i)]);
        }
        let candidates: Vec<SpecId> = applicable.ones().map(|bit| method.specs[bit]).collect();

        let target = if candidates.is_empty() {
            Target {
                pf: throw_undefined,
                spec: None,
            }
        } else {
            let winners = specificity::best(classes, specs, &candidates);
            match winners.as_slice() {
                [only] => Target {
                    pf: specs[only.0].pf,
                    spec: Some(*only),
                },
                _ => Target {
                    pf: throw_ambiguous,
                    spec: None,
                },
            }
        };
        gdv.push(target);
    }

    // Per-class coordinates. Dimension 0 folds the table base and the group
    // coordinate into one absolute dispatch-vector offset, so the dispatcher
    // skips the first multiply-add.
    for (i, dim) in dims.iter().enumerate() {
        for &(class, group) in &dim.class_group {
            let node = &classes[class];
            let base = node
                .index_base
                .expect("concrete conforming class without an index region");
            let first = node
                .first_used_slot
                .expect("concrete conforming class without a used slot");
            let at = base + method.slots[i] - first;
            giv[at] = if i == 0 {
                method.table_base + group
            } else {
                group
            };
        }
    }
}
