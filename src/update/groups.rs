//! Table compression: grouping classes by applicable-override sets.
//!
//! Along one dimension of a method, two concrete classes that select exactly
//! the same overrides are indistinguishable to dispatch, so they share one
//! coordinate. Group counts, not class counts, size the dispatch table.

use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

use crate::class::{Class, ClassId};
use crate::method::{Method, Spec};

/// Bitmask over one method's overrides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SpecMask {
    words: SmallVec<[u64; 1]>,
}

impl SpecMask {
    pub fn new(bits: usize) -> Self {
        SpecMask {
            words: smallvec![0; ((bits + 63) / 64).max(1)],
        }
    }

    pub fn set(&mut self, bit: usize) {
        self.words[bit / 64] |= 1u64 << (bit % 64);
    }

    pub fn intersection(&self, other: &SpecMask) -> SpecMask {
        SpecMask {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| a & b)
                .collect(),
        }
    }

    /// Indices of set bits, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &bits)| {
            (0..64).filter_map(move |b| {
                if bits & (1u64 << b) != 0 {
                    Some(w * 64 + b)
                } else {
                    None
                }
            })
        })
    }
}

/// Groups of one dimension of one method.
pub(crate) struct DimGroups {
    /// Group index to the overrides applicable to that group's classes.
    pub masks: Vec<SpecMask>,
    /// Concrete conforming class to its group index.
    pub class_group: Vec<(ClassId, usize)>,
}

/// Partition each dimension's concrete conforming classes into groups.
pub(crate) fn build(classes: &[Class], method: &Method, specs: &[Spec]) -> Vec<DimGroups> {
    let mut dims = Vec::with_capacity(method.arity());
    for (i, &declared) in method.param_classes.iter().enumerate() {
        let mut masks: Vec<SpecMask> = Vec::new();
        let mut index_of: FxHashMap<SpecMask, usize> = FxHashMap::default();
        let mut class_group: Vec<(ClassId, usize)> = Vec::new();

        for candidate in classes[declared].conforming.iter() {
            if !classes[candidate].concrete {
                continue;
            }
            let mut mask = SpecMask::new(method.specs.len());
            for (bit, &sid) in method.specs.iter().enumerate() {
                let spec_param = specs[sid.0].param_classes[i];
                if classes[spec_param].conforming.contains(candidate) {
                    mask.set(bit);
                }
            }
            let group = match index_of.get(&mask) {
                Some(&g) => g,
                None => {
                    let g = masks.len();
                    index_of.insert(mask.clone(), g);
                    masks.push(mask);
                    g
                }
            };
            class_group.push((candidate, group));
        }
        dims.push(DimGroups { masks, class_group });
    }
    dims
}
