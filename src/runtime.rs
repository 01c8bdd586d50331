//! The sealed dispatch runtime.
//!
//! A `Runtime` is produced by one [`update`](Runtime::update) pass and never
//! mutated afterwards, so any number of threads may dispatch through it
//! concurrently without locks: the call path reads only the class arena, the
//! method descriptors and the two global vectors.

use rustc_hash::FxHashMap;

use crate::class::{Class, ClassId};
use crate::introspect::{ClassDesc, ClassIntrospection};
use crate::method::{Method, MethodId, Spec, Target};
use crate::registry::Registry;
use crate::report::{DispatchReport, MethodReport};

/// Dispatch tables, index vectors and descriptors for one registered world.
pub struct Runtime {
    pub(crate) classes: Vec<Class>,
    /// Host descriptor to arena index. The one extra load dispatch pays for
    /// not being able to write into host class descriptors.
    pub(crate) by_desc: FxHashMap<ClassDesc, ClassId>,
    pub(crate) methods: Vec<Method>,
    pub(crate) specs: Vec<Spec>,
    /// Global index vector: every concrete class's compact index array.
    pub(crate) giv: Vec<usize>,
    /// Global dispatch vector: every method's table, back to back.
    pub(crate) gdv: Vec<Target>,
}

impl Runtime {
    /// Build dispatch tables for everything registered so far.
    ///
    /// Single-threaded, not reentrant. Panics on setup misuse: an override
    /// arity mismatch, or an override parameter outside the declared
    /// parameter's hierarchy. Borrows the registry, so rebuilding from the
    /// same declarations stays possible.
    pub fn update(registry: &Registry, world: &dyn ClassIntrospection) -> Runtime {
        crate::update::run(registry, world)
    }

    /// Resolve a method by name.
    pub fn method_id(&self, name: &str) -> Option<MethodId> {
        self.methods
            .iter()
            .position(|m| m.name == name)
            .map(MethodId)
    }

    /// Name of a registered method.
    pub fn method_name(&self, method: MethodId) -> &str {
        &self.methods[method.0].name
    }

    /// Setup statistics: per-method dimensions, group counts and table
    /// sizes, plus the global vector lengths.
    pub fn report(&self) -> DispatchReport {
        DispatchReport {
            classes: self.classes.len(),
            concrete_classes: self.classes.iter().filter(|c| c.concrete).count(),
            index_vector_len: self.giv.len(),
            dispatch_vector_len: self.gdv.len(),
            methods: self
                .methods
                .iter()
                .map(|m| MethodReport {
                    name: m.name.clone(),
                    arity: m.arity(),
                    overrides: m.specs.len(),
                    slots: m.slots.to_vec(),
                    strides: m.strides.to_vec(),
                    groups: m.dims.to_vec(),
                    table_len: m.table_len,
                })
                .collect(),
        }
    }
}
