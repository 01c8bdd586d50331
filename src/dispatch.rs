//! Call-time dispatch.
//!
//! Resolving a k-argument call costs O(k): per argument one descriptor
//! lookup, one conformance probe and one index-vector load, then a single
//! dispatch-vector load and an indirect call. The first dimension's index
//! entry already holds the absolute table offset, so only the remaining
//! dimensions multiply by their strides.

use std::any::Any;

use crate::error::MethodError;
use crate::introspect::Dynamic;
use crate::method::{CallResult, MethodId, SpecId};
use crate::runtime::Runtime;

/// Everything an override body can reach about the call in flight.
pub struct CallContext<'a> {
    pub(crate) runtime: &'a Runtime,
    pub(crate) method: MethodId,
    /// The override selected by the table, `None` inside the error sentinels.
    pub(crate) spec: Option<SpecId>,
    pub(crate) args: &'a [&'a dyn Dynamic],
}

impl<'a> CallContext<'a> {
    /// Name of the method being called.
    pub fn method_name(&self) -> &str {
        self.runtime.method_name(self.method)
    }

    /// The virtual arguments, as passed to the dispatcher.
    pub fn args(&self) -> &[&'a dyn Dynamic] {
        self.args
    }

    /// Downcast one argument to its concrete type.
    ///
    /// Panics when the argument is not a `T`; an override asking for a type
    /// its declared parameters do not guarantee is a programming error.
    pub fn arg<T: Any>(&self, index: usize) -> &T {
        self.args[index]
            .as_any()
            .downcast_ref::<T>()
            .expect("virtual argument does not have the expected concrete type")
    }

    /// Does the running override have a unique next-most-specific override?
    pub fn has_next(&self) -> bool {
        self.spec
            .and_then(|s| self.runtime.specs[s.0].next)
            .is_some()
    }

    /// Invoke the next-most-specific override with the same arguments.
    ///
    /// With no unique next the chain is exhausted and the call reports
    /// itself as not implemented.
    pub fn call_next(&self) -> CallResult {
        match self.spec.and_then(|s| self.runtime.specs[s.0].next) {
            Some(next) => {
                let cx = CallContext {
                    runtime: self.runtime,
                    method: self.method,
                    spec: Some(next),
                    args: self.args,
                };
                (self.runtime.specs[next.0].pf)(&cx)
            }
            None => Err(MethodError::not_implemented(self.method_name())),
        }
    }
}

/// Sentinel installed at table entries with no applicable override.
pub(crate) fn throw_undefined(cx: &CallContext<'_>) -> CallResult {
    Err(MethodError::not_implemented(cx.method_name()))
}

/// Sentinel installed at table entries with several maximal overrides.
pub(crate) fn throw_ambiguous(cx: &CallContext<'_>) -> CallResult {
    Err(MethodError::ambiguous(cx.method_name()))
}

impl Runtime {
    /// Dispatch a call on the dynamic classes of its arguments.
    ///
    /// Arguments whose dynamic class lies outside the declared parameter's
    /// hierarchy have no applicable override and report the call as not
    /// implemented. Passing the wrong number of arguments is a programming
    /// error and panics.
    pub fn call<'a>(
        &'a self,
        method: MethodId,
        args: &'a [&'a dyn Dynamic],
    ) -> CallResult {
        let m = &self.methods[method.0];
        assert_eq!(
            args.len(),
            m.arity(),
            "wrong number of arguments calling '{}'",
            m.name
        );

        let mut offset = 0usize;
        for (i, arg) in args.iter().enumerate() {
            let Some(&cid) = self.by_desc.get(&arg.class_desc()) else {
                return Err(MethodError::not_implemented(&m.name));
            };
            let class = &self.classes[cid];
            debug_assert!(
                class.concrete,
                "dispatch on non-concrete class '{}'",
                class.name
            );
            // The conformance probe keeps slot reuse sound: outside the
            // declared parameter's cone this method has no entry in the
            // class's index array.
            if !self.classes[m.param_classes[i]].conforming.contains(cid) {
                return Err(MethodError::not_implemented(&m.name));
            }
            let base = class
                .index_base
                .expect("conforming concrete class without an index region");
            let first = class
                .first_used_slot
                .expect("conforming concrete class without a used slot");
            let entry = self.giv[base + m.slots[i] - first];
            if i == 0 {
                // Already folded to an absolute dispatch-vector offset.
                offset = entry;
            } else {
                offset += entry * m.strides[i];
            }
        }

        let target = self.gdv[offset];
        let cx = CallContext {
            runtime: self,
            method,
            spec: target.spec,
            args,
        };
        (target.pf)(&cx)
    }
}
