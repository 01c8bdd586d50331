//! Method and override descriptors.
//!
//! A method is an open function name with one or more virtual parameters; an
//! override (spec) is one concrete implementation registered against it.
//! Both are built once during [`Runtime::update`](crate::Runtime::update) and
//! never mutated afterwards.

use std::any::Any;

use smallvec::SmallVec;

use crate::class::ClassId;
use crate::dispatch::CallContext;
use crate::error::MethodError;

/// Handle of a registered method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub(crate) usize);

/// Handle of a registered override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecId(pub(crate) usize);

/// What an override returns: a boxed value of the override's choosing, or a
/// dispatch failure raised somewhere down a `call_next` chain.
pub type CallResult = Result<Box<dyn Any>, MethodError>;

/// Entry point of one override. The two error sentinels share this shape, so
/// every dispatch-table entry is callable.
pub type SpecFn = fn(&CallContext<'_>) -> CallResult;

/// Inline storage sized for the common small arities.
pub(crate) type ArityVec = SmallVec<[usize; 4]>;

/// A registered method after resolution against the class arena.
#[derive(Debug)]
pub(crate) struct Method {
    pub name: String,
    /// Declared virtual parameter classes, in parameter order.
    pub param_classes: ArityVec,
    /// Overrides registered against this method, in registration order.
    pub specs: Vec<SpecId>,
    /// Per-parameter slot into the per-class index arrays.
    pub slots: ArityVec,
    /// Per-dimension multipliers into the linearized dispatch table.
    pub strides: ArityVec,
    /// Group count per dimension.
    pub dims: ArityVec,
    /// Origin and length of this method's table in the global dispatch
    /// vector.
    pub table_base: usize,
    pub table_len: usize,
}

impl Method {
    pub fn arity(&self) -> usize {
        self.param_classes.len()
    }
}

/// One override after resolution against the class arena.
#[derive(Debug)]
pub(crate) struct Spec {
    pub method: MethodId,
    /// Declared parameter classes, each conforming to the method's declared
    /// class at the same position.
    pub param_classes: ArityVec,
    pub pf: SpecFn,
    /// The unique next-most-specific override, when one exists.
    pub next: Option<SpecId>,
}

/// One dispatch-table entry.
///
/// `pf` is always callable: a registered override, or one of the two error
/// sentinels. `spec` identifies the override for next-chaining and is `None`
/// for sentinels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Target {
    pub pf: SpecFn,
    pub spec: Option<SpecId>,
}
