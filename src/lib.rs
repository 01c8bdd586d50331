//! Open multi-methods over nominally-subtyped class hierarchies.
//!
//! An open method is a free function dispatched on the dynamic classes of
//! one or more of its arguments; an override is one implementation of it,
//! registered for a tuple of parameter classes. A single
//! [`Runtime::update`] pass discovers the participating hierarchy through a
//! host-provided [`ClassIntrospection`], assigns each (method, parameter)
//! pair a per-class index slot, collapses classes with identical applicable
//! overrides into groups, and linearizes one flat dispatch table per method.
//! A k-argument call then resolves in O(k) loads with no search:
//!
//! ```text
//! register methods and overrides
//!         |
//!     update(): class graph -> conforming sets -> slots -> groups -> tables
//!         |
//!     call(): per argument one coordinate load, then one table load
//! ```
//!
//! Calls with no applicable override, or with several equally specific ones,
//! return [`MethodError`] values produced by the sentinels baked into the
//! table. Overrides can delegate to the unique next-most-specific override
//! through [`CallContext::call_next`].
//!
//! # Examples
//!
//! ```
//! use open_methods::{
//!     CallContext, CallResult, ClassDesc, ClassIntrospection, Dynamic, Registry, Runtime,
//! };
//! use std::any::Any;
//!
//! // A two-class world: Animal (abstract) with one concrete Dog.
//! const ANIMAL: ClassDesc = ClassDesc(0);
//! const DOG: ClassDesc = ClassDesc(1);
//!
//! struct World;
//!
//! impl ClassIntrospection for World {
//!     fn all_classes(&self) -> Vec<ClassDesc> {
//!         vec![ANIMAL, DOG]
//!     }
//!     fn class_name(&self, class: ClassDesc) -> String {
//!         if class == DOG { "Dog".into() } else { "Animal".into() }
//!     }
//!     fn base(&self, class: ClassDesc) -> Option<ClassDesc> {
//!         (class == DOG).then_some(ANIMAL)
//!     }
//!     fn interfaces(&self, _class: ClassDesc) -> Vec<ClassDesc> {
//!         Vec::new()
//!     }
//!     fn is_concrete(&self, class: ClassDesc) -> bool {
//!         class == DOG
//!     }
//! }
//!
//! struct Dog;
//!
//! impl Dynamic for Dog {
//!     fn class_desc(&self) -> ClassDesc {
//!         DOG
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! fn kick_dog(_cx: &CallContext<'_>) -> CallResult {
//!     Ok(Box::new("bark".to_string()))
//! }
//!
//! let mut registry = Registry::new();
//! let kick = registry.register_method("kick", &[ANIMAL]);
//! registry.register_spec(kick, &[DOG], kick_dog);
//! let runtime = Runtime::update(&registry, &World);
//!
//! let dog = Dog;
//! let result = runtime.call(kick, &[&dog as &dyn Dynamic]).unwrap();
//! assert_eq!(result.downcast_ref::<String>().unwrap(), "bark");
//! ```

// Library code reports through error values, never the process streams.
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]

mod class;
mod update;

pub mod dispatch;
pub mod error;
pub mod introspect;
pub mod method;
pub mod registry;
pub mod report;
pub mod runtime;

pub use dispatch::CallContext;
pub use error::MethodError;
pub use introspect::{ClassDesc, ClassIntrospection, Dynamic};
pub use method::{CallResult, MethodId, SpecFn, SpecId};
pub use registry::{register_method, register_spec, runtime, update, Registry};
pub use report::{DispatchReport, MethodReport};
pub use runtime::Runtime;
