//! Method and override registration, plus the process-global registry.
//!
//! Registration only records declarations; nothing is resolved until
//! [`Runtime::update`]. Hosts that initialize from many modules can lean on
//! the global layer: register from anywhere, call [`update`] once when every
//! module has run, dispatch through [`runtime`] afterwards. Tests and
//! embedders wanting isolated hierarchies use their own [`Registry`] and
//! [`Runtime`] values instead.

use std::sync::{Mutex, MutexGuard};

use once_cell::sync::{Lazy, OnceCell};

use crate::introspect::{ClassDesc, ClassIntrospection};
use crate::method::{MethodId, SpecFn, SpecId};
use crate::runtime::Runtime;

#[derive(Debug, Clone)]
pub(crate) struct MethodDecl {
    pub name: String,
    pub params: Vec<ClassDesc>,
}

#[derive(Debug, Clone)]
pub(crate) struct SpecDecl {
    pub method: MethodId,
    pub params: Vec<ClassDesc>,
    pub pf: SpecFn,
}

/// Registered methods and overrides, before table construction.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub(crate) methods: Vec<MethodDecl>,
    pub(crate) specs: Vec<SpecDecl>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register an open method with the given virtual parameter classes.
    pub fn register_method<S: Into<String>>(
        &mut self,
        name: S,
        params: &[ClassDesc],
    ) -> MethodId {
        assert!(
            !params.is_empty(),
            "a method needs at least one virtual parameter"
        );
        self.methods.push(MethodDecl {
            name: name.into(),
            params: params.to_vec(),
        });
        MethodId(self.methods.len() - 1)
    }

    /// Register an override of `method` for the given parameter classes.
    ///
    /// Registering the same parameter tuple again replaces the earlier
    /// override, keeping its handle.
    pub fn register_spec(&mut self, method: MethodId, params: &[ClassDesc], pf: SpecFn) -> SpecId {
        let decl = &self.methods[method.0];
        assert_eq!(
            params.len(),
            decl.params.len(),
            "override arity does not match method '{}'",
            decl.name
        );
        if let Some(position) = self
            .specs
            .iter()
            .position(|s| s.method == method && s.params.as_slice() == params)
        {
            self.specs[position].pf = pf;
            return SpecId(position);
        }
        self.specs.push(SpecDecl {
            method,
            params: params.to_vec(),
            pf,
        });
        SpecId(self.specs.len() - 1)
    }
}

// ============================================================
// Process-global registry
// ============================================================

static REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::new()));
static RUNTIME: OnceCell<Runtime> = OnceCell::new();

fn registry_lock() -> MutexGuard<'static, Registry> {
    REGISTRY.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Register a method in the process-global registry.
pub fn register_method(name: &str, params: &[ClassDesc]) -> MethodId {
    assert!(
        RUNTIME.get().is_none(),
        "cannot register methods after update()"
    );
    registry_lock().register_method(name, params)
}

/// Register an override in the process-global registry.
pub fn register_spec(method: MethodId, params: &[ClassDesc], pf: SpecFn) -> SpecId {
    assert!(
        RUNTIME.get().is_none(),
        "cannot register overrides after update()"
    );
    registry_lock().register_spec(method, params, pf)
}

/// Build the global dispatch tables. May run once per process; every
/// registration must have happened already.
pub fn update(world: &dyn ClassIntrospection) -> &'static Runtime {
    let built = {
        let registry = registry_lock();
        Runtime::update(&registry, world)
    };
    if RUNTIME.set(built).is_err() {
        panic!("update() may only run once");
    }
    runtime()
}

/// The sealed global runtime. Panics when called before [`update`].
pub fn runtime() -> &'static Runtime {
    RUNTIME
        .get()
        .expect("dispatch requires update() to have run")
}
