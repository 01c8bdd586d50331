//! The one-shot transition from registered declarations to a sealed runtime.
//!
//! Staging: class graph, conformance closure, slot allocation, then per
//! method the group partition and table fill, and finally the next links.
//! Everything downstream of registration happens here, single-threaded;
//! afterwards the runtime is read-only.

pub(crate) mod groups;
pub(crate) mod slots;
pub(crate) mod specificity;
pub(crate) mod table;

use smallvec::smallvec;

use crate::class::{conforming, graph};
use crate::introspect::{ClassDesc, ClassIntrospection};
use crate::method::{ArityVec, Method, MethodId, Spec, SpecId, Target};
use crate::registry::Registry;
use crate::runtime::Runtime;

pub(crate) fn run(registry: &Registry, world: &dyn ClassIntrospection) -> Runtime {
    // Participating classes, seeded by the declared virtual parameter types.
    let seeds: Vec<ClassDesc> = registry
        .methods
        .iter()
        .flat_map(|m| m.params.iter().copied())
        .collect();
    let graph::ClassGraph { mut classes, by_desc } = graph::build(&seeds, world);

    // Resolve method declarations against the arena and note, per class, the
    // (method, parameter) pairs declared with it.
    let mut methods: Vec<Method> = Vec::with_capacity(registry.methods.len());
    for (index, decl) in registry.methods.iter().enumerate() {
        let param_classes: ArityVec = decl.params.iter().map(|d| by_desc[d]).collect();
        for (position, &class) in param_classes.iter().enumerate() {
            classes[class].method_params.push((MethodId(index), position));
        }
        let arity = param_classes.len();
        methods.push(Method {
            name: decl.name.clone(),
            param_classes,
            specs: Vec::new(),
            slots: smallvec![0; arity],
            strides: ArityVec::new(),
            dims: ArityVec::new(),
            table_base: 0,
            table_len: 0,
        });
    }

    let mut specs: Vec<Spec> = Vec::with_capacity(registry.specs.len());
    for (index, decl) in registry.specs.iter().enumerate() {
        let method_name = &registry.methods[decl.method.0].name;
        let param_classes: ArityVec = decl
            .params
            .iter()
            .map(|d| {
                *by_desc.get(d).unwrap_or_else(|| {
                    panic!(
                        "an override of '{}' names a class outside its method's hierarchies",
                        method_name
                    )
                })
            })
            .collect();
        methods[decl.method.0].specs.push(SpecId(index));
        specs.push(Spec {
            method: decl.method,
            param_classes,
            pf: decl.pf,
            next: None,
        });
    }

    conforming::compute(&mut classes);

    // Every override parameter must sit inside the declared parameter's cone.
    for spec in &specs {
        let method = &methods[spec.method.0];
        for (position, (&sp, &mp)) in spec
            .param_classes
            .iter()
            .zip(&method.param_classes)
            .enumerate()
        {
            assert!(
                classes[mp].conforming.contains(sp),
                "parameter {} of an override of '{}' does not conform to the declared class '{}'",
                position,
                method.name,
                classes[mp].name
            );
        }
    }

    slots::allocate(&mut classes, &mut methods);

    // Carve the global index vector into per-class regions.
    let mut giv_len = 0usize;
    for class in classes.iter_mut() {
        if class.concrete && class.first_used_slot.is_some() {
            class.index_base = Some(giv_len);
            giv_len += class.index_len();
        }
    }
    let mut giv = vec![0usize; giv_len];

    let mut gdv: Vec<Target> = Vec::new();
    for index in 0..methods.len() {
        let dims = groups::build(&classes, &methods[index], &specs);
        table::build(&classes, &specs, &mut methods[index], &dims, &mut gdv, &mut giv);
    }

    specificity::link_next(&classes, &methods, &mut specs);

    Runtime {
        classes,
        by_desc,
        methods,
        specs,
        giv,
        gdv,
    }
}
