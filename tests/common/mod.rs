//! Shared fixtures for integration tests
// This helper module is consumed selectively by several integration test
// files; keep the unused pieces available without warnings per target.
#![allow(dead_code)]

use std::any::Any;

use open_methods::{CallResult, ClassDesc, ClassIntrospection, Dynamic};

struct TestClass {
    name: String,
    base: Option<ClassDesc>,
    interfaces: Vec<ClassDesc>,
    concrete: bool,
}

/// A hand-built class universe standing in for host introspection.
#[derive(Default)]
pub struct TestWorld {
    classes: Vec<TestClass>,
}

impl TestWorld {
    pub fn new() -> Self {
        TestWorld::default()
    }

    /// A non-concrete class with no base: an interface.
    pub fn interface(&mut self, name: &str) -> ClassDesc {
        self.add(name, None, &[], false)
    }

    /// A non-concrete class with a base: an abstract class.
    pub fn abstract_class(&mut self, name: &str, base: Option<ClassDesc>) -> ClassDesc {
        self.add(name, base, &[], false)
    }

    /// A concrete class.
    pub fn class(
        &mut self,
        name: &str,
        base: Option<ClassDesc>,
        interfaces: &[ClassDesc],
    ) -> ClassDesc {
        self.add(name, base, interfaces, true)
    }

    pub fn add(
        &mut self,
        name: &str,
        base: Option<ClassDesc>,
        interfaces: &[ClassDesc],
        concrete: bool,
    ) -> ClassDesc {
        let desc = ClassDesc(self.classes.len() as u64);
        self.classes.push(TestClass {
            name: name.to_string(),
            base,
            interfaces: interfaces.to_vec(),
            concrete,
        });
        desc
    }
}

impl ClassIntrospection for TestWorld {
    fn all_classes(&self) -> Vec<ClassDesc> {
        (0..self.classes.len() as u64).map(ClassDesc).collect()
    }

    fn class_name(&self, class: ClassDesc) -> String {
        self.classes[class.0 as usize].name.clone()
    }

    fn base(&self, class: ClassDesc) -> Option<ClassDesc> {
        self.classes[class.0 as usize].base
    }

    fn interfaces(&self, class: ClassDesc) -> Vec<ClassDesc> {
        self.classes[class.0 as usize].interfaces.clone()
    }

    fn is_concrete(&self, class: ClassDesc) -> bool {
        self.classes[class.0 as usize].concrete
    }
}

/// A heap object whose dynamic type is the class it was created with.
pub struct Obj {
    class: ClassDesc,
}

impl Obj {
    pub fn new(class: ClassDesc) -> Self {
        Obj { class }
    }
}

impl Dynamic for Obj {
    fn class_desc(&self) -> ClassDesc {
        self.class
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Box a `&str` the way the scenario overrides return their answers.
pub fn string_result(value: &str) -> CallResult {
    Ok(Box::new(value.to_string()))
}

/// Unwrap a successful call into its string payload.
pub fn into_string(result: CallResult) -> String {
    *result
        .expect("call failed")
        .downcast::<String>()
        .expect("override returned a non-string value")
}
