//! Table construction properties and the global registry lifecycle.

mod common;

use common::{into_string, string_result, Obj, TestWorld};
use open_methods::{
    CallContext, CallResult, ClassDesc, Dynamic, MethodError, Registry, Runtime,
};

fn rock(_cx: &CallContext<'_>) -> CallResult {
    string_result("rock")
}

fn paper(_cx: &CallContext<'_>) -> CallResult {
    string_result("paper")
}

fn menagerie() -> (TestWorld, Registry, ClassDesc, ClassDesc) {
    let mut world = TestWorld::new();
    let animal = world.interface("Animal");
    let dog = world.class("Dog", None, &[animal]);
    let pitbull = world.class("Pitbull", Some(dog), &[]);
    world.class("Cat", None, &[animal]);

    let mut registry = Registry::new();
    let kick = registry.register_method("kick", &[animal]);
    registry.register_spec(kick, &[dog], rock);
    let meet = registry.register_method("meet", &[animal, animal]);
    registry.register_spec(meet, &[animal, animal], paper);
    registry.register_spec(meet, &[dog, dog], rock);
    (world, registry, dog, pitbull)
}

// ==================== Rebuild equivalence ====================

#[test]
fn test_updating_twice_builds_equal_tables() {
    let (world, registry, dog, pitbull) = menagerie();
    let first = Runtime::update(&registry, &world);
    let second = Runtime::update(&registry, &world);

    assert_eq!(first.report(), second.report());

    let kick = first.method_id("kick").unwrap();
    let pit = Obj::new(pitbull);
    let a = into_string(first.call(kick, &[&pit as &dyn Dynamic]));
    let b = into_string(second.call(kick, &[&pit as &dyn Dynamic]));
    assert_eq!(a, b);

    let meet = first.method_id("meet").unwrap();
    let dog_obj = Obj::new(dog);
    let a = into_string(first.call(meet, &[&dog_obj as &dyn Dynamic, &pit]));
    let b = into_string(second.call(meet, &[&dog_obj as &dyn Dynamic, &pit]));
    assert_eq!(a, b);
}

// ==================== Table density ====================

#[test]
fn test_table_length_is_the_product_of_group_counts() {
    let (world, registry, _, _) = menagerie();
    let report = Runtime::update(&registry, &world).report();

    let mut total = 0;
    for method in &report.methods {
        let product: usize = method.groups.iter().product();
        assert_eq!(method.table_len, product, "method '{}'", method.name);
        assert_eq!(method.groups.len(), method.arity);
        assert_eq!(method.strides[0], 1);
        total += method.table_len;
    }
    assert_eq!(report.dispatch_vector_len, total);
}

#[test]
fn test_classes_with_equal_override_sets_share_a_group() {
    // Cat and Dolphin select no override of kick; Dog and Pitbull differ.
    let mut world = TestWorld::new();
    let animal = world.interface("Animal");
    let dog = world.class("Dog", None, &[animal]);
    world.class("Pitbull", Some(dog), &[]);
    world.class("Cat", None, &[animal]);
    world.class("Dolphin", None, &[animal]);

    let mut registry = Registry::new();
    let kick = registry.register_method("kick", &[animal]);
    registry.register_spec(kick, &[dog], rock);
    let sit = registry.register_method("sit", &[animal]);
    registry.register_spec(sit, &[animal], paper);
    let report = Runtime::update(&registry, &world).report();

    // kick: Dog and Pitbull both select exactly the dog override, Cat and
    // Dolphin select nothing, so four classes collapse into two groups.
    assert_eq!(report.methods[0].groups, vec![2]);
    // sit: every concrete animal selects the single override.
    assert_eq!(report.methods[1].groups, vec![1]);
}

// ==================== Report serialization ====================

#[test]
fn test_report_serializes_to_json() {
    let (world, registry, _, _) = menagerie();
    let report = Runtime::update(&registry, &world).report();

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["methods"][0]["name"], "kick");
    assert_eq!(json["methods"][1]["arity"], 2);
    assert_eq!(
        json["dispatch_vector_len"],
        serde_json::json!(report.dispatch_vector_len)
    );
}

// ==================== Boundary behaviors ====================

#[test]
fn test_method_with_no_overrides_is_always_undefined() {
    let mut world = TestWorld::new();
    let animal = world.interface("Animal");
    let dog = world.class("Dog", None, &[animal]);

    let mut registry = Registry::new();
    let kick = registry.register_method("kick", &[animal]);
    let runtime = Runtime::update(&registry, &world);

    let obj = Obj::new(dog);
    let err = runtime.call(kick, &[&obj as &dyn Dynamic]).unwrap_err();
    assert_eq!(err, MethodError::not_implemented("kick"));
}

#[test]
#[should_panic(expected = "does not conform to the declared class")]
fn test_override_outside_the_declared_cone_panics() {
    let mut world = TestWorld::new();
    let animal = world.interface("Animal");
    let dog = world.class("Dog", None, &[animal]);
    let cat = world.class("Cat", None, &[animal]);

    let mut registry = Registry::new();
    // Cat participates through meet, but does not conform to Dog.
    registry.register_method("meet", &[animal]);
    let kick = registry.register_method("kick", &[dog]);
    registry.register_spec(kick, &[cat], rock);
    Runtime::update(&registry, &world);
}

#[test]
#[should_panic(expected = "outside its method's hierarchies")]
fn test_override_on_an_unknown_class_panics() {
    let mut world = TestWorld::new();
    let animal = world.interface("Animal");
    world.class("Dog", None, &[animal]);
    let stranger = world.class("Stranger", None, &[]);

    let mut registry = Registry::new();
    let kick = registry.register_method("kick", &[animal]);
    registry.register_spec(kick, &[stranger], rock);
    Runtime::update(&registry, &world);
}

// ==================== Global registry lifecycle ====================

// The only test that touches the process-global layer; the global registry
// seals once per process.
#[test]
fn test_global_registry_lifecycle() {
    let mut world = TestWorld::new();
    let animal = world.interface("Animal");
    let dog = world.class("Dog", None, &[animal]);

    let kick = open_methods::register_method("kick", &[animal]);
    open_methods::register_spec(kick, &[dog], rock);
    let runtime = open_methods::update(&world);

    let obj = Obj::new(dog);
    let result = runtime.call(kick, &[&obj as &dyn Dynamic]);
    assert_eq!(into_string(result), "rock");

    // The sealed runtime stays reachable.
    let again = open_methods::runtime();
    let result = again.call(kick, &[&obj as &dyn Dynamic]);
    assert_eq!(into_string(result), "rock");
}
