use std::sync::Arc;

use kiln::{
    diagnostics::Position,
    runtime::{
        Constructor, ProgramTables, Runtime, RuntimeConfig, RuntimeError, RuntimeResult, TypeEntry,
        TypeId, Value, BinaryOp, alloc_stats,
    },
};

const INC: usize = 0;
const MAP: usize = 1;
const LABEL: usize = 2;

fn inc(rt: &Runtime, args: &[Value]) -> RuntimeResult<Value> {
    rt.binary_op(BinaryOp::Add, &args[0], &rt.box_int(1))
}

/// map(f, xs): applies a closure to every element of an array.
fn map(rt: &Runtime, args: &[Value]) -> RuntimeResult<Value> {
    let elements = rt.unbox_array(&args[1])?;
    let mut out = rt.create_array(elements.len());
    for (slot, element) in out.iter_mut().zip(elements) {
        *slot = rt.apply(&args[0], std::slice::from_ref(element), Position::default())?;
    }
    Ok(rt.box_array(out))
}

fn label(rt: &Runtime, args: &[Value]) -> RuntimeResult<Value> {
    let parts = rt.box_array(vec![rt.make_string("#"), rt.to_string(&args[0])?]);
    rt.concat(&parts)
}

fn runtime() -> (Runtime, TypeId) {
    let mut builder = ProgramTables::builder();
    builder.add_rust_function("inc", 1, inc);
    builder.add_rust_function("map", 2, map);
    builder.add_rust_function("label", 1, label);
    let tree = builder.add_type(TypeEntry::new(
        "Tree",
        vec![
            Constructor::new("Leaf", &[]),
            Constructor::new("Node", &["left", "value", "right"]),
        ],
    ));
    let tables = builder.build().unwrap();
    (Runtime::with_config(Arc::new(tables), RuntimeConfig::default()), tree)
}

#[test]
fn closures_compose_through_apply() {
    let (rt, _) = runtime();
    let xs = rt.box_array(vec![rt.box_int(1), rt.box_int(2), rt.box_int(3)]);
    let map_inc = rt.box_closure(MAP, vec![rt.box_closure(INC, vec![])]);

    let result = rt.apply(&map_inc, &[xs], Position::new(1, 1)).unwrap();
    assert_eq!(rt.render(&result).unwrap(), "[2, 3, 4]");
}

#[test]
fn method_sugar_over_user_values() {
    let (rt, tree) = runtime();
    let leaf = rt.box_data(tree, 0, vec![]).unwrap();
    let node = rt
        .box_data(tree, 1, vec![leaf.clone(), rt.box_int(5), leaf])
        .unwrap();

    let value = rt.select(&node, &rt.box_error("value"), Position::default()).unwrap();
    assert_eq!(rt.unbox_int(&value).unwrap(), 5);

    let labelled = rt
        .select(&value, &rt.box_closure(LABEL, vec![]), Position::default())
        .unwrap();
    assert_eq!(rt.unbox_str(&labelled).unwrap(), "#5");

    assert_eq!(rt.render(&node).unwrap(), "Node(Leaf, 5, Leaf)");
    assert!(rt.is_constructor_named(&node, &rt.make_string("Node")).unwrap());
    assert!(rt.check_tag(&node, 1).unwrap());
}

#[test]
fn errors_carry_codes_and_positions() {
    let (rt, _) = runtime();
    let closure = rt.box_closure(MAP, vec![]);
    let err = rt.apply(&closure, &[], Position::new(7, 3)).unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(err.error_code().code, "E1000");
    assert_eq!(err.position(), Some(Position::new(7, 3)));
    assert_eq!(
        err.to_string(),
        "[E1000] Function `map` takes 2 params, but got 0 captured and 0 supplied."
    );
}

#[test]
fn inner_failures_surface_from_nested_calls() {
    let (rt, _) = runtime();
    let xs = rt.box_array(vec![rt.box_int(1), rt.make_string("two")]);
    let map_inc = rt.box_closure(MAP, vec![rt.box_closure(INC, vec![])]);
    let err = rt.apply(&map_inc, &[xs], Position::default()).unwrap_err();
    assert_eq!(err, RuntimeError::type_mismatch("String", "Int"));
}

#[test]
fn environment_round_trip() {
    let (rt, _) = runtime();
    rt.init_environment(["kiln-app", "--verbose"]);
    assert_eq!(rt.render(&rt.get_args()).unwrap(), "[kiln-app, --verbose]");
}

#[test]
fn references_are_transparent_to_to_string() {
    let (rt, _) = runtime();
    let cell = rt.box_ref(rt.box_int(1));
    let old = rt.update_ref(&cell, rt.box_float64(0.5)).unwrap();
    assert_eq!(rt.unbox_int(&old).unwrap(), 1);
    assert_eq!(rt.render(&cell).unwrap(), " 0.500000000");
}

#[test]
fn interned_values_survive_arithmetic() {
    let (rt, _) = runtime();
    let before = alloc_stats::snapshot();
    let mut acc = rt.box_int(0);
    for _ in 0..50 {
        acc = rt.binary_op(BinaryOp::Add, &acc, &rt.box_int(1)).unwrap();
    }
    assert!(Value::ptr_eq(&acc, &rt.box_int(50)));
    assert_eq!(alloc_stats::snapshot().since(&before).boxes, 0);
}
