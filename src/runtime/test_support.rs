//! Program tables shared by the runtime unit tests.

use std::sync::Arc;

use crate::runtime::{
    bootstrap::{Runtime, RuntimeConfig},
    error::RuntimeResult,
    tables::{Constructor, ProgramTables, TypeEntry},
    type_id::TypeId,
    value::Value,
};

pub const ADD: usize = 0;
pub const COLLECT3: usize = 1;
pub const DESCRIBE: usize = 2;
pub const CONSTANT: usize = 3;

pub const PAIR: TypeId = TypeId::User(0);
pub const OPTION: TypeId = TypeId::User(1);
pub const POINT: TypeId = TypeId::User(2);

pub const NONE_TAG: usize = 0;
pub const SOME_TAG: usize = 1;

fn add(rt: &Runtime, args: &[Value]) -> RuntimeResult<Value> {
    let sum = rt.unbox_int(&args[0])? + rt.unbox_int(&args[1])?;
    Ok(rt.box_int(sum))
}

fn collect3(rt: &Runtime, args: &[Value]) -> RuntimeResult<Value> {
    Ok(rt.box_array(args.to_vec()))
}

fn describe(rt: &Runtime, args: &[Value]) -> RuntimeResult<Value> {
    let text = format!("<{}>", rt.render(&args[0])?);
    Ok(rt.box_string(text))
}

fn constant(rt: &Runtime, _args: &[Value]) -> RuntimeResult<Value> {
    Ok(rt.box_int(7))
}

pub fn fixture_tables() -> ProgramTables {
    let mut builder = ProgramTables::builder();
    builder.add_rust_function("add", 2, add);
    builder.add_rust_function("collect3", 3, collect3);
    builder.add_rust_function("describe", 1, describe);
    builder.add_rust_function("constant", 0, constant);

    builder.add_type(TypeEntry::new(
        "Pair",
        vec![Constructor::new("Pair", &["first", "second"])],
    ));
    builder.add_type(TypeEntry::new(
        "Option",
        vec![Constructor::new("None", &[]), Constructor::new("Some", &["value"])],
    ));
    builder.add_type(TypeEntry::new(
        "Point",
        vec![Constructor::new("Point", &["x", "y"])],
    ));

    builder.build().unwrap()
}

pub fn fixture_runtime() -> Runtime {
    Runtime::with_config(Arc::new(fixture_tables()), RuntimeConfig::default())
}

pub fn empty_runtime() -> Runtime {
    Runtime::with_config(Arc::new(ProgramTables::default()), RuntimeConfig::default())
}

pub fn pair(rt: &Runtime, first: i64, second: i64) -> Value {
    rt.box_data(PAIR, 0, vec![rt.box_int(first), rt.box_int(second)])
        .unwrap()
}

pub fn some(rt: &Runtime, value: Value) -> Value {
    rt.box_data(OPTION, SOME_TAG, vec![value]).unwrap()
}

pub fn none(rt: &Runtime) -> Value {
    rt.box_data(OPTION, NONE_TAG, vec![]).unwrap()
}
