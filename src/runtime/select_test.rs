use crate::{
    diagnostics::Position,
    runtime::{
        error::RuntimeError,
        interned::UNIMPLEMENTED_SELECT,
        test_support::{
            ADD, COLLECT3, DESCRIBE, NONE_TAG, OPTION, PAIR, POINT, SOME_TAG, fixture_runtime,
            none, pair, some,
        },
        type_id::TypeId,
        value::{Boxed, DataValue, Value},
    },
};

fn is_sentinel(value: &Value) -> bool {
    matches!(value.boxed(), Boxed::Unknown(name) if &**name == UNIMPLEMENTED_SELECT)
}

#[test]
fn select_reads_fields_by_name() {
    let rt = fixture_runtime();
    let p = pair(&rt, 1, 2);
    let first = rt.select(&p, &rt.box_error("first"), Position::default()).unwrap();
    let second = rt.select(&p, &rt.box_error("second"), Position::default()).unwrap();
    assert_eq!(rt.unbox_int(&first).unwrap(), 1);
    assert_eq!(rt.unbox_int(&second).unwrap(), 2);
}

#[test]
fn select_returns_the_stored_value_itself() {
    let rt = fixture_runtime();
    let inner = rt.make_string("payload");
    let wrapped = some(&rt, inner.clone());
    let value = rt.select(&wrapped, &rt.box_error("value"), Position::default()).unwrap();
    assert!(Value::ptr_eq(&value, &inner));
}

#[test]
fn missing_field_yields_the_sentinel() {
    let rt = fixture_runtime();
    let p = pair(&rt, 1, 2);
    let result = rt.select(&p, &rt.box_error("third"), Position::new(2, 5)).unwrap();
    assert!(is_sentinel(&result));
}

#[test]
fn sentinel_is_shared() {
    let rt = fixture_runtime();
    let a = rt.select(&rt.box_int(1), &rt.box_int(2), Position::default()).unwrap();
    let b = rt.select(&rt.box_unit(), &rt.box_unit(), Position::default()).unwrap();
    assert!(is_sentinel(&a));
    assert!(Value::ptr_eq(&a, &b));
}

#[test]
fn sentinel_fails_when_used() {
    let rt = fixture_runtime();
    let sentinel = rt.select(&rt.box_int(1), &rt.box_int(2), Position::default()).unwrap();
    let err = rt.unbox_int(&sentinel).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::UndefinedIdentifier {
            name: UNIMPLEMENTED_SELECT.into()
        }
    );
}

#[test]
fn closure_member_with_one_remaining_parameter_is_applied() {
    let rt = fixture_runtime();
    let describe = rt.box_closure(DESCRIBE, vec![]);
    let result = rt.select(&rt.box_int(5), &describe, Position::default()).unwrap();
    assert_eq!(rt.unbox_str(&result).unwrap(), "<5>");

    let add_ten = rt.box_closure(ADD, vec![rt.box_int(10)]);
    let result = rt.select(&rt.box_int(5), &add_ten, Position::default()).unwrap();
    assert_eq!(rt.unbox_int(&result).unwrap(), 15);
}

#[test]
fn method_sugar_applies_to_records_too() {
    let rt = fixture_runtime();
    let describe = rt.box_closure(DESCRIBE, vec![]);
    let result = rt.select(&pair(&rt, 1, 2), &describe, Position::default()).unwrap();
    assert_eq!(rt.unbox_str(&result).unwrap(), "<Pair(1, 2)>");
}

#[test]
fn closure_member_needing_more_arguments_is_not_applied() {
    let rt = fixture_runtime();
    let collect = rt.box_closure(COLLECT3, vec![]);
    let result = rt.select(&rt.box_int(5), &collect, Position::default()).unwrap();
    assert!(is_sentinel(&result));
}

#[test]
fn constructor_names_compare_over_the_shorter_length() {
    let rt = fixture_runtime();
    let value = some(&rt, rt.box_int(1));
    assert!(rt.is_constructor_named(&value, &rt.make_string("Some")).unwrap());
    assert!(rt.is_constructor_named(&value, &rt.make_string("Som")).unwrap());
    assert!(rt.is_constructor_named(&value, &rt.make_string("Something")).unwrap());
    assert!(!rt.is_constructor_named(&value, &rt.make_string("None")).unwrap());
}

#[test]
fn non_records_are_never_constructor_named() {
    let rt = fixture_runtime();
    assert!(!rt.is_constructor_named(&rt.box_int(1), &rt.make_string("Int")).unwrap());
}

#[test]
fn check_tag_compares_constructor_indices() {
    let rt = fixture_runtime();
    let value = some(&rt, rt.box_unit());
    assert!(rt.check_tag(&value, SOME_TAG).unwrap());
    assert!(!rt.check_tag(&value, NONE_TAG).unwrap());
    assert!(rt.check_tag(&none(&rt), NONE_TAG).unwrap());
}

#[test]
fn check_tag_rejects_non_records() {
    let rt = fixture_runtime();
    let err = rt.check_tag(&rt.box_int(0), 0).unwrap_err();
    assert_eq!(err, RuntimeError::type_mismatch("algebraic value", "Int"));
}

#[test]
fn box_data_validates_shape() {
    let rt = fixture_runtime();
    let err = rt.box_data(POINT, 0, vec![rt.box_int(1)]).unwrap_err();
    assert!(matches!(err, RuntimeError::MalformedRecord { ref type_name, .. } if type_name == "Point"));

    let err = rt.box_data(OPTION, 2, vec![]).unwrap_err();
    assert!(matches!(err, RuntimeError::MalformedRecord { .. }));

    let err = rt.box_data(TypeId::User(9), 0, vec![]).unwrap_err();
    assert!(matches!(err, RuntimeError::FunctionTypeNotFound { .. }));
}

#[test]
fn records_carry_their_type_identity() {
    let rt = fixture_runtime();
    assert_eq!(pair(&rt, 1, 2).type_tag(), PAIR);
    assert_eq!(rt.type_name(PAIR), "Pair");
}

#[test]
fn update_ref_returns_previous_contents() {
    let rt = fixture_runtime();
    let first = rt.make_string("first");
    let cell = rt.box_ref(first.clone());

    let previous = rt.update_ref(&cell, rt.make_string("second")).unwrap();
    assert!(Value::ptr_eq(&previous, &first));
    assert_eq!(rt.unbox_str(&rt.read_ref(&cell).unwrap()).unwrap(), "second");
}

#[test]
fn update_ref_requires_a_cell() {
    let rt = fixture_runtime();
    let err = rt.update_ref(&rt.box_int(1), rt.box_unit()).unwrap_err();
    assert_eq!(err, RuntimeError::type_mismatch("Ref", "Int"));
}

#[test]
fn short_record_is_malformed_not_a_panic() {
    let rt = fixture_runtime();
    let short = Value::alloc(Boxed::Data(DataValue {
        type_index: 0,
        tag: 0,
        values: Box::new([rt.box_int(1)]),
    }));
    let first = rt.select(&short, &rt.box_error("first"), Position::default()).unwrap();
    assert_eq!(rt.unbox_int(&first).unwrap(), 1);

    let err = rt.select(&short, &rt.box_error("second"), Position::default()).unwrap_err();
    assert!(matches!(err, RuntimeError::MalformedRecord { ref type_name, .. } if type_name == "Pair"));
}
