use crate::runtime::{
    error::RuntimeError,
    ops::BinaryOp,
    test_support::empty_runtime,
    value::Value,
};

#[test]
fn integer_comparisons() {
    let rt = empty_runtime();
    let cases = [
        (BinaryOp::Eq, 3, 3, true),
        (BinaryOp::Ne, 3, 3, false),
        (BinaryOp::Lt, 2, 3, true),
        (BinaryOp::Le, 3, 3, true),
        (BinaryOp::Ge, 2, 3, false),
        (BinaryOp::Gt, 4, 3, true),
    ];
    for (op, l, r, expected) in cases {
        let result = rt.binary_op(op, &rt.box_int(l), &rt.box_int(r)).unwrap();
        assert_eq!(rt.unbox_bool(&result).unwrap(), expected, "{:?} {} {}", op, l, r);
    }
}

#[test]
fn comparison_results_are_the_bool_singletons() {
    let rt = empty_runtime();
    let yes = rt.binary_op(BinaryOp::Lt, &rt.box_int(1), &rt.box_int(2)).unwrap();
    let no = rt.binary_op(BinaryOp::Gt, &rt.box_int(1), &rt.box_int(2)).unwrap();
    assert!(Value::ptr_eq(&yes, &rt.box_bool(true)));
    assert!(Value::ptr_eq(&no, &rt.box_bool(false)));
}

#[test]
fn large_ints_compare_by_value() {
    let rt = empty_runtime();
    let result = rt
        .binary_op(BinaryOp::Eq, &rt.box_int(1_000_000), &rt.box_int(1_000_000))
        .unwrap();
    assert!(rt.unbox_bool(&result).unwrap());
}

#[test]
fn bool_and_byte_comparisons() {
    let rt = empty_runtime();
    let result = rt
        .binary_op(BinaryOp::Lt, &rt.box_bool(false), &rt.box_bool(true))
        .unwrap();
    assert!(rt.unbox_bool(&result).unwrap());

    let result = rt.binary_op(BinaryOp::Lt, &rt.box_byte(-1), &rt.box_byte(1)).unwrap();
    assert!(rt.unbox_bool(&result).unwrap());
}

#[test]
fn nan_compares_unequal() {
    let rt = empty_runtime();
    let nan = rt.box_float64(f64::NAN);
    let eq = rt.binary_op(BinaryOp::Eq, &nan, &nan).unwrap();
    let ne = rt.binary_op(BinaryOp::Ne, &nan, &nan).unwrap();
    assert!(!rt.unbox_bool(&eq).unwrap());
    assert!(rt.unbox_bool(&ne).unwrap());
}

#[test]
fn strings_do_not_compare() {
    let rt = empty_runtime();
    let err = rt
        .binary_op(BinaryOp::Eq, &rt.make_string("a"), &rt.make_string("a"))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::UnsupportedOperandType { .. }));
}

#[test]
fn mixed_comparison_is_a_type_mismatch() {
    let rt = empty_runtime();
    let err = rt
        .binary_op(BinaryOp::Eq, &rt.box_bool(true), &rt.box_int(1))
        .unwrap_err();
    assert_eq!(err, RuntimeError::type_mismatch("Bool", "Int"));
}
