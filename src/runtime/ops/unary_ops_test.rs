use crate::runtime::{
    error::RuntimeError,
    ops::UnaryOp,
    test_support::empty_runtime,
};

#[test]
fn negate_int_and_double() {
    let rt = empty_runtime();
    let n = rt.unary_op(UnaryOp::Neg, &rt.box_int(5)).unwrap();
    assert_eq!(rt.unbox_int(&n).unwrap(), -5);

    let x = rt.unary_op(UnaryOp::Neg, &rt.box_float64(2.5)).unwrap();
    assert_eq!(rt.unbox_float64(&x).unwrap(), -2.5);
}

#[test]
fn negating_int_min_wraps() {
    let rt = empty_runtime();
    let n = rt.unary_op(UnaryOp::Neg, &rt.box_int(i64::MIN)).unwrap();
    assert_eq!(rt.unbox_int(&n).unwrap(), i64::MIN);
}

#[test]
fn negating_other_types_is_unsupported() {
    let rt = empty_runtime();
    let err = rt.unary_op(UnaryOp::Neg, &rt.box_bool(true)).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::UnsupportedOperation {
            kind: "unary",
            code: 1,
            type_name: "Bool".into()
        }
    );
}

#[test]
fn negating_unknown_reports_the_identifier() {
    let rt = empty_runtime();
    let err = rt.unary_op(UnaryOp::Neg, &rt.box_error("y")).unwrap_err();
    assert_eq!(err, RuntimeError::UndefinedIdentifier { name: "y".into() });
}

#[test]
fn unknown_unary_opcode() {
    let rt = empty_runtime();
    let err = rt.unary_op_code(2, &rt.box_int(1)).unwrap_err();
    assert!(matches!(err, RuntimeError::UnsupportedOperation { kind: "unary", code: 2, .. }));
    let n = rt.unary_op_code(1, &rt.box_int(1)).unwrap();
    assert_eq!(rt.unbox_int(&n).unwrap(), -1);
}
