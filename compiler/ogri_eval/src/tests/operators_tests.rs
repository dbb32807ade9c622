//! Tests for binary operator implementations.

use crate::operators::evaluate_binary;
use ogri_ir::BinaryOp;
use ogri_runtime::{EvalErrorKind, Value};

#[test]
fn test_int_operations() {
    assert_eq!(
        evaluate_binary(Value::Int(2), Value::Int(3), BinaryOp::Add).unwrap(),
        Value::Int(5)
    );
    assert_eq!(
        evaluate_binary(Value::Int(5), Value::Int(3), BinaryOp::Sub).unwrap(),
        Value::Int(2)
    );
    assert_eq!(
        evaluate_binary(Value::Int(2), Value::Int(3), BinaryOp::Mul).unwrap(),
        Value::Int(6)
    );
    assert_eq!(
        evaluate_binary(Value::Int(7), Value::Int(2), BinaryOp::Div).unwrap(),
        Value::Int(3)
    );
    assert_eq!(
        evaluate_binary(Value::Int(7), Value::Int(2), BinaryOp::Mod).unwrap(),
        Value::Int(1)
    );
}

#[test]
fn test_int_division_truncates_toward_zero() {
    assert_eq!(
        evaluate_binary(Value::Int(-7), Value::Int(2), BinaryOp::Div).unwrap(),
        Value::Int(-3)
    );
    assert_eq!(
        evaluate_binary(Value::Int(-7), Value::Int(2), BinaryOp::Mod).unwrap(),
        Value::Int(-1)
    );
}

#[test]
fn test_int_overflow_wraps() {
    assert_eq!(
        evaluate_binary(Value::Int(i64::MAX), Value::Int(1), BinaryOp::Add).unwrap(),
        Value::Int(i64::MIN)
    );
    assert_eq!(
        evaluate_binary(Value::Int(i64::MIN), Value::Int(-1), BinaryOp::Div).unwrap(),
        Value::Int(i64::MIN)
    );
}

#[test]
fn test_division_by_zero() {
    for op in [BinaryOp::Div, BinaryOp::Mod] {
        let err = evaluate_binary(Value::Int(1), Value::Int(0), op).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivideByZero);
    }
    let err = evaluate_binary(Value::Float(1.0), Value::Float(0.0), BinaryOp::Div).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivideByZero);
}

#[test]
fn test_comparisons() {
    let cases = [
        (BinaryOp::Lt, 2, 3, true),
        (BinaryOp::Gt, 3, 2, true),
        (BinaryOp::Eq, 2, 2, true),
        (BinaryOp::NotEq, 2, 2, false),
        (BinaryOp::LtEq, 2, 2, true),
        (BinaryOp::GtEq, 1, 2, false),
    ];
    for (op, a, b, expected) in cases {
        assert_eq!(
            evaluate_binary(Value::Int(a), Value::Int(b), op).unwrap(),
            Value::Bool(expected),
            "{a} {} {b}",
            op.as_symbol()
        );
    }
}

#[test]
fn test_float_operations() {
    assert_eq!(
        evaluate_binary(Value::Float(1.5), Value::Float(2.0), BinaryOp::Mul).unwrap(),
        Value::Float(3.0)
    );
    assert_eq!(
        evaluate_binary(Value::Float(1.5), Value::Float(1.5), BinaryOp::Eq).unwrap(),
        Value::Bool(true)
    );
    let err = evaluate_binary(Value::Float(5.0), Value::Float(2.0), BinaryOp::Mod).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::UnsupportedOperator { ref op, .. } if op == "%"
    ));
}

#[test]
fn test_mixed_numbers_promote_to_float() {
    assert_eq!(
        evaluate_binary(Value::Int(1), Value::Float(0.5), BinaryOp::Add).unwrap(),
        Value::Float(1.5)
    );
    assert_eq!(
        evaluate_binary(Value::Float(3.0), Value::Int(2), BinaryOp::Div).unwrap(),
        Value::Float(1.5)
    );
    assert_eq!(
        evaluate_binary(Value::Int(2), Value::Float(2.0), BinaryOp::Eq).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_string_concatenation() {
    let result = evaluate_binary(
        Value::string("hello"),
        Value::string(" world"),
        BinaryOp::Add,
    )
    .unwrap();
    assert_eq!(result, Value::string("hello world"));
}

#[test]
fn test_string_equality_only() {
    assert_eq!(
        evaluate_binary(Value::string("a"), Value::string("a"), BinaryOp::Eq).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(Value::string("a"), Value::string("b"), BinaryOp::NotEq).unwrap(),
        Value::Bool(true)
    );
    let err = evaluate_binary(Value::string("a"), Value::string("b"), BinaryOp::Lt).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::UnsupportedOperator { .. }));
}

#[test]
fn test_mismatched_operands() {
    let err = evaluate_binary(Value::string("a"), Value::Int(1), BinaryOp::Add).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "compatible operands for `+`".to_string(),
            got: "string and int".to_string(),
        }
    );
    assert!(evaluate_binary(Value::list(vec![]), Value::Int(1), BinaryOp::Eq).is_err());
}

#[test]
fn test_logical_operators_return_the_deciding_operand() {
    assert_eq!(
        evaluate_binary(Value::Int(0), Value::string("x"), BinaryOp::And).unwrap(),
        Value::Int(0)
    );
    assert_eq!(
        evaluate_binary(Value::Int(2), Value::string("x"), BinaryOp::And).unwrap(),
        Value::string("x")
    );
    assert_eq!(
        evaluate_binary(Value::list(vec![]), Value::Int(9), BinaryOp::Or).unwrap(),
        Value::Int(9)
    );
}
