//! Unary operator implementations.

use ogri_ir::UnaryOp;
use ogri_runtime::{type_mismatch, EvalResult, Value};

/// Evaluate a unary operation.
///
/// `+` and `-` need a number; `not` negates truthiness of any value.
pub fn evaluate_unary(value: Value, op: UnaryOp) -> EvalResult {
    match (op, value) {
        (UnaryOp::Plus, v @ (Value::Int(_) | Value::Float(_))) => Ok(v),
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Plus | UnaryOp::Neg, v) => Err(type_mismatch(
            &format!("number for unary `{}`", op.as_symbol()),
            v.type_name(),
        )),
    }
}
