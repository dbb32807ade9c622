//! Binary operator implementations.
//!
//! Dispatch is a direct match on the operand pair; the type set is closed.
//! Operands must share a category: strings with strings, numbers with
//! numbers (an `int` meeting a `float` is promoted). Integer arithmetic
//! wraps on overflow.

use ogri_ir::BinaryOp;
use ogri_runtime::{
    binary_type_mismatch, division_by_zero, unsupported_operator, EvalResult, Value,
};

/// Evaluate a binary operation on two already-evaluated operands.
///
/// `and`/`or` pick whichever operand decides the result; the interpreter
/// short-circuits them before the right operand is evaluated, so they only
/// reach this function when called directly.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::And => return Ok(if left.is_truthy() { right } else { left }),
        BinaryOp::Or => return Ok(if left.is_truthy() { left } else { right }),
        _ => {}
    }
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Float(a), Value::Float(b)) => eval_float_binary(*a, *b, op),
        (Value::Int(a), Value::Float(b)) => eval_float_binary(promote(*a), *b, op),
        (Value::Float(a), Value::Int(b)) => eval_float_binary(*a, promote(*b), op),
        (Value::Str(a), Value::Str(b)) => eval_string_binary(a, b, op),
        _ => Err(binary_type_mismatch(
            op.as_symbol(),
            left.type_name(),
            right.type_name(),
        )),
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "int-to-float promotion is part of the language's mixed arithmetic"
)]
#[inline]
fn promote(n: i64) -> f64 {
    n as f64
}

/// Binary operations on integers. Division truncates toward zero.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Int(a.wrapping_add(b)),
        BinaryOp::Sub => Value::Int(a.wrapping_sub(b)),
        BinaryOp::Mul => Value::Int(a.wrapping_mul(b)),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            Value::Int(a.wrapping_div(b))
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(division_by_zero());
            }
            Value::Int(a.wrapping_rem(b))
        }
        _ => Value::Bool(compare(a.cmp(&b), op)),
    };
    Ok(value)
}

/// Binary operations on floats. `%` is integer-only.
#[allow(clippy::float_cmp, reason = "language equality is exact")]
fn eval_float_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Float(a + b),
        BinaryOp::Sub => Value::Float(a - b),
        BinaryOp::Mul => Value::Float(a * b),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            Value::Float(a / b)
        }
        BinaryOp::Mod => return Err(unsupported_operator(op.as_symbol(), "float")),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::NotEq => Value::Bool(a != b),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        BinaryOp::And | BinaryOp::Or => {
            return Err(unsupported_operator(op.as_symbol(), "float"));
        }
    };
    Ok(value)
}

/// Binary operations on strings: concatenation and equality only.
fn eval_string_binary(a: &str, b: &str, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::Str(joined))
        }
        BinaryOp::Eq => Ok(Value::Bool(a == b)),
        BinaryOp::NotEq => Ok(Value::Bool(a != b)),
        _ => Err(unsupported_operator(op.as_symbol(), "string")),
    }
}

fn compare(ordering: std::cmp::Ordering, op: BinaryOp) -> bool {
    use std::cmp::Ordering;

    match op {
        BinaryOp::Eq => ordering == Ordering::Equal,
        BinaryOp::NotEq => ordering != Ordering::Equal,
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        _ => false,
    }
}
