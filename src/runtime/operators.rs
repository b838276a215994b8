//! Operator table.
//!
//! Direct enum dispatch over already-forced operands. Division by zero is the
//! one case that produces a Brewin exception (`div0`) instead of a value; every
//! other failure is a fatal type or overflow error.

use crate::error::{Error, Result};
use crate::parser::{BinaryOp, UnaryOp};
use crate::runtime::{Forced, Value};

/// Exception raised by integer division by zero
pub const DIV_ZERO: &str = "div0";

#[inline]
fn checked_arith(result: Option<i64>, op: BinaryOp) -> Result<Forced> {
    result
        .map(|n| Forced::Value(Value::Int(n)))
        .ok_or_else(|| Error::IntegerOverflow { op: op.to_string() })
}

/// Floor division, rounding toward negative infinity
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

#[cold]
fn binary_type_mismatch(op: BinaryOp, left: &Value, right: &Value) -> Error {
    Error::type_error(format!(
        "invalid operands for `{}`: {} and {}",
        op,
        left.type_name(),
        right.type_name()
    ))
}

/// Evaluate a binary operation on forced operands
pub fn evaluate_binary(op: BinaryOp, left: Value, right: Value) -> Result<Forced> {
    match op {
        BinaryOp::Eq => return Ok(Forced::Value(Value::Bool(left == right))),
        BinaryOp::NotEq => return Ok(Forced::Value(Value::Bool(left != right))),
        _ => {}
    }

    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(op, *a, *b)
            .unwrap_or_else(|| Err(binary_type_mismatch(op, &left, &right))),
        (Value::String(a), Value::String(b)) if op == BinaryOp::Add => {
            Ok(Forced::Value(Value::String(format!("{}{}", a, b))))
        }
        (Value::Bool(a), Value::Bool(b)) => match op {
            BinaryOp::And => Ok(Forced::Value(Value::Bool(*a && *b))),
            BinaryOp::Or => Ok(Forced::Value(Value::Bool(*a || *b))),
            _ => Err(binary_type_mismatch(op, &left, &right)),
        },
        _ => Err(binary_type_mismatch(op, &left, &right)),
    }
}

/// Integer operators; `None` if `op` does not apply to integers
fn eval_int_binary(op: BinaryOp, a: i64, b: i64) -> Option<Result<Forced>> {
    let bool_value = |b: bool| Ok(Forced::Value(Value::Bool(b)));
    Some(match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), op),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), op),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), op),
        BinaryOp::Div if b == 0 => Ok(Forced::Raised(DIV_ZERO.to_string())),
        BinaryOp::Div => checked_arith(floor_div(a, b), op),
        BinaryOp::Lt => bool_value(a < b),
        BinaryOp::LtEq => bool_value(a <= b),
        BinaryOp::Gt => bool_value(a > b),
        BinaryOp::GtEq => bool_value(a >= b),
        BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::And | BinaryOp::Or => return None,
    })
}

/// Evaluate a unary operation on a forced operand
pub fn evaluate_unary(op: UnaryOp, value: Value) -> Result<Value> {
    match (op, &value) {
        (UnaryOp::Neg, Value::Int(n)) => n.checked_neg().map(Value::Int).ok_or_else(|| {
            Error::IntegerOverflow {
                op: "negation".to_string(),
            }
        }),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        _ => Err(Error::type_error(format!(
            "invalid operand for unary `{}`: {}",
            op,
            value.type_name()
        ))),
    }
}

/// Left operand of `&&`/`||` as a boolean
pub fn logical_operand(op: BinaryOp, value: &Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| {
        Error::type_error(format!(
            "`{}` expects bool operands, got {}",
            op,
            value.type_name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn int(op: BinaryOp, a: i64, b: i64) -> Forced {
        evaluate_binary(op, Value::Int(a), Value::Int(b)).unwrap()
    }

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(int(BinaryOp::Add, 3, 4), Forced::Value(Value::Int(7)));
        assert_eq!(int(BinaryOp::Sub, 3, 4), Forced::Value(Value::Int(-1)));
        assert_eq!(int(BinaryOp::Mul, 10, 2), Forced::Value(Value::Int(20)));
        assert_eq!(int(BinaryOp::Lt, 1, 2), Forced::Value(Value::Bool(true)));
        assert_eq!(int(BinaryOp::GtEq, 1, 2), Forced::Value(Value::Bool(false)));
    }

    #[test]
    fn test_floor_division() {
        assert_eq!(int(BinaryOp::Div, 5, 2), Forced::Value(Value::Int(2)));
        assert_eq!(int(BinaryOp::Div, -7, 2), Forced::Value(Value::Int(-4)));
        assert_eq!(int(BinaryOp::Div, 7, -2), Forced::Value(Value::Int(-4)));
        assert_eq!(int(BinaryOp::Div, -8, -2), Forced::Value(Value::Int(4)));
    }

    #[test]
    fn test_division_by_zero_raises() {
        assert_eq!(int(BinaryOp::Div, 5, 0), Forced::Raised("div0".to_string()));
    }

    #[test]
    fn test_overflow_is_fatal() {
        let err = evaluate_binary(BinaryOp::Add, Value::Int(i64::MAX), Value::Int(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fault);
        let err = evaluate_binary(BinaryOp::Div, Value::Int(i64::MIN), Value::Int(-1)).unwrap_err();
        assert!(matches!(err, Error::IntegerOverflow { .. }));
    }

    #[test]
    fn test_equality_is_total() {
        assert_eq!(
            evaluate_binary(BinaryOp::Eq, Value::Int(1), Value::Bool(true)).unwrap(),
            Forced::Value(Value::Bool(false))
        );
        assert_eq!(
            evaluate_binary(BinaryOp::NotEq, Value::Int(1), Value::Bool(true)).unwrap(),
            Forced::Value(Value::Bool(true))
        );
        assert_eq!(
            evaluate_binary(BinaryOp::Eq, Value::Nil, Value::Nil).unwrap(),
            Forced::Value(Value::Bool(true))
        );
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            evaluate_binary(BinaryOp::Add, Value::from("ab"), Value::from("cd")).unwrap(),
            Forced::Value(Value::from("abcd"))
        );
        let err = evaluate_binary(BinaryOp::Sub, Value::from("ab"), Value::from("cd")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_mixed_operands_are_type_errors() {
        for op in [BinaryOp::Add, BinaryOp::Mul, BinaryOp::Lt, BinaryOp::And] {
            let err = evaluate_binary(op, Value::Int(1), Value::from("1")).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Type);
        }
        let err = evaluate_binary(BinaryOp::And, Value::Int(1), Value::Int(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_unary() {
        assert_eq!(evaluate_unary(UnaryOp::Neg, Value::Int(5)).unwrap(), Value::Int(-5));
        assert_eq!(evaluate_unary(UnaryOp::Not, Value::Bool(true)).unwrap(), Value::Bool(false));
        assert!(evaluate_unary(UnaryOp::Neg, Value::Bool(true)).is_err());
        assert!(evaluate_unary(UnaryOp::Not, Value::Int(0)).is_err());
    }

    #[test]
    fn test_logical_operand() {
        assert!(logical_operand(BinaryOp::And, &Value::Bool(true)).unwrap());
        assert!(logical_operand(BinaryOp::Or, &Value::Nil).is_err());
    }
}
