use std::cmp::Ordering;
use std::fmt;

use crate::ast::{BinaryOperator, ComparisonOperator};

use super::error::{RuntimeError, RuntimeResult};

/// Runtime value model used by the tree-walking interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Boolean(bool),
    Nothing,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Boolean(_) => "boolean",
            Value::Nothing => "nothing",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Only numbers and text can be bound to a variable.
    pub fn is_storable(&self) -> bool {
        matches!(self, Value::Number(_) | Value::Text(_))
    }

    /// Coerces a line of external input: purely numeric text becomes a
    /// number, anything else stays text.
    pub fn from_input(line: &str) -> Self {
        if is_numeric_literal(line)
            && let Ok(value) = line.parse::<f64>()
        {
            return Value::Number(value);
        }
        Value::Text(line.to_string())
    }

    pub(super) fn binary(self, op: BinaryOperator, right: Value) -> RuntimeResult<Value> {
        match (self, right) {
            (Value::Number(left), Value::Number(right)) => match op {
                BinaryOperator::Add => Ok(Value::Number(left + right)),
                BinaryOperator::Sub => Ok(Value::Number(left - right)),
                BinaryOperator::Mul => Ok(Value::Number(left * right)),
                BinaryOperator::Div if right == 0.0 => Err(RuntimeError::DivisionByZero),
                BinaryOperator::Div => Ok(Value::Number(left / right)),
            },
            (Value::Text(mut left), Value::Text(right)) if op == BinaryOperator::Add => {
                left.push_str(&right);
                Ok(Value::Text(left))
            }
            (left, right) => Err(RuntimeError::TypeMismatch {
                operation: op.to_string(),
                left: left.type_name(),
                right: right.type_name(),
            }),
        }
    }

    pub(super) fn compare(&self, op: ComparisonOperator, right: &Value) -> RuntimeResult<bool> {
        let ordering = match (self, right) {
            (Value::Number(left), Value::Number(right)) => left.partial_cmp(right),
            (Value::Text(left), Value::Text(right)) => Some(left.cmp(right)),
            _ if is_equality(op) => {
                let equal = self == right;
                return Ok(equal == (op == ComparisonOperator::Equal));
            }
            _ => {
                return Err(RuntimeError::TypeMismatch {
                    operation: op.to_string(),
                    left: self.type_name(),
                    right: right.type_name(),
                });
            }
        };
        Ok(holds(op, ordering))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{value}"),
            Value::Text(value) => f.write_str(value),
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Nothing => Ok(()),
        }
    }
}

fn is_equality(op: ComparisonOperator) -> bool {
    matches!(op, ComparisonOperator::Equal | ComparisonOperator::NotEqual)
}

fn holds(op: ComparisonOperator, ordering: Option<Ordering>) -> bool {
    match op {
        ComparisonOperator::Equal => ordering == Some(Ordering::Equal),
        ComparisonOperator::NotEqual => ordering != Some(Ordering::Equal),
        ComparisonOperator::Greater => ordering == Some(Ordering::Greater),
        ComparisonOperator::Less => ordering == Some(Ordering::Less),
        ComparisonOperator::GreaterEqual => {
            matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
        }
        ComparisonOperator::LessEqual => {
            matches!(ordering, Some(Ordering::Less | Ordering::Equal))
        }
    }
}

/// Same grammar as number literals in source: digits, optionally `.` and more
/// digits.
fn is_numeric_literal(text: &str) -> bool {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    !whole.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.is_none_or(|digits| digits.bytes().all(|b| b.is_ascii_digit()))
}
