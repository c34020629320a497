use std::io;

use thiserror::Error;

/// Typed errors produced by the tree-walking interpreter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Unsupported operand types for '{operation}': {left} and {right}")]
    TypeMismatch {
        operation: String,
        left: &'static str,
        right: &'static str,
    },
    #[error("Expected a number for {context}, got {got}")]
    ExpectedNumber {
        context: &'static str,
        got: &'static str,
    },
    #[error("Cannot store a {type_name} value in variable '{name}'")]
    UnstorableValue {
        name: String,
        type_name: &'static str,
    },
    #[error("No input left to read into '{name}'")]
    InputExhausted { name: String },
    #[error("I/O failure: {message}")]
    Io { message: String },
}

impl From<io::Error> for RuntimeError {
    fn from(error: io::Error) -> Self {
        RuntimeError::Io {
            message: error.to_string(),
        }
    }
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
