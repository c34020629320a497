use thiserror::Error;

use crate::ast::InvalidIdentifier;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Unexpected {found} at line {line}, column {column}: expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        line: usize,
        column: usize,
    },
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: &'static str },
    #[error("Can only assign to variables, found {target} at line {line}, column {column}")]
    InvalidAssignmentTarget {
        target: String,
        line: usize,
        column: usize,
    },
    #[error(
        "Unsupported indentation level {level} at line {line}, column {column}: a block is indented exactly one level (4 spaces)"
    )]
    UnsupportedIndentation {
        level: usize,
        line: usize,
        column: usize,
    },
    #[error("Nested 'if' blocks are not supported (line {line}, column {column})")]
    NestedBlock { line: usize, column: usize },
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),
}

pub type ParseResult<T> = Result<T, SyntaxError>;
