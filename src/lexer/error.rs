use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Invalid character '{character}' at line {line}, column {column}")]
    InvalidCharacter {
        character: char,
        line: usize,
        column: usize,
    },
    #[error("Only one operator allowed per line: found a second operator '{operator}' at line {line}, column {column}")]
    DuplicateOperator {
        operator: String,
        line: usize,
        column: usize,
    },
    #[error("Expected {expected}, found {found} at line {line}, column {column}")]
    UnexpectedPhrase {
        expected: &'static str,
        found: String,
        line: usize,
        column: usize,
    },
    #[error("Expected a number or identifier in comparison, found {found} at line {line}, column {column}")]
    ExpectedOperand {
        found: String,
        line: usize,
        column: usize,
    },
    #[error("Unterminated string literal at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },
    /// `f64` rejected a scanned literal. Unreachable while the number grammar
    /// stays `digits[.digits]`; `read_number` reports it instead of panicking.
    #[error("Invalid number literal '{literal}' at line {line}, column {column}")]
    InvalidNumber {
        literal: String,
        line: usize,
        column: usize,
    },
}

impl LexError {
    /// Source position (line, column) the error points at.
    pub fn position(&self) -> (usize, usize) {
        match self {
            LexError::InvalidCharacter { line, column, .. }
            | LexError::DuplicateOperator { line, column, .. }
            | LexError::UnexpectedPhrase { line, column, .. }
            | LexError::ExpectedOperand { line, column, .. }
            | LexError::UnterminatedString { line, column }
            | LexError::InvalidNumber { line, column, .. } => (*line, *column),
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
