use thiserror::Error;

use crate::interpreter::RuntimeError;
use crate::lexer::LexError;
use crate::parser::SyntaxError;

/// Failure of any pipeline stage. Each stage stops at its first error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}
