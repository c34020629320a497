//! Tokenizer, parser and tree-walking interpreter for a small scripting
//! language written in English phrases:
//!
//! ```
//! let run = wordy::run("x is now 9 plus 1\noutput x").unwrap();
//! assert_eq!(run.output, vec!["10".to_string()]);
//! ```

use std::io;

pub mod ast;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::Error;
pub use interpreter::{Environment, Interpreter, Value};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Value of the program's last statement.
    pub value: Value,
    /// Printed lines, in execution order.
    pub output: Vec<String>,
    pub environment: Environment,
}

/// Tokenizes and parses `source` without running it.
pub fn parse(source: &str) -> Result<ast::Block, Error> {
    let tokens = lexer::tokenize(source)?;
    Ok(parser::parse_tokens(&tokens)?)
}

/// Runs `source` with no input available.
pub fn run(source: &str) -> Result<Execution, Error> {
    run_with_input(source, "")
}

/// Runs `source`, answering each `input` statement with the next line of
/// `input`.
pub fn run_with_input(source: &str, input: &str) -> Result<Execution, Error> {
    let program = parse(source)?;
    let mut interpreter = Interpreter::new(input.as_bytes(), io::sink());
    let value = interpreter.evaluate(&program)?;
    let (environment, output) = interpreter.into_parts();
    Ok(Execution {
        value,
        output,
        environment,
    })
}
