use std::io::{BufRead, Write};

use tracing::{debug, trace};

use crate::ast::{Block, Comparison, Identifier, Node};

mod environment;
mod error;
mod value;

pub use environment::Environment;
pub use error::{RuntimeError, RuntimeResult};
pub use value::Value;

/// AST-walking evaluator. Owns the environment for one run, reads `Input`
/// lines from `input` and writes each printed line to `sink`.
pub struct Interpreter<R, W> {
    environment: Environment,
    output: Vec<String>,
    input: R,
    sink: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, sink: W) -> Self {
        Self {
            environment: Environment::new(),
            output: Vec::new(),
            input,
            sink,
        }
    }

    /// Executes `program` and returns the value of its last statement.
    ///
    /// Bindings made before a failing statement are kept and remain visible
    /// through [`Interpreter::environment`].
    pub fn evaluate(&mut self, program: &Block) -> RuntimeResult<Value> {
        let value = self.exec_block(program)?;
        self.sink.flush()?;
        debug!(%value, lines = self.output.len(), "evaluated program");
        Ok(value)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Lines printed so far, in execution order.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn into_parts(self) -> (Environment, Vec<String>) {
        (self.environment, self.output)
    }

    fn exec_block(&mut self, block: &Block) -> RuntimeResult<Value> {
        let mut last = Value::Nothing;
        for statement in &block.statements {
            trace!(?statement, "execute statement");
            last = self.eval(statement)?;
        }
        Ok(last)
    }

    fn eval(&mut self, node: &Node) -> RuntimeResult<Value> {
        match node {
            Node::NumberLiteral(value) => Ok(Value::Number(*value)),
            Node::StringLiteral(value) => Ok(Value::Text(value.clone())),
            Node::VariableRef(name) => self.environment.load(name),
            Node::BinaryOp { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                left.binary(*op, right)
            }
            Node::Comparison(comparison) => self.eval_condition(comparison).map(Value::Boolean),
            Node::Assignment { name, value } => {
                let value = self.eval(value)?;
                self.bind(name, value)
            }
            Node::Print(value) => {
                let value = self.eval(value)?;
                self.emit(value.to_string())?;
                Ok(Value::Nothing)
            }
            Node::Input(target) => {
                let value = self.read_input(target)?;
                self.bind(target, value)
            }
            Node::Conditional {
                condition,
                body,
                else_body,
            } => {
                if self.eval_condition(condition)? {
                    self.exec_block(body)
                } else if let Some(else_body) = else_body {
                    self.exec_block(else_body)
                } else {
                    Ok(Value::Nothing)
                }
            }
            Node::ForLoop { count, body } => {
                let count = self.eval(count)?;
                let iterations = loop_count(&count)?;
                let mut last = Value::Nothing;
                for _ in 0..iterations {
                    last = self.exec_block(body)?;
                }
                Ok(last)
            }
            Node::WhileLoop { condition, body } => {
                // Repeats until the condition holds.
                let mut last = Value::Nothing;
                while !self.eval_condition(condition)? {
                    last = self.exec_block(body)?;
                }
                Ok(last)
            }
            Node::Block(block) => self.exec_block(block),
        }
    }

    fn eval_condition(&mut self, comparison: &Comparison) -> RuntimeResult<bool> {
        let left = self.eval(&comparison.left)?;
        let right = self.eval(&comparison.right)?;
        left.compare(comparison.op, &right)
    }

    fn bind(&mut self, name: &Identifier, value: Value) -> RuntimeResult<Value> {
        trace!(%name, %value, "bind");
        self.environment.store(name, value.clone())?;
        Ok(value)
    }

    fn emit(&mut self, line: String) -> RuntimeResult<()> {
        writeln!(self.sink, "{line}")?;
        self.output.push(line);
        Ok(())
    }

    fn read_input(&mut self, target: &Identifier) -> RuntimeResult<Value> {
        // Anything printed so far must be visible before blocking on input.
        self.sink.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RuntimeError::InputExhausted {
                name: target.to_string(),
            });
        }
        let line = line
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .unwrap_or(&line);
        trace!(%target, raw = line, "read input");
        Ok(Value::from_input(line))
    }
}

fn loop_count(count: &Value) -> RuntimeResult<u64> {
    let count = count.as_number().ok_or(RuntimeError::ExpectedNumber {
        context: "loop count",
        got: count.type_name(),
    })?;
    if count.is_nan() || count <= 0.0 {
        return Ok(0);
    }
    Ok(count.trunc() as u64)
}
