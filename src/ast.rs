//! Syntax tree produced by the parser and walked by the interpreter.
//!
//! Every node is immutable once built. The set of node kinds is closed, so the
//! interpreter matches on it exhaustively.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid variable name '{name}': variable names must start with a letter or '_'")]
pub struct InvalidIdentifier {
    pub name: String,
}

/// A variable name. Never empty, never starts with a digit, and contains only
/// letters, digits and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidIdentifier> {
        let name = name.into();
        let mut chars = name.chars();
        let valid = match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {
                chars.all(|c| c.is_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if valid {
            Ok(Self(name))
        } else {
            Err(InvalidIdentifier { name })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::Less => "<",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::LessEqual => "<=",
        };
        f.write_str(symbol)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Comparison {
    pub left: Box<Node>,
    pub op: ComparisonOperator,
    pub right: Box<Node>,
}

impl Comparison {
    pub fn new(left: Node, op: ComparisonOperator, right: Node) -> Self {
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    NumberLiteral(f64),
    StringLiteral(String),
    VariableRef(Identifier),
    BinaryOp {
        left: Box<Node>,
        op: BinaryOperator,
        right: Box<Node>,
    },
    Comparison(Comparison),
    Assignment {
        name: Identifier,
        value: Box<Node>,
    },
    Print(Box<Node>),
    Input(Identifier),
    Conditional {
        condition: Comparison,
        body: Block,
        else_body: Option<Block>,
    },
    ForLoop {
        count: Box<Node>,
        body: Block,
    },
    /// Runs `body` until `condition` holds; the condition is checked before
    /// every iteration.
    WhileLoop {
        condition: Comparison,
        body: Block,
    },
    Block(Block),
}

impl Node {
    pub fn binary(left: Node, op: BinaryOperator, right: Node) -> Self {
        Node::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn assignment(name: Identifier, value: Node) -> Self {
        Node::Assignment {
            name,
            value: Box::new(value),
        }
    }

    pub fn print(value: Node) -> Self {
        Node::Print(Box::new(value))
    }
}

/// Ordered statements, executed front to back.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Block {
    pub statements: Vec<Node>,
}

impl Block {
    pub fn new(statements: Vec<Node>) -> Self {
        Self { statements }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_letter_and_underscore_names() {
        assert!(Identifier::new("x").is_ok());
        assert!(Identifier::new("_tmp1").is_ok());
        assert!(Identifier::new("total_2").is_ok());
    }

    #[test]
    fn rejects_numeric_names() {
        let err = Identifier::new("5").expect_err("numeric name must be rejected");
        assert_eq!(err.name, "5");
        assert!(Identifier::new("9lives").is_err());
    }

    #[test]
    fn rejects_empty_and_punctuated_names() {
        assert!(Identifier::new("").is_err());
        assert!(Identifier::new("a-b").is_err());
        assert!(Identifier::new("a b").is_err());
    }

    #[test]
    fn operators_display_as_symbols() {
        assert_eq!(BinaryOperator::Div.to_string(), "/");
        assert_eq!(ComparisonOperator::NotEqual.to_string(), "!=");
    }
}
