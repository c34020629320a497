use std::fmt;

use crate::ast::{BinaryOperator, ComparisonOperator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Print, // output
    Input, // input
    If,    // if
    Else,  // otherwise
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Keyword::Print => "output",
            Keyword::Input => "input",
            Keyword::If => "if",
            Keyword::Else => "otherwise",
        };
        f.write_str(word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind<'a> {
    Number(f64),
    String(&'a str),
    Identifier(&'a str),
    Keyword(Keyword),

    // Phrases
    Operator(BinaryOperator),       // plus, minus, times, divide
    Comparison(ComparisonOperator), // equals, is not, is greater than, is less than
    Assign,                         // is now

    // Structural
    Newline,
    Indent(usize),
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "number {value}"),
            TokenKind::String(value) => write!(f, "string \"{value}\""),
            TokenKind::Identifier(name) => write!(f, "identifier '{name}'"),
            TokenKind::Keyword(keyword) => write!(f, "keyword '{keyword}'"),
            TokenKind::Operator(op) => write!(f, "operator '{op}'"),
            TokenKind::Comparison(op) => write!(f, "comparison '{op}'"),
            TokenKind::Assign => f.write_str("'is now'"),
            TokenKind::Newline => f.write_str("newline"),
            TokenKind::Indent(level) => write!(f, "indent (level {level})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind<'a>, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.span.line, self.span.column, self.kind)
    }
}
