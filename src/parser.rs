use tracing::debug;

use crate::ast::{Block, Comparison, Identifier, Node};
use crate::token::{Keyword, Token, TokenKind};

mod error;

pub use error::{ParseResult, SyntaxError};

const VALUE: &str = "a number, string or identifier";

/// Result of consuming a single token: either a value node or a keyword that
/// the caller still has to act on.
enum Term<'t, 'a> {
    Value(Node, &'t Token<'a>),
    Keyword(Keyword, &'t Token<'a>),
}

/// Recursive-descent parser over an immutable token slice with one token of
/// lookahead.
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    position: usize,
    block_depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            position: 0,
            block_depth: 0,
        }
    }

    pub fn parse_program(mut self) -> ParseResult<Block> {
        let mut statements = Vec::new();
        while self.current().is_some() {
            if self.consume_newlines() {
                continue;
            }
            statements.push(self.expr()?);
        }
        Ok(Block::new(statements))
    }

    /// One statement. Only operator and assignment lines must end the line;
    /// any other term is returned as is and the next term starts a new
    /// statement.
    fn expr(&mut self) -> ParseResult<Node> {
        match self.term()? {
            Term::Keyword(Keyword::Print, _) => self.parse_print(),
            Term::Keyword(Keyword::If, token) => self.parse_if(token),
            Term::Keyword(Keyword::Input, _) => {
                let statement = self.parse_input()?;
                self.expect_statement_end()?;
                Ok(statement)
            }
            Term::Keyword(Keyword::Else, token) => Err(unexpected_token(token, "a statement")),
            Term::Value(left, token) => {
                let statement = match self.current_kind() {
                    Some(TokenKind::Operator(op)) => {
                        self.advance();
                        let right = self.value_term()?;
                        Node::binary(left, op, right)
                    }
                    Some(TokenKind::Assign) => self.parse_assignment(left, token)?,
                    _ => return Ok(left),
                };
                self.expect_statement_end()?;
                Ok(statement)
            }
        }
    }

    fn term(&mut self) -> ParseResult<Term<'t, 'a>> {
        let Some(token) = self.current() else {
            return Err(SyntaxError::UnexpectedEndOfInput {
                expected: "a statement or value",
            });
        };
        let term = match token.kind {
            TokenKind::Number(value) => Term::Value(Node::NumberLiteral(value), token),
            TokenKind::Identifier(name) => {
                Term::Value(Node::VariableRef(Identifier::new(name)?), token)
            }
            TokenKind::String(value) => Term::Value(Node::StringLiteral(value.to_string()), token),
            TokenKind::Keyword(keyword) => Term::Keyword(keyword, token),
            _ => return Err(unexpected_token(token, "a statement or value")),
        };
        self.advance();
        Ok(term)
    }

    fn value_term(&mut self) -> ParseResult<Node> {
        match self.term()? {
            Term::Value(node, _) => Ok(node),
            Term::Keyword(_, token) => Err(unexpected_token(token, VALUE)),
        }
    }

    /// A value optionally followed by one operator and a second value.
    fn operand(&mut self) -> ParseResult<Node> {
        let left = self.value_term()?;
        if let Some(TokenKind::Operator(op)) = self.current_kind() {
            self.advance();
            let right = self.value_term()?;
            return Ok(Node::binary(left, op, right));
        }
        Ok(left)
    }

    fn parse_print(&mut self) -> ParseResult<Node> {
        match self.current_kind() {
            Some(TokenKind::String(_)) => Ok(Node::print(self.value_term()?)),
            Some(TokenKind::Number(_) | TokenKind::Identifier(_)) => {
                Ok(Node::print(self.operand()?))
            }
            _ => Err(self.error("a string, number or identifier after 'output'")),
        }
    }

    fn parse_input(&mut self) -> ParseResult<Node> {
        match self.current_kind() {
            Some(TokenKind::Identifier(name)) => {
                self.advance();
                Ok(Node::Input(Identifier::new(name)?))
            }
            _ => Err(self.error("a variable name after 'input'")),
        }
    }

    fn parse_assignment(&mut self, target: Node, token: &Token<'a>) -> ParseResult<Node> {
        let Node::VariableRef(name) = target else {
            return Err(SyntaxError::InvalidAssignmentTarget {
                target: token.kind.to_string(),
                line: token.span.line,
                column: token.span.column,
            });
        };
        self.advance(); // Consume 'is now'
        let value = self.operand()?;
        Ok(Node::assignment(name, value))
    }

    fn parse_if(&mut self, if_token: &Token<'a>) -> ParseResult<Node> {
        if self.block_depth > 0 {
            return Err(SyntaxError::NestedBlock {
                line: if_token.span.line,
                column: if_token.span.column,
            });
        }

        let left = self.value_term()?;
        let Some(TokenKind::Comparison(op)) = self.current_kind() else {
            return Err(self.error("a comparison"));
        };
        self.advance();
        let right = self.value_term()?;
        let condition = Comparison::new(left, op, right);

        self.expect_newline()?;
        self.expect_indent()?;

        self.block_depth += 1;
        let mut statements = Vec::new();
        loop {
            match self.current_kind() {
                None => break,
                Some(TokenKind::Newline) => {
                    self.advance();
                    if !self.continue_block()? {
                        break;
                    }
                }
                Some(_) => statements.push(self.expr()?),
            }
        }
        self.block_depth -= 1;

        Ok(Node::Conditional {
            condition,
            body: Block::new(statements),
            else_body: None,
        })
    }

    /// Consumes a one-level indent at line start. Anything else ends the block.
    fn continue_block(&mut self) -> ParseResult<bool> {
        match self.current() {
            Some(Token {
                kind: TokenKind::Indent(1),
                ..
            }) => {
                self.advance();
                Ok(true)
            }
            Some(Token {
                kind: TokenKind::Indent(level),
                span,
            }) => Err(SyntaxError::UnsupportedIndentation {
                level: *level,
                line: span.line,
                column: span.column,
            }),
            _ => Ok(false),
        }
    }

    fn consume_newlines(&mut self) -> bool {
        let mut consumed = false;
        while matches!(self.current_kind(), Some(TokenKind::Newline)) {
            consumed = true;
            self.advance();
        }
        consumed
    }

    fn expect_statement_end(&mut self) -> ParseResult<()> {
        match self.current_kind() {
            None | Some(TokenKind::Newline) => Ok(()),
            Some(_) => Err(self.error("end of line")),
        }
    }

    fn expect_newline(&mut self) -> ParseResult<()> {
        if matches!(self.current_kind(), Some(TokenKind::Newline)) {
            self.advance();
            Ok(())
        } else {
            Err(self.error("newline"))
        }
    }

    fn expect_indent(&mut self) -> ParseResult<()> {
        if self.continue_block()? {
            Ok(())
        } else {
            Err(self.error("an indented block"))
        }
    }

    fn current(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.position)
    }

    fn current_kind(&self) -> Option<TokenKind<'a>> {
        self.current().map(|token| token.kind)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn error(&self, expected: &'static str) -> SyntaxError {
        match self.current() {
            Some(token) => unexpected_token(token, expected),
            None => SyntaxError::UnexpectedEndOfInput { expected },
        }
    }
}

fn unexpected_token(token: &Token<'_>, expected: &'static str) -> SyntaxError {
    SyntaxError::UnexpectedToken {
        found: token.kind.to_string(),
        expected,
        line: token.span.line,
        column: token.span.column,
    }
}

pub fn parse_tokens(tokens: &[Token<'_>]) -> ParseResult<Block> {
    let program = Parser::new(tokens).parse_program()?;
    debug!(statements = program.statements.len(), "parsed program");
    Ok(program)
}
