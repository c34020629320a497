use std::collections::VecDeque;
use std::{iter::Peekable, str::CharIndices};

use tracing::debug;

use crate::ast::{BinaryOperator, ComparisonOperator};
use crate::token::{Keyword, Span, Token, TokenKind};

mod error;

pub use error::{LexError, LexResult};

const SPACES_PER_INDENT: usize = 4;

const RESERVED_WORDS: [&str; 9] = [
    "plus",
    "minus",
    "times",
    "divide",
    "output",
    "input",
    "if",
    "otherwise",
    "is",
];

const COMPARATOR_PHRASES: &str = "a comparison ('equals', 'is not', 'is greater than', 'is less than')";

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    pending_tokens: VecDeque<Token<'a>>,
    at_line_start: bool,
    operators_on_line: usize,
    finished: bool,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            pending_tokens: VecDeque::new(),
            at_line_start: true,
            operators_on_line: 0,
            finished: false,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> LexResult<Option<Token<'a>>> {
        if let Some(token) = self.pending_tokens.pop_front() {
            return Ok(Some(token));
        }

        if self.at_line_start {
            self.at_line_start = false;
            if let Some(indent) = self.read_indentation() {
                return Ok(Some(indent));
            }
        }

        self.skip_whitespace();

        let Some(&(start_idx, ch)) = self.chars.peek() else {
            return Ok(None);
        };
        let line = self.line;
        let column = self.column;

        match ch {
            '\n' => {
                self.advance_char();
                self.at_line_start = true;
                self.operators_on_line = 0;
                Ok(Some(Token::new(
                    TokenKind::Newline,
                    Span {
                        start: start_idx,
                        end: start_idx + 1,
                        line,
                        column,
                    },
                )))
            }
            '"' => self.read_string().map(Some),
            c if c.is_ascii_digit() => self.read_number().map(Some),
            c if is_word_start(c) => self.read_word_token().map(Some),
            _ => Err(LexError::InvalidCharacter {
                character: ch,
                line,
                column,
            }),
        }
    }

    /// Emits `Indent(level)` for a run of leading spaces at line start.
    fn read_indentation(&mut self) -> Option<Token<'a>> {
        let start = self.current_index();
        let line = self.line;
        let column = self.column;
        let mut count = 0;
        while let Some(&(_, ' ')) = self.chars.peek() {
            self.advance_char();
            count += 1;
        }

        let level = count / SPACES_PER_INDENT;
        (level > 0).then(|| {
            Token::new(
                TokenKind::Indent(level),
                Span {
                    start,
                    end: start + count,
                    line,
                    column,
                },
            )
        })
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c != '\n' && c.is_whitespace() {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> (&'a str, Span) {
        let start = self.current_index();
        let line = self.line;
        let column = self.column;
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance_char();
            } else {
                break;
            }
        }
        let end = self.current_index();
        (
            &self.input[start..end],
            Span {
                start,
                end,
                line,
                column,
            },
        )
    }

    /// Skips blanks and reads the next word, if one starts there.
    fn next_word(&mut self) -> Option<(&'a str, Span)> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some(&(_, c)) if is_word_start(c) => Some(self.read_word()),
            _ => None,
        }
    }

    fn read_word_token(&mut self) -> LexResult<Token<'a>> {
        let (word, span) = self.read_word();
        let kind = match word {
            "plus" => self.operator(word, BinaryOperator::Add, span)?,
            "minus" => self.operator(word, BinaryOperator::Sub, span)?,
            "times" => self.operator(word, BinaryOperator::Mul, span)?,
            "divide" => self.operator(word, BinaryOperator::Div, span)?,
            "output" => {
                self.queue_print_literal()?;
                TokenKind::Keyword(Keyword::Print)
            }
            "input" => TokenKind::Keyword(Keyword::Input),
            "otherwise" => TokenKind::Keyword(Keyword::Else),
            "is" => {
                let end = self.expect_word("'now' after 'is'", "now")?;
                return Ok(Token::new(TokenKind::Assign, Span { end, ..span }));
            }
            "if" => {
                self.queue_condition()?;
                TokenKind::Keyword(Keyword::If)
            }
            _ => TokenKind::Identifier(word),
        };
        Ok(Token::new(kind, span))
    }

    fn operator(
        &mut self,
        word: &str,
        op: BinaryOperator,
        span: Span,
    ) -> LexResult<TokenKind<'a>> {
        self.operators_on_line += 1;
        if self.operators_on_line > 1 {
            return Err(LexError::DuplicateOperator {
                operator: word.to_string(),
                line: span.line,
                column: span.column,
            });
        }
        Ok(TokenKind::Operator(op))
    }

    /// `output` takes its literal operand inline; other operands are left to
    /// the regular scan.
    fn queue_print_literal(&mut self) -> LexResult<()> {
        self.skip_whitespace();
        let token = match self.chars.peek() {
            Some(&(_, '"')) => self.read_string()?,
            Some(&(_, c)) if c.is_ascii_digit() => self.read_number()?,
            _ => return Ok(()),
        };
        self.pending_tokens.push_back(token);
        Ok(())
    }

    /// Scans `<operand> <comparator phrase> <operand>` after `if`.
    fn queue_condition(&mut self) -> LexResult<()> {
        let left = self.read_operand()?;
        self.pending_tokens.push_back(left);
        let comparison = self.read_comparator()?;
        self.pending_tokens.push_back(comparison);
        let right = self.read_operand()?;
        self.pending_tokens.push_back(right);
        Ok(())
    }

    fn read_operand(&mut self) -> LexResult<Token<'a>> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some(&(_, c)) if c.is_ascii_digit() => self.read_number(),
            Some(&(_, c)) if is_word_start(c) => {
                let (word, span) = self.read_word();
                if is_reserved(word) {
                    return Err(LexError::ExpectedOperand {
                        found: format!("'{word}'"),
                        line: span.line,
                        column: span.column,
                    });
                }
                Ok(Token::new(TokenKind::Identifier(word), span))
            }
            _ => Err(LexError::ExpectedOperand {
                found: self.describe_next(),
                line: self.line,
                column: self.column,
            }),
        }
    }

    fn read_comparator(&mut self) -> LexResult<Token<'a>> {
        let Some((word, span)) = self.next_word() else {
            return Err(self.unexpected_phrase(COMPARATOR_PHRASES));
        };
        let (op, end) = match word {
            "equals" => (ComparisonOperator::Equal, span.end),
            "is" => match self.next_word() {
                Some(("not", next)) => (ComparisonOperator::NotEqual, next.end),
                Some(("greater", _)) => (
                    ComparisonOperator::Greater,
                    self.expect_word("'than' after 'is greater'", "than")?,
                ),
                Some(("less", _)) => (
                    ComparisonOperator::Less,
                    self.expect_word("'than' after 'is less'", "than")?,
                ),
                Some((found, next)) => {
                    return Err(LexError::UnexpectedPhrase {
                        expected: "'not', 'greater than' or 'less than' after 'is'",
                        found: format!("'{found}'"),
                        line: next.line,
                        column: next.column,
                    });
                }
                None => {
                    return Err(
                        self.unexpected_phrase("'not', 'greater than' or 'less than' after 'is'")
                    );
                }
            },
            found => {
                return Err(LexError::UnexpectedPhrase {
                    expected: COMPARATOR_PHRASES,
                    found: format!("'{found}'"),
                    line: span.line,
                    column: span.column,
                });
            }
        };
        Ok(Token::new(TokenKind::Comparison(op), Span { end, ..span }))
    }

    /// Consumes the next word if it is `expected`, returning its end offset.
    fn expect_word(&mut self, description: &'static str, expected: &str) -> LexResult<usize> {
        match self.next_word() {
            Some((word, span)) if word == expected => Ok(span.end),
            Some((word, span)) => Err(LexError::UnexpectedPhrase {
                expected: description,
                found: format!("'{word}'"),
                line: span.line,
                column: span.column,
            }),
            None => Err(self.unexpected_phrase(description)),
        }
    }

    fn unexpected_phrase(&mut self, expected: &'static str) -> LexError {
        LexError::UnexpectedPhrase {
            expected,
            found: self.describe_next(),
            line: self.line,
            column: self.column,
        }
    }

    fn describe_next(&mut self) -> String {
        match self.chars.peek() {
            None => "end of input".to_string(),
            Some(&(_, '\n')) => "end of line".to_string(),
            Some(&(_, c)) => format!("'{c}'"),
        }
    }

    fn read_number(&mut self) -> LexResult<Token<'a>> {
        let start = self.current_index();
        let line = self.line;
        let column = self.column;
        self.consume_digits();
        if let Some(&(_, '.')) = self.chars.peek() {
            self.advance_char();
            self.consume_digits();
        }

        let end = self.current_index();
        let literal = &self.input[start..end];
        let value = literal
            .parse::<f64>()
            .map_err(|_| LexError::InvalidNumber {
                literal: literal.to_string(),
                line,
                column,
            })?;
        Ok(Token::new(
            TokenKind::Number(value),
            Span {
                start,
                end,
                line,
                column,
            },
        ))
    }

    fn consume_digits(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn read_string(&mut self) -> LexResult<Token<'a>> {
        let start = self.current_index();
        let line = self.line;
        let column = self.column;
        self.advance_char(); // Consume opening quote
        let content_start = (start + 1).min(self.input.len());
        while let Some(&(idx, c)) = self.chars.peek() {
            if c == '"' {
                self.advance_char(); // Consume closing quote
                return Ok(Token::new(
                    TokenKind::String(&self.input[content_start..idx]),
                    Span {
                        start,
                        end: idx + 1,
                        line,
                        column,
                    },
                ));
            }
            if c == '\n' {
                break;
            }
            self.advance_char();
        }
        Err(LexError::UnterminatedString { line, column })
    }

    fn advance_char(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn current_index(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Words the scanner turns into operators, keywords or phrase heads.
fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(&word)
}

pub fn tokenize(input: &str) -> LexResult<Vec<Token<'_>>> {
    let tokens = Lexer::new(input).collect::<LexResult<Vec<_>>>()?;
    debug!(tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn kinds(input: &str) -> Vec<TokenKind<'_>> {
        tokenize(input)
            .expect("tokenize should succeed")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_arithmetic_line() {
        assert_eq!(
            kinds("9 plus 2.798"),
            vec![
                TokenKind::Number(9.0),
                TokenKind::Operator(BinaryOperator::Add),
                TokenKind::Number(2.798),
            ]
        );
    }

    #[test]
    fn test_simple_program() {
        let input = indoc! {r#"
            x is now 5
            if x equals 5
                output "five"
                y is now x times 2
            output y
        "#};
        let expected_tokens = vec![
            TokenKind::Identifier("x"),
            TokenKind::Assign,
            TokenKind::Number(5.0),
            TokenKind::Newline,
            TokenKind::Keyword(Keyword::If),
            TokenKind::Identifier("x"),
            TokenKind::Comparison(ComparisonOperator::Equal),
            TokenKind::Number(5.0),
            TokenKind::Newline,
            TokenKind::Indent(1),
            TokenKind::Keyword(Keyword::Print),
            TokenKind::String("five"),
            TokenKind::Newline,
            TokenKind::Indent(1),
            TokenKind::Identifier("y"),
            TokenKind::Assign,
            TokenKind::Identifier("x"),
            TokenKind::Operator(BinaryOperator::Mul),
            TokenKind::Number(2.0),
            TokenKind::Newline,
            TokenKind::Keyword(Keyword::Print),
            TokenKind::Identifier("y"),
            TokenKind::Newline,
        ];
        assert_eq!(kinds(input), expected_tokens);
    }

    #[test]
    fn folds_comparison_phrases() {
        assert_eq!(
            kinds("if a is not 1")[2],
            TokenKind::Comparison(ComparisonOperator::NotEqual)
        );
        assert_eq!(
            kinds("if a is greater than b")[2],
            TokenKind::Comparison(ComparisonOperator::Greater)
        );
        assert_eq!(
            kinds("if 3 is less than b"),
            vec![
                TokenKind::Keyword(Keyword::If),
                TokenKind::Number(3.0),
                TokenKind::Comparison(ComparisonOperator::Less),
                TokenKind::Identifier("b"),
            ]
        );
    }

    #[test]
    fn every_scanned_number_parses() {
        let digits = "9".repeat(400);
        assert_eq!(kinds(&digits), vec![TokenKind::Number(f64::INFINITY)]);
        assert_eq!(kinds("12."), vec![TokenKind::Number(12.0)]);
        assert_eq!(kinds("0.000"), vec![TokenKind::Number(0.0)]);
    }

    #[test]
    fn keeps_spaces_inside_strings() {
        assert_eq!(
            kinds(r#"output "Hello,   World!""#),
            vec![
                TokenKind::Keyword(Keyword::Print),
                TokenKind::String("Hello,   World!"),
            ]
        );
    }

    #[test]
    fn recognizes_input_and_otherwise() {
        assert_eq!(
            kinds("input name\notherwise"),
            vec![
                TokenKind::Keyword(Keyword::Input),
                TokenKind::Identifier("name"),
                TokenKind::Newline,
                TokenKind::Keyword(Keyword::Else),
            ]
        );
    }

    #[test]
    fn indentation_level_is_floor_of_spaces_over_four() {
        assert_eq!(kinds("   x")[0], TokenKind::Identifier("x"));
        assert_eq!(kinds("     x")[0], TokenKind::Indent(1));
        assert_eq!(kinds("        x")[0], TokenKind::Indent(2));
    }

    #[test]
    fn whitespace_only_lines_still_indent() {
        assert_eq!(
            kinds("x\n        \ny\n  \nz"),
            vec![
                TokenKind::Identifier("x"),
                TokenKind::Newline,
                TokenKind::Indent(2),
                TokenKind::Newline,
                TokenKind::Identifier("y"),
                TokenKind::Newline,
                TokenKind::Newline,
                TokenKind::Identifier("z"),
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = tokenize("a is now 1\n    b").expect("tokenize should succeed");
        let spans: Vec<(usize, usize)> = tokens
            .iter()
            .map(|token| (token.span.line, token.span.column))
            .collect();
        assert_eq!(spans, vec![(1, 1), (1, 3), (1, 10), (1, 11), (2, 1), (2, 5)]);
    }

    #[test]
    fn errors_on_second_operator_in_line() {
        let err = tokenize("1 plus 2 times 3").expect_err("expected lexing failure");
        assert_eq!(
            err,
            LexError::DuplicateOperator {
                operator: "times".to_string(),
                line: 1,
                column: 10,
            }
        );
    }

    #[test]
    fn operator_limit_resets_on_newline() {
        let tokens = tokenize("a is now 1 plus 2\nb is now 3 minus 1").expect("tokenize");
        assert_eq!(tokens.len(), 11);
    }

    #[test]
    fn errors_on_invalid_character() {
        let err = tokenize("x is now 1 @ 2\n").expect_err("expected lexing failure");
        assert!(err.to_string().contains("Invalid character '@'"));
        assert_eq!(err.position(), (1, 12));
    }

    #[test]
    fn errors_on_broken_assign_phrase() {
        let err = tokenize("x is 5").expect_err("expected lexing failure");
        assert!(matches!(err, LexError::UnexpectedPhrase { .. }));
        assert!(err.to_string().contains("'now' after 'is'"));
    }

    #[test]
    fn errors_on_broken_comparison_phrase() {
        let err = tokenize("if x is bigger than 2").expect_err("expected lexing failure");
        assert!(err.to_string().contains("found 'bigger'"));

        let err = tokenize("if x is greater 2").expect_err("expected lexing failure");
        assert!(err.to_string().contains("'than' after 'is greater'"));

        let err = tokenize("if x matches 2").expect_err("expected lexing failure");
        assert!(err.to_string().contains("a comparison"));
    }

    #[test]
    fn errors_on_missing_comparison_operand() {
        let err = tokenize("if x equals\n").expect_err("expected lexing failure");
        assert_eq!(
            err,
            LexError::ExpectedOperand {
                found: "end of line".to_string(),
                line: 1,
                column: 12,
            }
        );
    }

    #[test]
    fn errors_on_reserved_word_as_comparison_operand() {
        let err = tokenize("if plus equals 1").expect_err("expected lexing failure");
        assert_eq!(
            err,
            LexError::ExpectedOperand {
                found: "'plus'".to_string(),
                line: 1,
                column: 4,
            }
        );

        let err = tokenize("if x equals output").expect_err("expected lexing failure");
        assert_eq!(
            err,
            LexError::ExpectedOperand {
                found: "'output'".to_string(),
                line: 1,
                column: 13,
            }
        );
    }

    #[test]
    fn errors_on_unterminated_string() {
        let err = tokenize("output \"oops\nx").expect_err("expected lexing failure");
        assert_eq!(err, LexError::UnterminatedString { line: 1, column: 8 });
    }

    #[test]
    fn tokenizing_is_deterministic() {
        let source = "x is now 3 plus 4\nif x is greater than 5\n    output x\n";
        assert_eq!(tokenize(source), tokenize(source));
    }
}
