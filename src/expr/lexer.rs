//! Lexer (tokenizer) for input expressions.

use crate::error::{ResponseError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A variable, constant, function or keyword name
    Identifier,
    /// A number (integer or floating point)
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    EqualEqual,
    NotEqual,
    Question,
    Colon,
    Comma,
    /// Open parenthesis '('
    OpenParen,
    /// Close parenthesis ')'
    CloseParen,
    /// End of input
    Eof,
}

/// Lexer for tokenizing expression input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    column: self.column,
                });
            }
        };

        let column = self.column;

        if ch.is_ascii_digit() || ch == '.' {
            let text = self.read_number(column)?;
            return Ok(Token {
                kind: TokenKind::Number,
                text,
                column,
            });
        }

        if ch.is_alphabetic() || ch == '_' {
            let text = self.read_identifier();
            return Ok(Token {
                kind: TokenKind::Identifier,
                text,
                column,
            });
        }

        self.advance();
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '<' => self.with_equals(TokenKind::Less, TokenKind::LessEqual),
            '>' => self.with_equals(TokenKind::Greater, TokenKind::GreaterEqual),
            '=' if self.eat('=') => TokenKind::EqualEqual,
            '!' if self.eat('=') => TokenKind::NotEqual,
            _ => {
                return Err(ResponseError::lexer(
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        let text = match kind {
            TokenKind::LessEqual => "<=".to_string(),
            TokenKind::GreaterEqual => ">=".to_string(),
            TokenKind::EqualEqual => "==".to_string(),
            TokenKind::NotEqual => "!=".to_string(),
            _ => ch.to_string(),
        };

        Ok(Token { kind, text, column })
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.column += 1;
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn with_equals(&mut self, plain: TokenKind, with_eq: TokenKind) -> TokenKind {
        if self.eat('=') {
            with_eq
        } else {
            plain
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_digits(&mut self, text: &mut String) -> usize {
        let mut count = 0;
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
                count += 1;
            } else {
                break;
            }
        }
        count
    }

    fn read_number(&mut self, column: usize) -> Result<String> {
        let mut text = String::new();

        // Integer part
        let mut digits = self.read_digits(&mut text);

        // Decimal part
        if self.eat('.') {
            text.push('.');
            digits += self.read_digits(&mut text);
        }

        if digits == 0 {
            return Err(ResponseError::lexer(column, "expected digits after '.'"));
        }

        // Exponent part
        if let Some(&ch) = self.chars.peek() {
            if ch == 'e' || ch == 'E' {
                text.push(ch);
                self.advance();
                if let Some(&sign) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        text.push(sign);
                        self.advance();
                    }
                }
                if self.read_digits(&mut text) == 0 {
                    return Err(ResponseError::lexer(
                        column,
                        format!("malformed exponent in '{}'", text),
                    ));
                }
            }
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            out.push(tok.kind);
            if tok.kind == TokenKind::Eof {
                return out;
            }
        }
    }

    #[test]
    fn test_lexer_basic() {
        let mut lexer = Lexer::new("sin(2*t)");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "sin");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::OpenParen);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.text, "2");
        assert_eq!(tok.column, 5);
    }

    #[test]
    fn test_lexer_comparisons() {
        use TokenKind::*;
        assert_eq!(
            kinds("t <= 1 ? 1 : t != 2"),
            vec![Identifier, LessEqual, Number, Question, Number, Colon, Identifier, NotEqual, Number, Eof]
        );
    }

    #[test]
    fn test_lexer_numbers() {
        let mut lexer = Lexer::new("1.5e-3 .25");
        assert_eq!(lexer.next_token().unwrap().text, "1.5e-3");
        assert_eq!(lexer.next_token().unwrap().text, ".25");
    }

    #[test]
    fn test_lexer_rejects_unknown_characters() {
        let mut lexer = Lexer::new("t # 2");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, ResponseError::LexerError { column: 3, .. }));

        let mut lexer = Lexer::new("2e");
        assert!(lexer.next_token().is_err());
    }
}
