//! Recursive-descent parser for input expressions.

use super::ast::{constant, BinaryOp, Expr, Function, UnaryOp};
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{ResponseError, Result};

/// Maximum height of an expression tree and maximum nesting of
/// parentheses, unary operators and conditionals.
///
/// Evaluation recurses once per tree level, so both are bounded to keep
/// parsing and evaluation on the stack.
pub const MAX_DEPTH: usize = 128;

/// A parsed subtree with its height.
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 1 }
    }
}

/// Parser for input expressions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            nesting: 0,
        })
    }

    /// Parse the entire input as a single expression.
    pub fn parse(&mut self) -> Result<Expr> {
        if self.current.kind == TokenKind::Eof {
            return Err(ResponseError::parse(self.current.column, "empty expression"));
        }

        let node = self.parse_conditional()?;

        if self.current.kind != TokenKind::Eof {
            return Err(ResponseError::parse(
                self.current.column,
                format!("unexpected token '{}'", self.current.text),
            ));
        }

        Ok(node.expr)
    }

    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token> {
        if self.current.kind == kind {
            self.advance()
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, what: &str) -> ResponseError {
        if self.current.kind == TokenKind::Eof {
            ResponseError::parse(
                self.current.column,
                format!("unexpected end of expression, expected {}", what),
            )
        } else {
            ResponseError::parse(
                self.current.column,
                format!("expected {}, got '{}'", what, self.current.text),
            )
        }
    }

    fn too_deep(&self) -> ResponseError {
        ResponseError::parse(self.current.column, "expression too deeply nested")
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.current.kind == TokenKind::Identifier && self.current.text == keyword
    }

    /// Wrap children into a node one level above the tallest of them.
    fn node(&self, expr: Expr, child_height: usize) -> Result<Node> {
        let height = child_height + 1;
        if height > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok(Node { expr, height })
    }

    fn binary(&self, op: BinaryOp, lhs: Node, rhs: Node) -> Result<Node> {
        let height = lhs.height.max(rhs.height);
        self.node(
            Expr::Binary {
                op,
                lhs: Box::new(lhs.expr),
                rhs: Box::new(rhs.expr),
            },
            height,
        )
    }

    /// Run `parse` one nesting level deeper.
    fn nested(&mut self, parse: fn(&mut Self) -> Result<Node>) -> Result<Node> {
        if self.nesting >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    fn parse_conditional(&mut self) -> Result<Node> {
        self.nested(Self::conditional)
    }

    fn conditional(&mut self) -> Result<Node> {
        let cond = self.parse_or()?;

        if self.current.kind != TokenKind::Question {
            return Ok(cond);
        }
        self.advance()?;

        let then = self.parse_conditional()?;
        self.expect(TokenKind::Colon, "':'")?;
        let otherwise = self.parse_conditional()?;

        let height = cond.height.max(then.height).max(otherwise.height);
        self.node(
            Expr::Conditional {
                cond: Box::new(cond.expr),
                then: Box::new(then.expr),
                otherwise: Box::new(otherwise.expr),
            },
            height,
        )
    }

    fn parse_or(&mut self) -> Result<Node> {
        let mut lhs = self.parse_and()?;
        while self.at_keyword("or") {
            self.advance()?;
            let rhs = self.parse_and()?;
            lhs = self.binary(BinaryOp::Or, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Node> {
        let mut lhs = self.parse_comparison()?;
        while self.at_keyword("and") {
            self.advance()?;
            let rhs = self.parse_comparison()?;
            lhs = self.binary(BinaryOp::And, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn parse_comparison(&mut self) -> Result<Node> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Less => BinaryOp::Less,
                TokenKind::LessEqual => BinaryOp::LessEqual,
                TokenKind::Greater => BinaryOp::Greater,
                TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
                TokenKind::EqualEqual => BinaryOp::Equal,
                TokenKind::NotEqual => BinaryOp::NotEqual,
                _ => return Ok(lhs),
            };
            self.advance()?;
            let rhs = self.parse_additive()?;
            lhs = self.binary(op, lhs, rhs)?;
        }
    }

    fn parse_additive(&mut self) -> Result<Node> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance()?;
            let rhs = self.parse_multiplicative()?;
            lhs = self.binary(op, lhs, rhs)?;
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Node> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Rem,
                _ => return Ok(lhs),
            };
            self.advance()?;
            let rhs = self.parse_unary()?;
            lhs = self.binary(op, lhs, rhs)?;
        }
    }

    fn parse_unary(&mut self) -> Result<Node> {
        self.nested(Self::unary)
    }

    fn unary(&mut self) -> Result<Node> {
        let op = match self.current.kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Identifier if self.current.text == "not" => Some(UnaryOp::Not),
            _ => None,
        };

        match op {
            Some(op) => {
                self.advance()?;
                let operand = self.parse_unary()?;
                let height = operand.height;
                self.node(
                    Expr::Unary {
                        op,
                        operand: Box::new(operand.expr),
                    },
                    height,
                )
            }
            None => self.parse_power(),
        }
    }

    /// `-t^2` is `-(t^2)` and `2^3^2` is `2^(3^2)`.
    fn parse_power(&mut self) -> Result<Node> {
        let base = self.parse_primary()?;
        if self.current.kind == TokenKind::Caret {
            self.advance()?;
            let exponent = self.parse_unary()?;
            return self.binary(BinaryOp::Pow, base, exponent);
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Node> {
        match self.current.kind {
            TokenKind::Number => {
                let tok = self.advance()?;
                let value = tok.text.parse::<f64>().map_err(|_| {
                    ResponseError::parse(tok.column, format!("invalid number: {}", tok.text))
                })?;
                Ok(Node::leaf(Expr::Number(value)))
            }
            TokenKind::Identifier => {
                if matches!(self.current.text.as_str(), "and" | "or" | "not") {
                    return Err(self.unexpected("a value"));
                }
                let tok = self.advance()?;
                if self.current.kind == TokenKind::OpenParen {
                    return self.parse_call(tok);
                }
                match constant(&tok.text) {
                    Some(value) => Ok(Node::leaf(Expr::Number(value))),
                    None => Ok(Node::leaf(Expr::Variable(tok.text))),
                }
            }
            TokenKind::OpenParen => {
                self.advance()?;
                let inner = self.parse_conditional()?;
                self.expect(TokenKind::CloseParen, "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("a value")),
        }
    }

    fn parse_call(&mut self, name: Token) -> Result<Node> {
        let function = Function::from_name(&name.text).ok_or_else(|| {
            ResponseError::UnknownFunction {
                name: name.text.clone(),
                column: name.column,
            }
        })?;

        self.expect(TokenKind::OpenParen, "'('")?;
        let mut args = Vec::with_capacity(function.arity());
        let mut height = 0;
        if self.current.kind != TokenKind::CloseParen {
            loop {
                let arg = self.parse_conditional()?;
                height = height.max(arg.height);
                args.push(arg.expr);
                if self.current.kind == TokenKind::Comma {
                    self.advance()?;
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::CloseParen, "')'")?;

        if args.len() != function.arity() {
            return Err(ResponseError::ArityMismatch {
                function: function.name().to_string(),
                expected: function.arity(),
                found: args.len(),
            });
        }

        self.node(Expr::Call { function, args }, height)
    }
}
