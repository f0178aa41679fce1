//! Expression evaluator for custom input signals.
//!
//! A custom input is a scalar real expression of one variable, `t`. The
//! expression is parsed once into an [`Expression`] and then evaluated at
//! every grid point.
//!
//! # Grammar Overview
//!
//! ```text
//! expression     = conditional
//! conditional    = or [ '?' conditional ':' conditional ]
//! or             = and { "or" and }
//! and            = comparison { "and" comparison }
//! comparison     = additive { ('<' | "<=" | '>' | ">=" | "==" | "!=") additive }
//! additive       = multiplicative { ('+' | '-') multiplicative }
//! multiplicative = unary { ('*' | '/' | '%') unary }
//! unary          = ('-' | '+' | "not") unary | power
//! power          = primary [ '^' unary ]
//! primary        = number | identifier | call | '(' expression ')'
//! call           = identifier '(' [ expression { ',' expression } ] ')'
//! ```
//!
//! Comparisons and logical operators yield `1` or `0`; any non-zero value is
//! true. Constants `pi`, `e` and `tau` are replaced by their values.
//!
//! Trees taller than [`MAX_DEPTH`] levels, and nesting of parentheses,
//! unary operators and conditionals beyond it, are rejected at parse time
//! with a `ParseError`.
//!
//! # Functions
//!
//! `sin cos tan asin acos atan sinh cosh tanh exp log ln log10 sqrt abs
//! floor ceil round sign` take one argument; `min max pow` take two.
//!
//! # Example
//!
//! ```
//! use rlc_response::expr;
//!
//! let square = expr::parse("sin(2*pi*t) >= 0 ? 1 : -1").unwrap();
//! assert_eq!(square.evaluate(0.1).unwrap(), 1.0);
//! assert_eq!(square.evaluate(0.6).unwrap(), -1.0);
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Expr, Function, UnaryOp};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{Parser, MAX_DEPTH};

use crate::error::{ResponseError, Result};

/// Name of the time variable bound during evaluation.
pub const TIME_VARIABLE: &str = "t";

/// A source of input values u(t) for numerical integration.
///
/// The engine calls [`InputSignal::value_at`] once per grid point and aborts
/// on the first error. Closures of type `Fn(f64) -> Result<f64>` implement
/// this trait, so any evaluator can be plugged in.
pub trait InputSignal {
    fn value_at(&self, t: f64) -> Result<f64>;
}

impl<F> InputSignal for F
where
    F: Fn(f64) -> Result<f64>,
{
    fn value_at(&self, t: f64) -> Result<f64> {
        self(t)
    }
}

/// A parsed expression in the variable `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Expr,
}

impl Expression {
    /// The original expression text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed syntax tree.
    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// Evaluate with `t` bound to the given time.
    pub fn evaluate(&self, t: f64) -> Result<f64> {
        eval(&self.root, t)
    }
}

impl InputSignal for Expression {
    fn value_at(&self, t: f64) -> Result<f64> {
        self.evaluate(t)
    }
}

/// Parse an expression string.
pub fn parse(input: &str) -> Result<Expression> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    let root = parser.parse()?;
    Ok(Expression {
        source: input.to_string(),
        root,
    })
}

/// Parse and evaluate an expression at a single time.
pub fn evaluate(input: &str, t: f64) -> Result<f64> {
    parse(input)?.evaluate(t)
}

fn truth(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn eval(expr: &Expr, t: f64) -> Result<f64> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Variable(name) => {
            if name == TIME_VARIABLE {
                Ok(t)
            } else {
                Err(ResponseError::UndefinedVariable { name: name.clone() })
            }
        }
        Expr::Unary { op, operand } => {
            let value = eval(operand, t)?;
            Ok(match op {
                UnaryOp::Neg => -value,
                UnaryOp::Plus => value,
                UnaryOp::Not => truth(value == 0.0),
            })
        }
        Expr::Binary { op, lhs, rhs } => {
            let a = eval(lhs, t)?;
            // Short-circuit so `t > 0 and 1/t > 2` is safe at t = 0
            match op {
                BinaryOp::And if a == 0.0 => return Ok(0.0),
                BinaryOp::Or if a != 0.0 => return Ok(1.0),
                _ => {}
            }
            let b = eval(rhs, t)?;
            Ok(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div | BinaryOp::Rem if b == 0.0 => {
                    return Err(ResponseError::DivisionByZero);
                }
                BinaryOp::Div => a / b,
                BinaryOp::Rem => a % b,
                BinaryOp::Pow => a.powf(b),
                BinaryOp::Less => truth(a < b),
                BinaryOp::LessEqual => truth(a <= b),
                BinaryOp::Greater => truth(a > b),
                BinaryOp::GreaterEqual => truth(a >= b),
                BinaryOp::Equal => truth(a == b),
                BinaryOp::NotEqual => truth(a != b),
                BinaryOp::And | BinaryOp::Or => truth(b != 0.0),
            })
        }
        Expr::Call { function, args } => match args.as_slice() {
            [x] => Ok(function.apply1(eval(x, t)?)),
            [a, b] => Ok(function.apply2(eval(a, t)?, eval(b, t)?)),
            _ => Err(ResponseError::ArityMismatch {
                function: function.name().to_string(),
                expected: function.arity(),
                found: args.len(),
            }),
        },
        Expr::Conditional {
            cond,
            then,
            otherwise,
        } => {
            if eval(cond, t)? != 0.0 {
                eval(then, t)
            } else {
                eval(otherwise, t)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(input: &str, t: f64) -> f64 {
        evaluate(input, t).unwrap()
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(at("1 + 2 * 3", 0.0), 7.0);
        assert_eq!(at("(1 + 2) * 3", 0.0), 9.0);
        assert_eq!(at("2^3^2", 0.0), 512.0);
        assert_eq!(at("-2^2", 0.0), -4.0);
        assert_eq!(at("2^-1", 0.0), 0.5);
        assert_eq!(at("7 % 4", 0.0), 3.0);
        assert_eq!(at("10 - 4 - 3", 0.0), 3.0);
    }

    #[test]
    fn test_time_binding_and_functions() {
        assert!((at("sin(2*t)", 0.25) - 0.5f64.sin()).abs() < 1e-15);
        assert!((at("exp(-t) * cos(t)", 1.0) - (-1.0f64).exp() * 1.0f64.cos()).abs() < 1e-15);
        assert_eq!(at("sqrt(t)", 16.0), 4.0);
        assert_eq!(at("max(t, 3)", 1.0), 3.0);
        assert_eq!(at("pow(t, 2)", 3.0), 9.0);
        assert_eq!(at("sign(t)", 0.0), 0.0);
        assert_eq!(at("abs(t)", -2.5), 2.5);
    }

    #[test]
    fn test_conditionals_and_logic() {
        assert_eq!(at("t > 1 ? 5 : 0", 0.5), 0.0);
        assert_eq!(at("t > 1 ? 5 : 0", 1.5), 5.0);
        assert_eq!(at("t >= 1 and t < 2", 1.0), 1.0);
        assert_eq!(at("t < 1 or t > 2", 1.5), 0.0);
        assert_eq!(at("not (t == 0)", 0.0), 0.0);
        assert_eq!(at("t > 0 and 1/t > 2", 0.0), 0.0);
    }

    #[test]
    fn test_evaluation_errors() {
        assert!(matches!(
            evaluate("x + 1", 0.0),
            Err(ResponseError::UndefinedVariable { ref name }) if name == "x"
        ));
        assert!(matches!(evaluate("1 / t", 0.0), Err(ResponseError::DivisionByZero)));
        assert!(matches!(evaluate("1 % 0", 2.0), Err(ResponseError::DivisionByZero)));
        assert_eq!(at("1 / t", 2.0), 0.5);
    }

    #[test]
    fn test_closure_is_an_input_signal() {
        let ramp = |t: f64| -> Result<f64> { Ok(2.0 * t) };
        assert_eq!(ramp.value_at(1.5).unwrap(), 3.0);

        let parsed = parse("2*t").unwrap();
        assert_eq!(parsed.value_at(1.5).unwrap(), 3.0);
        assert_eq!(parsed.source(), "2*t");
    }
}
