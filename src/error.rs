//! Error types for the RLC response engine.
//!
//! This module provides a unified error type [`ResponseError`] that covers
//! all error conditions that can occur while parsing a custom input
//! expression, evaluating it on the time grid, and writing results.
//!
//! Analytical (step/impulse) responses never fail; degenerate component
//! values surface as non-finite samples instead of errors.

use thiserror::Error;

/// Result type alias using [`ResponseError`].
pub type Result<T> = std::result::Result<T, ResponseError>;

/// Unified error type for all response computations.
#[derive(Error, Debug)]
pub enum ResponseError {
    // ============ Expression Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at column {column}: {message}")]
    LexerError { column: usize, message: String },

    /// Error during parsing
    #[error("Parse error at column {column}: {message}")]
    ParseError { column: usize, message: String },

    /// Call to a function the evaluator does not know
    #[error("Unknown function '{name}' at column {column}")]
    UnknownFunction { name: String, column: usize },

    /// Function called with the wrong number of arguments
    #[error("Function '{function}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    // ============ Expression Evaluation Errors ============
    /// Symbol with no binding
    #[error("Undefined symbol '{name}'")]
    UndefinedVariable { name: String },

    /// Division or modulo by zero inside an expression
    #[error("Division by zero")]
    DivisionByZero,

    /// Custom input produced NaN or infinity
    #[error("Input evaluated to a non-finite value ({value}) at t = {t}")]
    NonFiniteInput { t: f64, value: f64 },

    // ============ Simulation Errors ============
    /// Invalid simulation parameter
    #[error("Invalid simulation parameter: {message}")]
    InvalidSimulationParam { message: String },

    /// Unrecognized system type name
    #[error("Unknown system type '{name}' (expected rc, rl, rlc-series or rlc-parallel)")]
    UnknownSystemType { name: String },

    /// Unrecognized input kind name
    #[error("Unknown input type '{name}' (expected step, impulse or custom)")]
    UnknownInputKind { name: String },

    // ============ I/O Errors ============
    /// Error writing the response
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl ResponseError {
    /// Create a lexer error
    pub fn lexer(column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(column: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            column,
            message: message.into(),
        }
    }

    /// Create an invalid simulation parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidSimulationParam {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = ResponseError::parse(7, "expected ')'");
        assert_eq!(err.to_string(), "Parse error at column 7: expected ')'");

        let err = ResponseError::UndefinedVariable {
            name: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Undefined symbol 'x'");
    }
}
