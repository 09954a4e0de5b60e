//! Restricted arithmetic expressions.
//!
//! Only numeric literals, parentheses, and the operators `+ - * / // % **`
//! are understood. Nothing is ever executed: input is tokenized, parsed by
//! recursive descent, and folded into a [`Number`].
//!
//! ```
//! use assistant_tools::expr::evaluate;
//!
//! assert_eq!(evaluate("2 + 2 * 3").unwrap().to_string(), "8");
//! assert_eq!(evaluate("7 / 2").unwrap().to_string(), "3.5");
//! assert!(evaluate("2+").is_err());
//! ```

mod lexer;
mod number;
mod parser;

pub use lexer::{Token, tokenize};
pub use number::Number;
pub use parser::Parser;

/// Errors raised while tokenizing, parsing, or evaluating an expression
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExprError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("empty expression")]
    Empty,

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("expression nested too deeply")]
    TooDeep,
}

/// Tokenize, parse and evaluate `input`
pub fn evaluate(input: &str) -> Result<Number, ExprError> {
    let tokens = tokenize(input)?;
    Parser::new(&tokens).parse()
}
