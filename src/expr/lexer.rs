use std::fmt;

use super::ExprError;
use super::number::Number;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(Number),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    DoubleStar,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::DoubleSlash => write!(f, "//"),
            Token::Percent => write!(f, "%"),
            Token::DoubleStar => write!(f, "**"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// Split an expression into tokens, skipping whitespace
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        match ch {
            c if c.is_whitespace() => {
                pos += 1;
            }
            '0'..='9' | '.' => {
                let (number, next) = lex_number(&chars, pos)?;
                tokens.push(Token::Number(number));
                pos = next;
            }
            '+' => {
                tokens.push(Token::Plus);
                pos += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                pos += 1;
            }
            '*' if chars.get(pos + 1) == Some(&'*') => {
                tokens.push(Token::DoubleStar);
                pos += 2;
            }
            '*' => {
                tokens.push(Token::Star);
                pos += 1;
            }
            '/' if chars.get(pos + 1) == Some(&'/') => {
                tokens.push(Token::DoubleSlash);
                pos += 2;
            }
            '/' => {
                tokens.push(Token::Slash);
                pos += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                pos += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            other => return Err(ExprError::UnexpectedChar { ch: other, pos }),
        }
    }

    Ok(tokens)
}

/// Lex `123`, `1.5`, `.5`, `1.`, `1e3`, `2.5E-4`; returns the number and the index after it
fn lex_number(chars: &[char], start: usize) -> Result<(Number, usize), ExprError> {
    let mut pos = start;
    let mut is_float = false;

    while pos < chars.len() && chars[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos < chars.len() && chars[pos] == '.' {
        is_float = true;
        pos += 1;
        while pos < chars.len() && chars[pos].is_ascii_digit() {
            pos += 1;
        }
    }
    if pos < chars.len() && (chars[pos] == 'e' || chars[pos] == 'E') {
        let mut exp_end = pos + 1;
        if exp_end < chars.len() && (chars[exp_end] == '+' || chars[exp_end] == '-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < chars.len() && chars[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end == digits_start {
            let text: String = chars[start..exp_end].iter().collect();
            return Err(ExprError::InvalidNumber(text));
        }
        is_float = true;
        pos = exp_end;
    }

    let text: String = chars[start..pos].iter().collect();
    if text == "." {
        return Err(ExprError::InvalidNumber(text));
    }

    let number = if is_float {
        let value: f64 = text
            .parse()
            .map_err(|_| ExprError::InvalidNumber(text.clone()))?;
        Number::Float(value)
    } else {
        // "007" is rejected, "000" is fine
        if text.len() > 1 && text.starts_with('0') && text.chars().any(|c| c != '0') {
            return Err(ExprError::InvalidNumber(text));
        }
        match text.parse::<i128>() {
            Ok(value) => Number::Int(value),
            Err(_) => {
                let value: f64 = text
                    .parse()
                    .map_err(|_| ExprError::InvalidNumber(text.clone()))?;
                Number::Float(value)
            }
        }
    };

    Ok((number, pos))
}
