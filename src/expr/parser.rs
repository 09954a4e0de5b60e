use super::ExprError;
use super::lexer::Token;
use super::number::Number;

/// Recursive-descent evaluator over a token slice.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// expr   := term (('+' | '-') term)*
/// term   := unary (('*' | '/' | '//' | '%') unary)*
/// unary  := ('+' | '-') unary | power
/// power  := atom ('**' unary)?
/// atom   := NUMBER | '(' expr ')'
/// ```
///
/// `**` is right-associative and binds tighter than a unary minus on its
/// left, so `-2 ** 2` is `-4` while `2 ** -1` is `0.5`.
///
/// Every `unary` entry counts one level of nesting; input nested deeper than
/// [`MAX_DEPTH`] is rejected before it can exhaust the stack.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

/// Deepest accepted nesting of parentheses, signs and exponents
pub const MAX_DEPTH: usize = 200;

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Evaluate the whole token stream
    pub fn parse(mut self) -> Result<Number, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::Empty);
        }
        let value = self.expr()?;
        match self.peek() {
            None => Ok(value),
            Some(token) => Err(ExprError::UnexpectedToken(token.to_string())),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Number, ExprError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value = value.add(self.term()?)?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value = value.sub(self.term()?)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<Number, ExprError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value = value.mul(self.unary()?)?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    value = value.div(self.unary()?)?;
                }
                Some(Token::DoubleSlash) => {
                    self.pos += 1;
                    value = value.floor_div(self.unary()?)?;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    value = value.rem(self.unary()?)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<Number, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<Number, ExprError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.unary()?.neg()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Number, ExprError> {
        let base = self.atom()?;
        if let Some(Token::DoubleStar) = self.peek() {
            self.pos += 1;
            let exponent = self.unary()?;
            return base.pow(exponent);
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Number, ExprError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(*n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(token) => Err(ExprError::UnexpectedToken(token.to_string())),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(token) => Err(ExprError::UnexpectedToken(token.to_string())),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}
