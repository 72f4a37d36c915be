//! Expression parsing implementation
//!
//! ```text
//! expression ::= identifier | integer_literal
//! ```
//!
//! Identifiers become [`Expression::VarRef`] holding the bare name. They are
//! not looked up in the scope stack here; binding a reference to its
//! declaration is the job of a later pass.

use crate::ir::Expression;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{unexpected_token, ParseError, Parser};

impl Parser {
    /// Parse expression (variable reference or integer constant)
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        const EXPECTED: &[TokenKind] = &[TokenKind::Ident, TokenKind::IntLiteral];

        if !matches!(self.peek(), Token::Ident(..) | Token::IntLiteral(..)) {
            return Err(self.unexpected(EXPECTED));
        }

        let id = self.next_id();
        match self.advance()? {
            Token::Ident(name, location) => Ok(Expression::VarRef { id, name, location }),
            Token::IntLiteral(value, location) => Ok(Expression::IntConst {
                id,
                value,
                location,
            }),
            other => Err(unexpected_token(&other, EXPECTED)),
        }
    }
}
